//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod movie_service;
pub mod score_service;

pub use movie_service::MovieService;
pub use score_service::ScoreService;
