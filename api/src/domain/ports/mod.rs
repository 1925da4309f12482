//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod identity;
pub mod repositories;

pub use identity::AuthenticatedUserProvider;
pub use repositories::{MovieRepository, ScoreRepository, UserRepository};
