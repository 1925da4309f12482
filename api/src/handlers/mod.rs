//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod movies;
pub mod scores;

pub use movies::{delete_movie, get_movie, insert_movie, list_movies, update_movie};
pub use scores::save_score;
