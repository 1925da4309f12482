//! Score domain entity
//!
//! A single user's rating of a movie. Identity is the (movie, user) pair.

use serde::{Deserialize, Serialize};

use super::movie::MovieId;
use super::user::UserId;
use crate::error::DomainError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;

/// A user's score for a movie. One per user per movie, last write wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub value: f64,
}

/// A score submission from the authenticated user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewScore {
    pub movie_id: MovieId,
    pub value: f64,
}

impl NewScore {
    pub fn new(movie_id: MovieId, value: f64) -> Self {
        Self { movie_id, value }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        // NaN fails the range check
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.value) {
            return Err(DomainError::Validation(format!(
                "Score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }
        Ok(())
    }
}
