//! Movie domain entity
//!
//! A movie in the catalog together with its aggregate rating.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::score::Score;
use super::user::UserId;
use crate::error::DomainError;

pub const TITLE_MIN_LEN: usize = 5;
pub const TITLE_MAX_LEN: usize = 80;

/// Unique identifier for a movie (store-generated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub i64);

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie with its aggregate score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Mean of all user scores
    pub score: f64,
    /// Number of users who scored the movie
    pub count: i32,
    pub image: String,
    /// Individual user scores. Only populated by a full load.
    #[serde(skip_serializing)]
    pub scores: Vec<Score>,
}

impl Movie {
    /// Record `value` as `user_id`'s score for this movie.
    ///
    /// Overwrites the user's existing score if there is one, otherwise appends
    /// a new one. Returns the score as it now stands.
    pub fn upsert_score(&mut self, user_id: UserId, value: f64) -> Score {
        if let Some(existing) = self.scores.iter_mut().find(|s| s.user_id == user_id) {
            existing.value = value;
            return existing.clone();
        }

        let score = Score {
            movie_id: self.id,
            user_id,
            value,
        };
        self.scores.push(score.clone());
        score
    }

    /// Recompute `score` and `count` from the score collection
    pub fn recompute_score(&mut self) {
        if self.scores.is_empty() {
            self.score = 0.0;
            self.count = 0;
            return;
        }

        let sum: f64 = self.scores.iter().map(|s| s.value).sum();
        self.score = sum / self.scores.len() as f64;
        self.count = self.scores.len() as i32;
    }

    /// Apply editable fields from an update request
    pub fn apply(&mut self, input: &MovieInput) {
        self.title = input.title.clone();
        self.image = input.image.clone();
    }
}

/// Editable movie fields, used for both insert and update
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub image: String,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Title must not be blank".to_string()));
        }

        let len = title.chars().count();
        if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
            return Err(DomainError::Validation(format!(
                "Title must be between {} and {} characters",
                TITLE_MIN_LEN, TITLE_MAX_LEN
            )));
        }

        if !image_url_pattern().is_match(&self.image) {
            return Err(DomainError::Validation(
                "Image must be an http(s) URL".to_string(),
            ));
        }

        Ok(())
    }
}

fn image_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/]+\S*$").expect("image URL pattern is valid")
    })
}
