//! Score service
//!
//! Records the authenticated user's score for a movie and keeps the movie's
//! aggregate score and rating count in step with its individual scores.

use std::sync::Arc;

use crate::domain::entities::{Movie, NewScore};
use crate::domain::ports::{AuthenticatedUserProvider, MovieRepository, ScoreRepository};
use crate::error::{AppError, DomainError};

/// Service for scoring movies
pub struct ScoreService<MR, SR, UP>
where
    MR: MovieRepository,
    SR: ScoreRepository,
    UP: AuthenticatedUserProvider,
{
    movies: Arc<MR>,
    scores: Arc<SR>,
    users: Arc<UP>,
}

impl<MR, SR, UP> ScoreService<MR, SR, UP>
where
    MR: MovieRepository,
    SR: ScoreRepository,
    UP: AuthenticatedUserProvider,
{
    pub fn new(movies: Arc<MR>, scores: Arc<SR>, users: Arc<UP>) -> Self {
        Self {
            movies,
            scores,
            users,
        }
    }

    /// Save the current user's score for a movie
    ///
    /// 1. Resolves the acting user
    /// 2. Loads the movie with all its scores
    /// 3. Overwrites the user's previous score or adds a new one
    /// 4. Persists the score; the store recomputes the movie's mean score and
    ///    count in the same transaction
    /// 5. Returns the movie as stored afterwards
    pub async fn save_score(&self, submission: &NewScore) -> Result<Movie, AppError> {
        submission.validate()?;

        let user = self.users.current_user().await?;

        let mut movie = self
            .movies
            .find_by_id(&submission.movie_id)
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::NotFound(format!(
                    "Movie {} not found",
                    submission.movie_id
                )))
            })?;

        let score = movie.upsert_score(user.id, submission.value);
        self.scores.upsert(&score).await?;

        let saved = self.movies.find_by_id(&movie.id).await?.ok_or_else(|| {
            AppError::Domain(DomainError::NotFound(format!("Movie {} not found", movie.id)))
        })?;

        tracing::info!(
            movie_id = %saved.id,
            user_id = %user.id,
            value = submission.value,
            score = saved.score,
            count = saved.count,
            "Score saved"
        );

        Ok(saved)
    }
}
