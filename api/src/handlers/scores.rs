//! Score handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use super::movies::MovieResponse;
use crate::app::ScoreService;
use crate::auth::RequestUser;
use crate::domain::entities::{MovieId, NewScore, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for scoring a movie
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub movie_id: i64,
    pub score: f64,
}

/// PUT /scores
///
/// Record the caller's score for a movie and return the movie with its
/// updated aggregate.
pub async fn save_score(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    let service = ScoreService::new(
        state.movie_repo.clone(),
        state.score_repo.clone(),
        Arc::new(RequestUser::new(user)),
    );

    let movie = service
        .save_score(&NewScore::new(MovieId(request.movie_id), request.score))
        .await?;

    Ok(Json(movie.into()))
}
