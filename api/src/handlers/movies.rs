//! Movie handlers
//!
//! Endpoints for browsing and administering the movie catalog.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Movie, MovieId, MovieInput, Page, PageRequest, User};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing movies
#[derive(Debug, Deserialize)]
pub struct ListMoviesQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub page: u64,
    pub size: Option<u64>,
}

/// Request body for creating or updating a movie
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub image: String,
}

impl From<MovieRequest> for MovieInput {
    fn from(request: MovieRequest) -> Self {
        MovieInput {
            title: request.title,
            image: request.image,
        }
    }
}

/// Movie as returned by the API
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub score: f64,
    pub count: i32,
    pub image: String,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        MovieResponse {
            id: movie.id.0,
            title: movie.title,
            score: movie.score,
            count: movie.count,
            image: movie.image,
        }
    }
}

fn require_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// GET /movies
///
/// Search movies by title, paginated.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<ListMoviesQuery>,
) -> Result<Json<Page<MovieResponse>>, AppError> {
    let page = PageRequest::new(query.page, state.config.page_size(query.size));
    let movies = state.movie_service.find_all(&query.title, &page).await?;

    Ok(Json(movies.map(MovieResponse::from)))
}

/// GET /movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = state.movie_service.find_by_id(&MovieId(id)).await?;
    Ok(Json(movie.into()))
}

/// POST /movies
///
/// Create a movie. Admin only.
pub async fn insert_movie(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<MovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    require_admin(&user)?;

    let movie = state.movie_service.insert(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

/// PUT /movies/:id
///
/// Replace a movie's title and image. Admin only.
pub async fn update_movie(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(request): Json<MovieRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    require_admin(&user)?;

    let movie = state
        .movie_service
        .update(&MovieId(id), &request.into())
        .await?;
    Ok(Json(movie.into()))
}

/// DELETE /movies/:id
///
/// Delete a movie. Admin only. Movies that have been scored cannot be deleted.
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&user)?;

    state.movie_service.delete(&MovieId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
