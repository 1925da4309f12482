//! Movie service
//!
//! Catalog lookups, paginated title search and movie CRUD.

use std::sync::Arc;

use crate::domain::entities::{Movie, MovieId, MovieInput, Page, PageRequest};
use crate::domain::ports::MovieRepository;
use crate::error::{AppError, DomainError};

/// Service for managing the movie catalog
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    movies: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(movies: Arc<MR>) -> Self {
        Self { movies }
    }

    /// Search movies by title (case-insensitive substring).
    /// An empty result is an empty page, not an error.
    pub async fn find_all(&self, title: &str, page: &PageRequest) -> Result<Page<Movie>, AppError> {
        let movies = self.movies.search_by_title(title.trim(), page).await?;
        if movies.is_empty() {
            tracing::debug!(title = %title, page = page.page, "No movies matched");
        }
        Ok(movies)
    }

    /// Find a movie by ID
    pub async fn find_by_id(&self, id: &MovieId) -> Result<Movie, AppError> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a new movie. Score and count start at zero.
    pub async fn insert(&self, input: &MovieInput) -> Result<Movie, AppError> {
        input.validate()?;

        let movie = self.movies.create(input).await?;
        tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");

        Ok(movie)
    }

    /// Update a movie's title and image.
    ///
    /// Existence is checked with a reference lookup rather than a full load.
    pub async fn update(&self, id: &MovieId, input: &MovieInput) -> Result<Movie, AppError> {
        input.validate()?;

        let mut movie = self.movies.get_reference(id).await.map_err(|e| match e {
            DomainError::NotFound(_) => not_found(id),
            e => AppError::Domain(e),
        })?;

        movie.apply(input);
        let movie = self.movies.save(&movie).await?;
        tracing::info!(movie_id = %movie.id, "Movie updated");

        Ok(movie)
    }

    /// Delete a movie.
    ///
    /// Fails with `NotFound` for unknown ids and `Conflict` while scores
    /// still reference the movie.
    pub async fn delete(&self, id: &MovieId) -> Result<(), AppError> {
        if !self.movies.exists_by_id(id).await? {
            return Err(not_found(id));
        }

        self.movies.delete_by_id(id).await.map_err(|e| {
            if let DomainError::Conflict(ref msg) = e {
                tracing::warn!(movie_id = %id, reason = %msg, "Movie delete blocked");
            }
            AppError::Domain(e)
        })?;
        tracing::info!(movie_id = %id, "Movie deleted");

        Ok(())
    }
}

fn not_found(id: &MovieId) -> AppError {
    AppError::Domain(DomainError::NotFound(format!("Movie {} not found", id)))
}
