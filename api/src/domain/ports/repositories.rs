//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Movie, MovieId, MovieInput, Page, PageRequest, Score, User,
};
use crate::error::DomainError;

/// Repository for Movie entities
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Case-insensitive substring search on title, one page at a time.
    /// Results come back without their score collections.
    async fn search_by_title(
        &self,
        title: &str,
        page: &PageRequest,
    ) -> Result<Page<Movie>, DomainError>;

    /// Load a movie together with all of its scores
    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError>;

    /// Fetch a handle to a movie for mutation without loading its scores.
    ///
    /// Fails with `NotFound` when the movie does not exist.
    async fn get_reference(&self, id: &MovieId) -> Result<Movie, DomainError>;

    /// Check whether a movie exists
    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, DomainError>;

    /// Create a new movie with no scores. The store assigns the id.
    async fn create(&self, movie: &MovieInput) -> Result<Movie, DomainError>;

    /// Persist the movie's own columns (title, image, score, count).
    /// The score collection is written through `ScoreRepository`.
    async fn save(&self, movie: &Movie) -> Result<Movie, DomainError>;

    /// Delete a movie.
    ///
    /// Fails with `Conflict` when other records still reference it.
    async fn delete_by_id(&self, id: &MovieId) -> Result<(), DomainError>;
}

/// Repository for Score entities
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert or overwrite the score keyed by (movie, user), then recompute the
    /// owning movie's score and count from every stored score.
    ///
    /// Both writes commit together or not at all. Fails with `NotFound` when
    /// the movie does not exist.
    async fn upsert(&self, score: &Score) -> Result<Score, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;
}
