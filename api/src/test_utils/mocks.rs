//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Movie, MovieId, MovieInput, Page, PageRequest, Score, User, UserId,
};
use crate::domain::ports::{MovieRepository, ScoreRepository, UserRepository};
use crate::error::DomainError;

fn mock_failure() -> DomainError {
    DomainError::Database("Mock failure".to_string())
}

// ============================================================================
// In-Memory Movie Repository
// ============================================================================

/// Movies and their scores. Scores live in a list shared with
/// `InMemoryScoreRepository`, the way rows in a separate table would.
#[derive(Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<BTreeMap<MovieId, Movie>>>,
    scores: Arc<RwLock<Vec<Score>>>,
    calls: Arc<RwLock<Vec<&'static str>>>,
    deleted: Arc<RwLock<Vec<MovieId>>>,
    should_fail: bool,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a database error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a movie (and any scores it carries)
    pub fn with_movie(self, mut movie: Movie) -> Self {
        self.scores.write().unwrap().append(&mut movie.scores);
        self.movies.write().unwrap().insert(movie.id, movie);
        self
    }

    /// Pre-populate with a score row
    pub fn with_score(self, score: Score) -> Self {
        upsert_into(&mut self.scores.write().unwrap(), &score);
        self
    }

    /// A score repository writing to the same score rows
    pub fn score_repository(&self) -> InMemoryScoreRepository {
        InMemoryScoreRepository {
            movies: self.movies.clone(),
            scores: self.scores.clone(),
            upserted: Arc::default(),
            should_fail: false,
        }
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.movies.read().unwrap().contains_key(id)
    }

    /// Number of times the named port method was called
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| **c == method)
            .count()
    }

    /// Ids passed to `delete_by_id`, in call order
    pub fn deleted_ids(&self) -> Vec<MovieId> {
        self.deleted.read().unwrap().clone()
    }

    fn record(&self, method: &'static str) -> Result<(), DomainError> {
        self.calls.write().unwrap().push(method);
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn search_by_title(
        &self,
        title: &str,
        page: &PageRequest,
    ) -> Result<Page<Movie>, DomainError> {
        self.record("search_by_title")?;

        let needle = title.to_lowercase();
        let movies = self.movies.read().unwrap();
        let matching: Vec<&Movie> = movies
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect();

        let total = matching.len() as u64;
        if page.is_beyond(total) {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let content = matching
            .iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .map(|m| (*m).clone())
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError> {
        self.record("find_by_id")?;

        let movies = self.movies.read().unwrap();
        let Some(movie) = movies.get(id) else {
            return Ok(None);
        };

        let mut scores: Vec<Score> = self
            .scores
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.movie_id == *id)
            .cloned()
            .collect();
        scores.sort_by_key(|s| s.user_id);

        Ok(Some(Movie {
            scores,
            ..movie.clone()
        }))
    }

    async fn get_reference(&self, id: &MovieId) -> Result<Movie, DomainError> {
        self.record("get_reference")?;

        self.movies
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Movie {} not found", id)))
    }

    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, DomainError> {
        self.record("exists_by_id")?;
        Ok(self.contains(id))
    }

    async fn create(&self, input: &MovieInput) -> Result<Movie, DomainError> {
        self.record("create")?;

        let mut movies = self.movies.write().unwrap();
        let next_id = movies.keys().next_back().map_or(1, |id| id.0 + 1);
        let movie = Movie {
            id: MovieId(next_id),
            title: input.title.clone(),
            score: 0.0,
            count: 0,
            image: input.image.clone(),
            scores: vec![],
        };
        movies.insert(movie.id, movie.clone());

        Ok(movie)
    }

    async fn save(&self, movie: &Movie) -> Result<Movie, DomainError> {
        self.record("save")?;

        let mut movies = self.movies.write().unwrap();
        let Some(stored) = movies.get_mut(&movie.id) else {
            return Err(DomainError::NotFound(format!("Movie {} not found", movie.id)));
        };
        *stored = Movie {
            scores: vec![],
            ..movie.clone()
        };

        Ok(movie.clone())
    }

    async fn delete_by_id(&self, id: &MovieId) -> Result<(), DomainError> {
        self.record("delete_by_id")?;
        self.deleted.write().unwrap().push(*id);

        if self.scores.read().unwrap().iter().any(|s| s.movie_id == *id) {
            return Err(DomainError::Conflict(format!(
                "Movie {} is still referenced by scores",
                id
            )));
        }

        match self.movies.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Movie {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Score Repository
// ============================================================================

/// Score rows plus the movies whose aggregates they feed. Built from
/// `InMemoryMovieRepository::score_repository`.
#[derive(Clone)]
pub struct InMemoryScoreRepository {
    movies: Arc<RwLock<BTreeMap<MovieId, Movie>>>,
    scores: Arc<RwLock<Vec<Score>>>,
    upserted: Arc<RwLock<Vec<Score>>>,
    should_fail: bool,
}

impl InMemoryScoreRepository {
    /// Every upsert fails with a database error and writes nothing
    pub fn failing(self) -> Self {
        Self {
            should_fail: true,
            ..self
        }
    }

    /// Scores passed to `upsert`, in call order
    pub fn upserted(&self) -> Vec<Score> {
        self.upserted.read().unwrap().clone()
    }

    /// Current score rows
    pub fn all(&self) -> Vec<Score> {
        self.scores.read().unwrap().clone()
    }
}

fn upsert_into(scores: &mut Vec<Score>, score: &Score) {
    match scores
        .iter_mut()
        .find(|s| s.movie_id == score.movie_id && s.user_id == score.user_id)
    {
        Some(existing) => existing.value = score.value,
        None => scores.push(score.clone()),
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn upsert(&self, score: &Score) -> Result<Score, DomainError> {
        self.upserted.write().unwrap().push(score.clone());
        if self.should_fail {
            return Err(mock_failure());
        }

        // Both locks held for the whole write, like one transaction
        let mut movies = self.movies.write().unwrap();
        let mut scores = self.scores.write().unwrap();
        let Some(movie) = movies.get_mut(&score.movie_id) else {
            return Err(DomainError::NotFound(format!(
                "Movie {} not found",
                score.movie_id
            )));
        };

        upsert_into(&mut scores, score);
        movie.scores = scores
            .iter()
            .filter(|s| s.movie_id == score.movie_id)
            .cloned()
            .collect();
        movie.recompute_score();
        movie.scores.clear();

        Ok(score.clone())
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.api_key_hash == hash)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_movie, test_score, test_user};

    #[tokio::test]
    async fn score_repository_shares_rows_with_movie_repository() {
        let movies = InMemoryMovieRepository::new().with_movie(test_movie());
        let scores = movies.score_repository();
        let user = test_user();

        scores
            .upsert(&test_score(MovieId(1), user.id, 2.0))
            .await
            .unwrap();
        scores
            .upsert(&test_score(MovieId(1), user.id, 4.0))
            .await
            .unwrap();

        let movie = movies.find_by_id(&MovieId(1)).await.unwrap().unwrap();
        assert_eq!(movie.scores, vec![test_score(MovieId(1), user.id, 4.0)]);
        assert_eq!(scores.upserted().len(), 2);
        assert_eq!(scores.all().len(), 1);
    }

    #[tokio::test]
    async fn score_upsert_refreshes_movie_aggregate() {
        let movies = InMemoryMovieRepository::new().with_movie(test_movie());
        let scores = movies.score_repository();

        scores
            .upsert(&test_score(MovieId(1), UserId(1), 2.0))
            .await
            .unwrap();
        scores
            .upsert(&test_score(MovieId(1), UserId(2), 5.0))
            .await
            .unwrap();

        let movie = movies.get_reference(&MovieId(1)).await.unwrap();
        assert_eq!(movie.score, 3.5);
        assert_eq!(movie.count, 2);
    }

    #[tokio::test]
    async fn score_upsert_for_missing_movie_writes_nothing() {
        let movies = InMemoryMovieRepository::new();
        let scores = movies.score_repository();

        let err = scores
            .upsert(&test_score(MovieId(7), UserId(1), 2.0))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(scores.all().is_empty());
    }
}
