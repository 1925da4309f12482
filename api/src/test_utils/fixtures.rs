//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::auth::hash_api_key;
use crate::domain::entities::{Movie, MovieId, MovieInput, Role, Score, User, UserId};

pub const TEST_API_KEY: &str = "sk-test-client";
pub const TEST_ADMIN_API_KEY: &str = "sk-test-admin";

/// Movie 1, "Test Movie", unrated
pub fn test_movie() -> Movie {
    test_movie_with_id(1, "Test Movie")
}

/// An unrated movie with a specific id and title
pub fn test_movie_with_id(id: i64, title: &str) -> Movie {
    Movie {
        id: MovieId(id),
        title: title.to_string(),
        score: 0.0,
        count: 0,
        image: format!("https://img.dsmovie.test/{}.jpg", id),
        scores: vec![],
    }
}

/// A valid insert/update payload
pub fn test_movie_input() -> MovieInput {
    MovieInput {
        title: "The Witcher".to_string(),
        image: "https://img.dsmovie.test/the-witcher.jpg".to_string(),
    }
}

/// User 1, a client
pub fn test_user() -> User {
    test_user_with_id(1)
}

/// A client user with a specific id
pub fn test_user_with_id(id: i64) -> User {
    User {
        id: UserId(id),
        name: format!("user-{}", id),
        email: format!("user-{}@dsmovie.test", id),
        role: Role::Client,
        api_key_hash: hash_api_key(&format!("{}-{}", TEST_API_KEY, id)),
    }
}

/// A client user whose API key is `TEST_API_KEY`
pub fn test_client() -> User {
    User {
        api_key_hash: hash_api_key(TEST_API_KEY),
        ..test_user_with_id(10)
    }
}

/// An admin user whose API key is `TEST_ADMIN_API_KEY`
pub fn test_admin() -> User {
    User {
        id: UserId(99),
        name: "admin".to_string(),
        email: "admin@dsmovie.test".to_string(),
        role: Role::Admin,
        api_key_hash: hash_api_key(TEST_ADMIN_API_KEY),
    }
}

pub fn test_score(movie_id: MovieId, user_id: UserId, value: f64) -> Score {
    Score {
        movie_id,
        user_id,
        value,
    }
}
