//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod movie_repo;
pub mod score_repo;
pub mod user_repo;


pub use movie_repo::PostgresMovieRepository;
pub use score_repo::PostgresScoreRepository;
pub use user_repo::PostgresUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Translate a SeaORM error, surfacing integrity violations as conflicts
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
