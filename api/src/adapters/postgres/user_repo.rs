//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{Role, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Stored role name, falling back to the least privileged role when unknown
fn parse_role(user_id: i64, raw: &str) -> Role {
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!(
            user_id,
            role = %raw,
            error = %e,
            "Unknown role on user row, treating as client"
        );
        Role::Client
    })
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            role: parse_role(model.id, &model.role),
            name: model.name,
            email: model.email,
            api_key_hash: model.api_key_hash,
        }
    }
}
