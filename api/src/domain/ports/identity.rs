//! Identity port
//!
//! Resolves the user on whose behalf the current request runs.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::error::DomainError;

/// Source of the authenticated caller for the current request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthenticatedUserProvider: Send + Sync {
    /// The user making the current request
    async fn current_user(&self) -> Result<User, DomainError>;
}
