//! Per-request identity

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::ports::AuthenticatedUserProvider;
use crate::error::DomainError;

/// The user resolved by `auth_middleware`, scoped to a single request
#[derive(Debug, Clone)]
pub struct RequestUser {
    user: User,
}

impl RequestUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

#[async_trait]
impl AuthenticatedUserProvider for RequestUser {
    async fn current_user(&self) -> Result<User, DomainError> {
        Ok(self.user.clone())
    }
}
