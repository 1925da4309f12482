//! Authentication
//!
//! Resolves the calling user from a bearer API key and exposes it to the
//! application layer as an `AuthenticatedUserProvider`.

pub mod api_key;
pub mod request_user;

pub use api_key::{auth_middleware, hash_api_key};
pub use request_user::RequestUser;
