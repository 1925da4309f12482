//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod movie;
pub mod page;
pub mod score;
pub mod user;

pub use movie::{Movie, MovieId, MovieInput};
pub use page::{Page, PageRequest};
pub use score::{NewScore, Score};
pub use user::{Role, User, UserId};
