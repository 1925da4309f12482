//! SeaORM entity definitions
//!
//! Table mappings used by the PostgreSQL adapters. Domain code never sees
//! these types directly.

pub mod movies;
pub mod scores;
pub mod users;
