//! Database layer
//!
//! SQLite via sqlx, for single-binary deployment. Repositories follow a
//! trait-based abstraction so services can be tested against in-memory
//! databases.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
