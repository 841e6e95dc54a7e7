//! Data access repositories

pub mod post;
pub mod user;

pub use post::{PostRepository, SqlxPostRepository};
pub use user::{SqlxUserRepository, UserRepository};
