//! minipost - a small session-backed posts service
//!
//! The crate is split into a backend (HTTP API over axum, users and posts
//! in SQLite, sessions in a pluggable store) and a `client` module holding
//! the typed API client and the view-state a single-page frontend keeps.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod store;
