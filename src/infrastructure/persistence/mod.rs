//! URL repository implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL via SQLx with bound parameters
//! - [`InMemoryUrlRepository`] - DashMap-backed store for tests and local runs

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
