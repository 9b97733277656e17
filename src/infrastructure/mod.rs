//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - In-process TTL cache, key builders and sweeper
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod persistence;
