//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the shared cache, and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - URL creation, redirects, listings and stats

pub mod services;
