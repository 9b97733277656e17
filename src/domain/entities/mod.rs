//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A stored URL as returned by the persistent store
//! - [`NewUrl`] - Input for creating a record
//! - [`UrlView`], [`UrlPage`], [`Pagination`] - Rendered listing payloads
//! - [`UserStats`] - Per-user click summary
//!
//! Rendered payloads are what the cache holds for listings and stats, so they
//! carry the short URL already built from the record identifier.

pub mod listing;
pub mod url;

pub use listing::{Pagination, TopUrl, UrlPage, UrlView, UserStats};
pub use url::{GUEST_USER_ID, NewUrl, UrlRecord};
