//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect resolution decodes the short code and finds the destination
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] increments the counter with retry
//! 4. Click counts are always read back from the store, never from the cache

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
