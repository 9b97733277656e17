//! Helpers shared across layers.

pub mod short_code;
