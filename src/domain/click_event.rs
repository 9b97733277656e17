//! Click event model for asynchronous click tracking.

/// A redirect that should be counted against a URL record.
///
/// Redirect resolution sends one event per visit to the click worker through
/// a bounded channel, so the HTTP response never waits on the counter
/// update. Counting happens in the store only; the single-URL cache entry is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub url_id: i64,
}

impl ClickEvent {
    pub fn new(url_id: i64) -> Self {
        Self { url_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new(42);
        assert_eq!(event.url_id, 42);
    }
}
