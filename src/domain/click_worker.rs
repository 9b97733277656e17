//! Background worker applying click events to the store.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Attempts per event, counting the first try.
const MAX_ATTEMPTS: usize = 3;

/// Drains `rx`, incrementing the click counter of each event's URL.
///
/// Failed increments are retried with jittered exponential backoff. An event
/// that still fails is logged and dropped. Returns when every sender is gone.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: UrlRepository + ?Sized,
{
    info!("Click worker running");

    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let result = Retry::spawn(strategy, || repository.increment_clicks(event.url_id)).await;

        match result {
            Ok(true) => debug!(url_id = event.url_id, "Click recorded"),
            Ok(false) => debug!(url_id = event.url_id, "Click for deleted URL ignored"),
            Err(e) => error!(url_id = event.url_id, error = %e, "Failed to record click"),
        }
    }

    info!("Click channel closed, worker stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|id| *id == 7)
            .times(2)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new(7)).await.unwrap();
        tx.send(ClickEvent::new(7)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);

        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(true)
            }
        });

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new(1)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_attempts() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new(1)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }
}
