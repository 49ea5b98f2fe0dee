//! Read throttling for clipboard providers.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use crate::{ClipboardError, ClipboardProvider};

/// Wraps a provider so the platform clipboard is read at most once per
/// `min_interval`. Reads inside the window report no text.
///
/// Writes are never throttled.
pub struct ThrottledClipboard<P> {
    inner: P,
    min_interval: Duration,
    last_read: Mutex<Option<Instant>>,
}

impl<P: ClipboardProvider> ThrottledClipboard<P> {
    /// Throttle `inner` to one read per `min_interval`.
    pub fn new(inner: P, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_read: Mutex::new(None),
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut last_read = self.last_read.lock().unwrap_or_else(PoisonError::into_inner);
        match *last_read {
            Some(at) if now.duration_since(at) < self.min_interval => false,
            _ => {
                *last_read = Some(now);
                true
            }
        }
    }
}

#[async_trait]
impl<P: ClipboardProvider> ClipboardProvider for ThrottledClipboard<P> {
    async fn get_text(&self) -> Result<Option<String>, ClipboardError> {
        if !self.try_acquire() {
            debug!(interval = ?self.min_interval, "clipboard read throttled");
            return Ok(None);
        }
        self.inner.get_text().await
    }

    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockClipboard;

    #[tokio::test(start_paused = true)]
    async fn reads_are_throttled() {
        let mock = MockClipboard::with_text("hello");
        let handle = mock.handle();
        let clipboard = ThrottledClipboard::new(mock, Duration::from_secs(10));

        assert_eq!(clipboard.get_text().await.unwrap().as_deref(), Some("hello"));
        assert_eq!(clipboard.get_text().await.unwrap(), None);
        assert_eq!(handle.read_count(), 1);

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(clipboard.get_text().await.unwrap().as_deref(), Some("hello"));
        assert_eq!(handle.read_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_throttles() {
        let mock = MockClipboard::with_text("a");
        let handle = mock.handle();
        let clipboard = ThrottledClipboard::new(mock, Duration::ZERO);

        for _ in 0..3 {
            assert!(clipboard.get_text().await.unwrap().is_some());
        }
        assert_eq!(handle.read_count(), 3);
    }

    #[tokio::test]
    async fn writes_pass_through() {
        let mock = MockClipboard::new();
        let handle = mock.handle();
        let clipboard = ThrottledClipboard::new(mock, Duration::from_secs(60));

        clipboard.set_text("copied").await.unwrap();
        assert_eq!(handle.text().as_deref(), Some("copied"));
        assert_eq!(handle.writes(), vec!["copied".to_string()]);
    }
}
