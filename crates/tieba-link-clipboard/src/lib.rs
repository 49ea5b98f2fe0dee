//! Clipboard text access for tieba-link.
//!
//! Defines the [`ClipboardProvider`] trait for platform clipboard access,
//! a [`ThrottledClipboard`] wrapper limiting how often the platform is read,
//! and backends: arboard (feature `system`) and an in-memory mock (feature
//! `mock`).

use async_trait::async_trait;

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
#[cfg(feature = "system")]
pub mod system;
pub mod throttle;

pub use error::ClipboardError;
#[cfg(feature = "system")]
pub use system::SystemClipboard;
pub use throttle::ThrottledClipboard;

/// Platform clipboard text access.
#[async_trait]
pub trait ClipboardProvider: Send + Sync + 'static {
    /// Current clipboard text, or `None` when the clipboard is empty or
    /// holds something other than text.
    async fn get_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard content with `text`.
    async fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
