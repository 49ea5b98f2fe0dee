//! In-memory clipboard backend for testing.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::{ClipboardError, ClipboardProvider};

/// Shared state for observing what `MockClipboard` did.
#[derive(Debug, Default)]
struct MockClipboardState {
    text: Option<String>,
    reads: usize,
    writes: Vec<String>,
    unavailable: bool,
}

/// Mock clipboard backend for testing.
#[derive(Default)]
pub struct MockClipboard {
    state: Arc<Mutex<MockClipboardState>>,
}

impl MockClipboard {
    /// Create an empty mock clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock clipboard already holding `text`.
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.handle().set(text);
        clipboard
    }

    /// Get a clonable handle for driving and observing the clipboard from tests.
    pub fn handle(&self) -> MockClipboardHandle {
        MockClipboardHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable handle for `MockClipboard`.
///
/// Tests use this to simulate the user copying text and to inspect reads
/// and writes made through the provider.
#[derive(Clone)]
pub struct MockClipboardHandle {
    state: Arc<Mutex<MockClipboardState>>,
}

impl MockClipboardHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, MockClipboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the user copying `text`.
    pub fn set(&self, text: &str) {
        self.lock().text = Some(text.to_string());
    }

    /// Simulate the user clearing the clipboard.
    pub fn clear(&self) {
        self.lock().text = None;
    }

    /// Make subsequent reads and writes fail with [`ClipboardError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Current clipboard text.
    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Number of reads made through the provider.
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    /// Every text written through the provider, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }
}

#[async_trait]
impl ClipboardProvider for MockClipboard {
    async fn get_text(&self) -> Result<Option<String>, ClipboardError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        state.reads += 1;
        Ok(state.text.clone())
    }

    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        state.text = Some(text.to_string());
        state.writes.push(text.to_string());
        Ok(())
    }
}
