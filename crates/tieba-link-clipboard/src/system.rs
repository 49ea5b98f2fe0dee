//! System clipboard backend built on arboard.

use async_trait::async_trait;
use tracing::debug;

use crate::{ClipboardError, ClipboardProvider};

/// The platform clipboard.
///
/// arboard calls block, so each access runs on the blocking thread pool with
/// a fresh `arboard::Clipboard` handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a system clipboard provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardProvider for SystemClipboard {
    async fn get_text(&self) -> Result<Option<String>, ClipboardError> {
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new().map_err(map_error)?;
            match clipboard.get_text() {
                Ok(text) => Ok(Some(text)),
                Err(arboard::Error::ContentNotAvailable) => {
                    debug!("clipboard holds no text");
                    Ok(None)
                }
                Err(e) => Err(map_error(e)),
            }
        })
        .await
        .map_err(|e| ClipboardError::Other(e.into()))?
    }

    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(map_error)?;
            clipboard.set_text(text).map_err(map_error)
        })
        .await
        .map_err(|e| ClipboardError::Other(e.into()))?
    }
}

fn map_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ContentNotAvailable | arboard::Error::ConversionFailure => {
            ClipboardError::FormatUnavailable
        }
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable,
        arboard::Error::ClipboardOccupied => ClipboardError::AccessDenied,
        other => ClipboardError::Other(anyhow::Error::new(other)),
    }
}
