//! Monitor errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] tieba_link_clipboard::ClipboardError),
}

/// Failure to load preview data for a detected link.
///
/// The `Display` text is shown to the user in the error preview.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("preview service not configured")]
    Unavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Returned to a caller whose run was cancelled by a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("superseded by a newer run")]
pub struct Superseded;
