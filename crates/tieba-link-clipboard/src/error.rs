//! Clipboard subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    AccessDenied,

    #[error("clipboard content is not text")]
    FormatUnavailable,

    #[error("clipboard not available on this platform")]
    Unavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
