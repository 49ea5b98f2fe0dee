//! Links detected in clipboard text or deep-link URIs.

use serde::{Deserialize, Serialize};

/// A recognised forum or thread link.
///
/// `url` is always an absolute http(s) URL. Deep links are normalised to
/// their web equivalent when constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClipboardLink {
    /// A forum, identified by its name.
    Forum { url: String, forum_name: String },
    /// A single thread, identified by its numeric id.
    Thread { url: String, thread_id: i64 },
}

impl ClipboardLink {
    /// Create a forum link.
    #[must_use]
    pub fn forum(url: impl Into<String>, forum_name: impl Into<String>) -> Self {
        Self::Forum {
            url: url.into(),
            forum_name: forum_name.into(),
        }
    }

    /// Create a thread link.
    #[must_use]
    pub fn thread(url: impl Into<String>, thread_id: i64) -> Self {
        Self::Thread {
            url: url.into(),
            thread_id,
        }
    }

    /// The web URL of the link.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Forum { url, .. } | Self::Thread { url, .. } => url,
        }
    }

    /// Short label shown before any preview data is available.
    ///
    /// Forum links are labelled by forum name, thread links by URL.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Forum { forum_name, .. } => forum_name,
            Self::Thread { url, .. } => url,
        }
    }
}

impl std::fmt::Display for ClipboardLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forum { forum_name, .. } => write!(f, "forum '{forum_name}'"),
            Self::Thread { thread_id, .. } => write!(f, "thread {thread_id}"),
        }
    }
}
