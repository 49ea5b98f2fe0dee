//! Preview state for the most recently detected link.

use serde::{Deserialize, Serialize};

use crate::link::ClipboardLink;

/// Icon shown next to a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum PreviewIcon {
    /// Generic link icon, used while loading.
    Link,
    /// Generic error icon, used when enrichment failed.
    Error,
    /// Remote image (forum avatar, author portrait).
    Url(String),
}

/// Forum data used to enrich a forum preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPreview {
    pub title: String,
    #[serde(default)]
    pub avatar_icon_url: Option<String>,
    #[serde(default)]
    pub slogan: Option<String>,
}

/// Thread data used to enrich a thread preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadPreview {
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub forum_name: Option<String>,
    #[serde(default)]
    pub reply_count: Option<u32>,
    #[serde(default)]
    pub author_avatar_url: Option<String>,
}

/// Best-known preview of a detected link.
///
/// Always replaced as a whole value: placeholder, then enriched or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewInfo {
    pub link: ClipboardLink,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub icon: Option<PreviewIcon>,
}

impl PreviewInfo {
    /// Loading placeholder shown before any network I/O completes.
    #[must_use]
    pub fn placeholder(link: ClipboardLink, link_subtitle: &str) -> Self {
        Self {
            title: Some(link.label().to_string()),
            subtitle: Some(link_subtitle.to_string()),
            icon: Some(PreviewIcon::Link),
            link,
        }
    }

    /// Preview enriched with forum data.
    #[must_use]
    pub fn forum(link: ClipboardLink, forum: ForumPreview) -> Self {
        let title = if forum.title.is_empty() {
            link.label().to_string()
        } else {
            forum.title
        };
        Self {
            title: Some(title),
            subtitle: forum.slogan.filter(|s| !s.is_empty()),
            icon: Some(
                forum
                    .avatar_icon_url
                    .map_or(PreviewIcon::Link, PreviewIcon::Url),
            ),
            link,
        }
    }

    /// Preview enriched with thread data.
    ///
    /// The subtitle is the snippet when there is one, otherwise a
    /// "forum · replies" summary.
    #[must_use]
    pub fn thread(link: ClipboardLink, thread: ThreadPreview) -> Self {
        let subtitle = match thread.snippet.filter(|s| !s.trim().is_empty()) {
            Some(snippet) => Some(snippet),
            None => match (thread.forum_name, thread.reply_count) {
                (Some(forum), Some(replies)) => Some(format!("{forum} · {replies} replies")),
                (Some(forum), None) => Some(forum),
                (None, Some(replies)) => Some(format!("{replies} replies")),
                (None, None) => None,
            },
        };
        Self {
            title: Some(thread.title),
            subtitle,
            icon: Some(
                thread
                    .author_avatar_url
                    .map_or(PreviewIcon::Link, PreviewIcon::Url),
            ),
            link,
        }
    }

    /// Error-flavoured preview: keeps the link label, shows the message.
    #[must_use]
    pub fn failed(link: ClipboardLink, message: impl Into<String>) -> Self {
        Self {
            title: Some(link.label().to_string()),
            subtitle: Some(message.into()),
            icon: Some(PreviewIcon::Error),
            link,
        }
    }

    /// Whether this is an error preview.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.icon == Some(PreviewIcon::Error)
    }
}
