//! Preview data sources.

use async_trait::async_trait;
use tieba_link_types::{ForumPreview, ThreadPreview};

use crate::error::PreviewError;

/// Loads forum data for a forum preview.
#[async_trait]
pub trait ForumDataSource: Send + Sync + 'static {
    async fn load_forum_preview(&self, forum_name: &str) -> Result<ForumPreview, PreviewError>;
}

/// Loads thread data for a thread preview.
#[async_trait]
pub trait ThreadDataSource: Send + Sync + 'static {
    async fn load_thread_preview(&self, thread_id: i64) -> Result<ThreadPreview, PreviewError>;
}

/// Data source for builds without a preview service; every load fails with
/// [`PreviewError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

#[async_trait]
impl ForumDataSource for OfflineSource {
    async fn load_forum_preview(&self, _forum_name: &str) -> Result<ForumPreview, PreviewError> {
        Err(PreviewError::Unavailable)
    }
}

#[async_trait]
impl ThreadDataSource for OfflineSource {
    async fn load_thread_preview(&self, _thread_id: i64) -> Result<ThreadPreview, PreviewError> {
        Err(PreviewError::Unavailable)
    }
}
