//! Clipboard monitor orchestration.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tieba_link_clipboard::{ClipboardProvider, ThrottledClipboard};
use tieba_link_matcher::LinkMatcher;
use tieba_link_types::{ClipboardLink, PreviewInfo};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{MonitorError, PreviewError, Superseded};
use crate::runner::SingleFlight;
use crate::source::{ForumDataSource, ThreadDataSource};

/// Events processed by [`ClipboardMonitor::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Scan the clipboard now (e.g. the app came to the foreground).
    Check,
    /// The app itself copied this link; do not preview it.
    CopiedLink(String),
    /// The user dismissed the preview.
    Dismiss,
    /// Stop the loop.
    Shutdown,
}

/// What a single [`ClipboardMonitor::check_clipboard`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No readable text, or the text was too large.
    Skipped,
    /// Same text as last time; nothing done.
    Unchanged,
    /// Text had no recognised link; preview cleared.
    NoLink,
    /// Link found and the enriched preview published.
    Enriched(ClipboardLink),
    /// Link found but enrichment failed; error preview published.
    Failed(ClipboardLink),
    /// A newer check or a clear cancelled this one.
    Superseded,
}

struct Inner {
    clipboard: Arc<dyn ClipboardProvider>,
    forums: Arc<dyn ForumDataSource>,
    threads: Arc<dyn ThreadDataSource>,
    matcher: Arc<LinkMatcher>,
    runner: SingleFlight,
    /// Hash of the last clipboard text examined, if any.
    last_hash: Mutex<Option<u64>>,
    preview: watch::Sender<Option<PreviewInfo>>,
    link_subtitle: String,
    max_text_len: usize,
}

/// Watches the clipboard for forum and thread links and publishes previews.
///
/// Cheap to clone; clones share the same state and preview channel.
#[derive(Clone)]
pub struct ClipboardMonitor {
    inner: Arc<Inner>,
}

impl ClipboardMonitor {
    /// Create a monitor.
    ///
    /// The clipboard is wrapped in a [`ThrottledClipboard`] when
    /// `monitor.min_read_interval_ms` is non-zero.
    pub fn new<P: ClipboardProvider>(
        config: &Config,
        clipboard: P,
        forums: Arc<dyn ForumDataSource>,
        threads: Arc<dyn ThreadDataSource>,
    ) -> Self {
        let min_read_interval = config.monitor.min_read_interval();
        let clipboard: Arc<dyn ClipboardProvider> = if min_read_interval.is_zero() {
            Arc::new(clipboard)
        } else {
            Arc::new(ThrottledClipboard::new(clipboard, min_read_interval))
        };
        let (preview, _) = watch::channel(None);

        Self {
            inner: Arc::new(Inner {
                clipboard,
                forums,
                threads,
                matcher: Arc::new(LinkMatcher::with_extra_hosts(
                    config.matcher.extra_hosts.iter().cloned(),
                )),
                runner: SingleFlight::new(),
                last_hash: Mutex::new(None),
                preview,
                link_subtitle: config.preview.link_subtitle.clone(),
                max_text_len: config.monitor.max_text_len,
            }),
        }
    }

    /// Subscribe to preview changes. The receiver sees the current value
    /// immediately.
    pub fn subscribe(&self) -> watch::Receiver<Option<PreviewInfo>> {
        self.inner.preview.subscribe()
    }

    /// The current preview.
    pub fn preview(&self) -> Option<PreviewInfo> {
        self.inner.preview.borrow().clone()
    }

    /// The single-flight runner scans go through.
    pub fn runner(&self) -> &SingleFlight {
        &self.inner.runner
    }

    /// Read the clipboard and, if the text is new, scan and enrich it.
    ///
    /// Resolves once this scan has published its final preview, or been
    /// superseded.
    pub async fn check_clipboard(&self) -> CheckOutcome {
        let text = match self.inner.clipboard.get_text().await {
            Ok(Some(text)) => text,
            Ok(None) => return CheckOutcome::Skipped,
            Err(e) => {
                debug!(error = %e, "clipboard read failed");
                return CheckOutcome::Skipped;
            }
        };
        if text.len() > self.inner.max_text_len {
            debug!(
                size = text.len(),
                max = self.inner.max_text_len,
                "ignoring oversized clipboard text"
            );
            return CheckOutcome::Skipped;
        }

        let hash = text_hash(&text);
        if self.inner.last_hash() == Some(hash) {
            debug!("clipboard unchanged");
            return CheckOutcome::Unchanged;
        }

        let inner = Arc::clone(&self.inner);
        match self.inner.runner.run_exclusive(scan(inner, text, hash)).await {
            Ok(outcome) => outcome,
            Err(Superseded) => CheckOutcome::Superseded,
        }
    }

    /// The app placed `link` on the clipboard itself: drop any preview and
    /// treat that text as already seen.
    pub async fn on_copy_tieba_link(&self, link: &str) {
        self.clear().await;
        self.inner.remember(text_hash(link));
        debug!(link, "recorded app-copied link");
    }

    /// Copy `link` to the clipboard without triggering a preview for it.
    pub async fn copy_link(&self, link: &str) -> Result<(), MonitorError> {
        self.inner.clipboard.set_text(link).await?;
        self.on_copy_tieba_link(link).await;
        Ok(())
    }

    /// Cancel any scan in flight and clear the preview.
    pub async fn clear(&self) {
        self.inner.runner.cancel_current().await;
        self.inner.publish(None);
    }

    /// Process `events` (and a periodic check every `poll_interval`, if set)
    /// until [`MonitorEvent::Shutdown`] or the sender is dropped.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<MonitorEvent>,
        poll_interval: Option<Duration>,
    ) {
        let mut ticker = poll_interval.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        let mut checks = JoinSet::new();
        info!(poll_interval = ?poll_interval, "clipboard monitor running");

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(MonitorEvent::Check) => self.spawn_check(&mut checks),
                        Some(MonitorEvent::CopiedLink(link)) => {
                            abort_checks(&mut checks).await;
                            self.on_copy_tieba_link(&link).await;
                        }
                        Some(MonitorEvent::Dismiss) => {
                            abort_checks(&mut checks).await;
                            self.clear().await;
                        }
                        Some(MonitorEvent::Shutdown) | None => break,
                    }
                }
                () = tick(&mut ticker) => self.spawn_check(&mut checks),
                Some(joined) = checks.join_next(), if !checks.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            warn!(error = %e, "clipboard check panicked");
                        }
                    }
                }
            }
        }

        abort_checks(&mut checks).await;
        self.inner.runner.cancel_current().await;
        info!("clipboard monitor stopped");
    }

    fn spawn_check(&self, checks: &mut JoinSet<()>) {
        let monitor = self.clone();
        checks.spawn(async move {
            let outcome = monitor.check_clipboard().await;
            debug!(?outcome, "clipboard check finished");
        });
    }
}

impl Inner {
    fn last_hash(&self) -> Option<u64> {
        *self.last_hash.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remember(&self, hash: u64) {
        *self.last_hash.lock().unwrap_or_else(PoisonError::into_inner) = Some(hash);
    }

    fn publish(&self, preview: Option<PreviewInfo>) {
        self.preview.send_replace(preview);
    }

    async fn enrich(&self, link: &ClipboardLink) -> Result<PreviewInfo, PreviewError> {
        match link {
            ClipboardLink::Forum { forum_name, .. } => {
                let forum = self.forums.load_forum_preview(forum_name).await?;
                Ok(PreviewInfo::forum(link.clone(), forum))
            }
            ClipboardLink::Thread { thread_id, .. } => {
                let thread = self.threads.load_thread_preview(*thread_id).await?;
                Ok(PreviewInfo::thread(link.clone(), thread))
            }
        }
    }
}

/// One scan, run inside the single-flight runner.
async fn scan(inner: Arc<Inner>, text: String, hash: u64) -> CheckOutcome {
    let matcher = Arc::clone(&inner.matcher);
    let link = match tokio::task::spawn_blocking(move || matcher.detect(&text)).await {
        Ok(link) => link,
        Err(e) => {
            warn!(error = %e, "link matching failed");
            None
        }
    };
    // Recorded before enrichment so a slow fetch does not cause a rescan.
    inner.remember(hash);

    let Some(link) = link else {
        debug!("no link on clipboard");
        inner.publish(None);
        return CheckOutcome::NoLink;
    };

    info!(link = %link, url = link.url(), "link detected on clipboard");
    inner.publish(Some(PreviewInfo::placeholder(
        link.clone(),
        &inner.link_subtitle,
    )));

    match inner.enrich(&link).await {
        Ok(preview) => {
            inner.publish(Some(preview));
            CheckOutcome::Enriched(link)
        }
        Err(e) => {
            warn!(link = %link, error = %e, "preview enrichment failed");
            inner.publish(Some(PreviewInfo::failed(link.clone(), e.to_string())));
            CheckOutcome::Failed(link)
        }
    }
}

/// Abort queued or running checks and wait until none is left, so a check
/// issued before a dismiss cannot publish after it.
async fn abort_checks(checks: &mut JoinSet<()>) {
    checks.abort_all();
    while checks.join_next().await.is_some() {}
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn text_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_hash_is_stable_within_process() {
        assert_eq!(text_hash("abc"), text_hash("abc"));
        assert_ne!(text_hash("abc"), text_hash("abd"));
    }
}
