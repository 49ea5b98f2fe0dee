//! Clipboard link monitor for tieba-link.
//!
//! Reads the clipboard on demand, recognises forum and thread links, and
//! publishes a [`PreviewInfo`](tieba_link_types::PreviewInfo) through a
//! `watch` channel: a placeholder first, then the enriched or failed preview.
//! Every scan runs through a [`SingleFlight`] runner so a newer scan cancels
//! an older one before it can publish.

pub mod config;
pub mod error;
pub mod monitor;
pub mod runner;
pub mod setup;
pub mod source;
pub mod state;

pub use config::Config;
pub use error::{MonitorError, PreviewError, Superseded};
pub use monitor::{CheckOutcome, ClipboardMonitor, MonitorEvent};
pub use runner::SingleFlight;
pub use source::{ForumDataSource, OfflineSource, ThreadDataSource};
pub use state::{FlightOutcome, FlightState};
