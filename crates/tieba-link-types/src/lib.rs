//! Shared types for tieba-link.
//!
//! This crate contains the types shared across the tieba-link workspace:
//! links detected on the clipboard, the preview state published to the UI,
//! and the preview payloads returned by forum/thread data sources.

pub mod link;
pub mod preview;

pub use link::ClipboardLink;
pub use preview::{ForumPreview, PreviewIcon, PreviewInfo, ThreadPreview};
