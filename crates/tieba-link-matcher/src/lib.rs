//! Forum and thread link recognition for tieba-link.
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable state,
//! safe to call from any thread. Unrecognised input yields `None`, never an
//! error. The host allow-list is deliberately narrow; a missed link is
//! preferable to a preview for something that is not a forum or thread.

pub mod deep_link;
pub mod matcher;
pub mod route;

pub use deep_link::{parse_deep_link, DEEP_LINK_HOST, DEEP_LINK_SCHEME};
pub use matcher::{find_url, find_urls, is_tieba_host, parse_link, LinkMatcher, TIEBA_HOSTS};
pub use route::{is_baidu, is_http, is_login, route, LinkRoute};
