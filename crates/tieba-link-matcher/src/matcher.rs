//! URL extraction and forum/thread classification.

use std::sync::OnceLock;

use regex::Regex;
use tieba_link_types::ClipboardLink;
use url::Url;

/// Hosts serving forum and thread pages.
pub const TIEBA_HOSTS: &[&str] = &["tieba.baidu.com", "wapp.baidu.com", "tiebac.baidu.com"];

/// Paths that carry a forum name (`kw`/`word`) or thread id (`kz`) as query.
const QUERY_PATHS: &[&str] = &["/f", "/mo/q/m"];

/// Scheme, host or IPv4 address, optional port, optional path and query.
///
/// Path and query are printable ASCII only, so text written directly after a
/// link is not swallowed into it. Non-ASCII forum names must be
/// percent-encoded to be recognised.
const URL_PATTERN: &str = r"https?://(?:[a-zA-Z0-9._-]+\.[a-zA-Z]{2,6}|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?::[0-9]{1,5})?(?:/[\x2F-\x7E&%.\-]*)?";

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static BUILTIN: OnceLock<LinkMatcher> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"))
}

/// Iterate over every URL-shaped substring of `text`, in order.
pub fn find_urls(text: &str) -> impl Iterator<Item = &str> {
    url_regex().find_iter(text).map(|m| m.as_str())
}

/// First URL-shaped substring of `text`, if any.
pub fn find_url(text: &str) -> Option<&str> {
    url_regex().find(text).map(|m| m.as_str())
}

/// Classify `url` using the built-in host allow-list.
pub fn parse_link(url: &str) -> Option<ClipboardLink> {
    LinkMatcher::builtin().parse_link(url)
}

/// Whether `host` is one of the built-in forum hosts (case-insensitive).
pub fn is_tieba_host(host: &str) -> bool {
    TIEBA_HOSTS.iter().any(|h| h.eq_ignore_ascii_case(host))
}

/// Link classifier with a configurable host allow-list.
#[derive(Debug, Clone)]
pub struct LinkMatcher {
    hosts: Vec<String>,
}

impl Default for LinkMatcher {
    fn default() -> Self {
        Self::with_extra_hosts(std::iter::empty::<String>())
    }
}

impl LinkMatcher {
    /// Shared matcher using only [`TIEBA_HOSTS`].
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(Self::default)
    }

    /// Matcher accepting [`TIEBA_HOSTS`] plus `extra`.
    pub fn with_extra_hosts<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut hosts: Vec<String> = TIEBA_HOSTS.iter().map(ToString::to_string).collect();
        for host in extra {
            let host = host.into().trim().to_ascii_lowercase();
            if !host.is_empty() && !hosts.contains(&host) {
                hosts.push(host);
            }
        }
        Self { hosts }
    }

    /// The accepted hosts, lowercase.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Whether `host` is on this matcher's allow-list.
    pub fn accepts_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    /// Find the first URL in `text` that classifies as a forum or thread.
    pub fn detect(&self, text: &str) -> Option<ClipboardLink> {
        find_urls(text).find_map(|url| self.parse_link(url))
    }

    /// Classify an http(s) URL.
    ///
    /// Forum names take precedence over thread ids when both are present.
    pub fn parse_link(&self, url: &str) -> Option<ClipboardLink> {
        let parsed = Url::parse(url).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        if !self.accepts_host(parsed.host_str()?) {
            return None;
        }

        if let Some(forum_name) = forum_name(&parsed) {
            return Some(ClipboardLink::forum(url, forum_name));
        }
        thread_id(&parsed).map(|id| ClipboardLink::thread(url, id))
    }
}

fn is_query_path(path: &str) -> bool {
    QUERY_PATHS.iter().any(|p| p.eq_ignore_ascii_case(path))
}

/// First non-empty, decoded value of query parameter `key`.
pub(crate) fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

fn forum_name(url: &Url) -> Option<String> {
    if !is_query_path(url.path()) {
        return None;
    }
    query_value(url, "kw").or_else(|| query_value(url, "word"))
}

fn thread_id(url: &Url) -> Option<i64> {
    let path = url.path();
    let raw = if is_query_path(path) {
        query_value(url, "kz")?
    } else {
        path.strip_prefix("/p/")?.to_string()
    };
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
