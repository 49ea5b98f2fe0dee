//! App deep links (`com.baidu.tieba://unidispatch/...`).

use tieba_link_types::ClipboardLink;
use url::Url;

use crate::matcher::{query_value, LinkMatcher};

/// Scheme of app deep links.
pub const DEEP_LINK_SCHEME: &str = "com.baidu.tieba";

/// Host of app deep links.
pub const DEEP_LINK_HOST: &str = "unidispatch";

const FORUM_BASE: &str = "https://tieba.baidu.com/f";
const THREAD_BASE: &str = "https://tieba.baidu.com/p/";

/// Classify a deep link using the built-in host allow-list.
pub fn parse_deep_link(uri: &str) -> Option<ClipboardLink> {
    LinkMatcher::builtin().parse_deep_link(uri)
}

impl LinkMatcher {
    /// Classify a deep link.
    ///
    /// `/frs?kw=<name>` maps to a forum and `/pb?tid=<id>` to a thread, both
    /// rewritten to their web URL. Plain http(s) URIs fall back to
    /// [`LinkMatcher::parse_link`]; any other scheme, host or path is `None`.
    pub fn parse_deep_link(&self, uri: &str) -> Option<ClipboardLink> {
        let parsed = Url::parse(uri).ok()?;
        match parsed.scheme() {
            "http" | "https" => return self.parse_link(uri),
            DEEP_LINK_SCHEME => {}
            _ => return None,
        }
        if parsed.host_str() != Some(DEEP_LINK_HOST) {
            return None;
        }

        match parsed.path().to_ascii_lowercase().as_str() {
            "/frs" => {
                let forum_name = query_value(&parsed, "kw")?;
                let url = Url::parse_with_params(FORUM_BASE, &[("kw", forum_name.as_str())]).ok()?;
                Some(ClipboardLink::forum(url.as_str(), forum_name))
            }
            "/pb" => {
                let thread_id = query_value(&parsed, "tid")?
                    .parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)?;
                Some(ClipboardLink::thread(
                    format!("{THREAD_BASE}{thread_id}"),
                    thread_id,
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forum_deep_link() {
        assert_eq!(
            parse_deep_link("com.baidu.tieba://unidispatch/frs?kw=cats"),
            Some(ClipboardLink::forum("https://tieba.baidu.com/f?kw=cats", "cats"))
        );
    }

    #[test]
    fn forum_deep_link_encodes_name() {
        let link = parse_deep_link("com.baidu.tieba://unidispatch/FRS?kw=%E7%8C%AB").unwrap();
        assert_eq!(
            link,
            ClipboardLink::forum("https://tieba.baidu.com/f?kw=%E7%8C%AB", "猫")
        );
    }

    #[test]
    fn thread_deep_link() {
        let uri = "com.baidu.tieba://unidispatch/pb?obj_locate=pb_reply&fr=bpush&tid=8848";
        assert_eq!(
            parse_deep_link(uri),
            Some(ClipboardLink::thread("https://tieba.baidu.com/p/8848", 8848))
        );
    }

    #[test]
    fn missing_required_parameter() {
        assert_eq!(parse_deep_link("com.baidu.tieba://unidispatch/frs"), None);
        assert_eq!(parse_deep_link("com.baidu.tieba://unidispatch/frs?name=cats"), None);
        assert_eq!(parse_deep_link("com.baidu.tieba://unidispatch/pb?tid=abc"), None);
    }

    #[test]
    fn unrecognised_deep_links() {
        assert_eq!(parse_deep_link("com.baidu.tieba://unidispatch/home"), None);
        assert_eq!(parse_deep_link("com.baidu.tieba://other/frs?kw=cats"), None);
        assert_eq!(parse_deep_link("baiduboxapp://unidispatch/frs?kw=cats"), None);
        assert_eq!(parse_deep_link("not a uri"), None);
    }

    #[test]
    fn web_links_fall_back() {
        let url = "https://tieba.baidu.com/p/5";
        assert_eq!(parse_deep_link(url), Some(ClipboardLink::thread(url, 5)));
        assert_eq!(parse_deep_link("https://example.com/p/5"), None);
    }
}
