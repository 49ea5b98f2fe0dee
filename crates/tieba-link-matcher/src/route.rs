//! Routing decisions for URIs opened from an embedded web view.

use serde::Serialize;
use tieba_link_types::ClipboardLink;
use url::Url;

use crate::matcher::LinkMatcher;

const BAIDU_DOMAIN: &str = "baidu.com";
const PASSPORT_HOST: &str = "wappass.baidu.com";

/// Where a URI should be opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "link", rename_all = "snake_case")]
pub enum LinkRoute {
    /// A forum or thread, shown natively.
    Tieba(ClipboardLink),
    /// The passport login page.
    Login,
    /// Another page on the platform's own domain, loaded in place.
    Internal,
    /// A third-party app deep link.
    ExternalApp,
    /// Any other web page.
    External,
}

/// Route `uri` using the built-in host allow-list.
///
/// Returns `None` when `uri` is not an absolute URI.
pub fn route(uri: &str) -> Option<LinkRoute> {
    LinkMatcher::builtin().route(uri)
}

/// Whether the URI uses http or https.
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Whether the URI points at the platform's own domain.
pub fn is_baidu(url: &Url) -> bool {
    is_http(url)
        && url.host_str().is_some_and(|host| {
            host == BAIDU_DOMAIN
                || host
                    .strip_suffix(BAIDU_DOMAIN)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
}

/// Whether the URI is the passport login page.
pub fn is_login(url: &Url) -> bool {
    is_http(url) && url.host_str() == Some(PASSPORT_HOST)
}

impl LinkMatcher {
    /// Decide where `uri` should be opened.
    pub fn route(&self, uri: &str) -> Option<LinkRoute> {
        let url = Url::parse(uri).ok()?;
        if let Some(link) = self.parse_deep_link(uri) {
            return Some(LinkRoute::Tieba(link));
        }
        let route = if is_login(&url) {
            LinkRoute::Login
        } else if is_baidu(&url) {
            LinkRoute::Internal
        } else if is_http(&url) {
            LinkRoute::External
        } else {
            LinkRoute::ExternalApp
        };
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tieba_links_route_natively() {
        assert_eq!(
            route("com.baidu.tieba://unidispatch/pb?tid=3"),
            Some(LinkRoute::Tieba(ClipboardLink::thread(
                "https://tieba.baidu.com/p/3",
                3
            )))
        );
        assert!(matches!(
            route("https://tieba.baidu.com/f?kw=rust"),
            Some(LinkRoute::Tieba(ClipboardLink::Forum { .. }))
        ));
    }

    #[test]
    fn login_and_internal() {
        assert_eq!(
            route("https://wappass.baidu.com/passport?login"),
            Some(LinkRoute::Login)
        );
        assert_eq!(
            route("https://tieba.baidu.com/home/main?un=x"),
            Some(LinkRoute::Internal)
        );
        assert_eq!(route("https://baidu.com/"), Some(LinkRoute::Internal));
        assert_eq!(route("https://notbaidu.com/"), Some(LinkRoute::External));
    }

    #[test]
    fn third_party() {
        assert_eq!(route("https://example.com/a"), Some(LinkRoute::External));
        assert_eq!(
            route("weixin://dl/business/?t=abc"),
            Some(LinkRoute::ExternalApp)
        );
        assert_eq!(route("com.baidu.tieba://unidispatch/home"), Some(LinkRoute::ExternalApp));
        assert_eq!(route("relative/path"), None);
    }

    #[test]
    fn route_serializes() {
        let json = serde_json::to_value(route("https://example.com").unwrap()).unwrap();
        assert_eq!(json["route"], "external");
    }
}
