//! Favicon lookup for generic link cards.

use url::Url;

/// Hostname used for the favicon request: the URL's host with a single
/// leading `www.` removed. `None` when the URL cannot be parsed or has no host.
pub fn favicon_host(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// Small (32px) favicon URL for `host` from the lookup `service`.
pub fn favicon_url(service: &str, host: &str) -> String {
    format!("{service}?domain={}&sz=32", urlencoding::encode(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FAVICON_SERVICE;

    #[test]
    fn keeps_subdomains() {
        assert_eq!(
            favicon_host("https://sub.example.com/path").as_deref(),
            Some("sub.example.com")
        );
    }

    #[test]
    fn strips_only_a_leading_www() {
        assert_eq!(favicon_host("https://www.example.com").as_deref(), Some("example.com"));
        assert_eq!(
            favicon_host("https://www.www.example.com").as_deref(),
            Some("www.example.com")
        );
        assert_eq!(
            favicon_host("https://wwwexample.com").as_deref(),
            Some("wwwexample.com")
        );
        assert_eq!(
            favicon_host("https://shop.www.example.com").as_deref(),
            Some("shop.www.example.com")
        );
    }

    #[test]
    fn unparseable_or_hostless_urls_have_no_favicon() {
        assert_eq!(favicon_host("example.com/page"), None);
        assert_eq!(favicon_host("not a url"), None);
        assert_eq!(favicon_host(""), None);
        assert_eq!(favicon_host("mailto:someone@example.com"), None);
    }

    #[test]
    fn builds_small_favicon_request() {
        assert_eq!(
            favicon_url(DEFAULT_FAVICON_SERVICE, "example.com"),
            "https://www.google.com/s2/favicons?domain=example.com&sz=32"
        );
    }
}
