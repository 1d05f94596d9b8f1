//! YouTube links (`youtube.com`, `youtu.be`).
//!
//! YouTube publishes an oEmbed endpoint that needs no app token, so video
//! cards can resolve a title and thumbnail after render.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"youtube\.com", r"youtu\.be"]));

/// YouTube matcher.
pub struct YouTubeMatcher;

impl SiteMatcher for YouTubeMatcher {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Youtube
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }

    fn oembed_endpoint(&self) -> Option<&'static str> {
        Some("https://www.youtube.com/oembed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_watch_and_short_urls() {
        let matcher = YouTubeMatcher;
        assert!(matcher.matches("https://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(matcher.matches("https://www.youtube.com/watch?v=ABC123"));
        assert!(matcher.matches("https://youtu.be/dQw4w9WgXcQ"));
        assert!(matcher.matches("youtube.com/channel/UCxyz"));
    }

    #[test]
    fn does_not_match_other_hosts() {
        let matcher = YouTubeMatcher;
        assert!(!matcher.matches("https://m.youtube.com/watch?v=1"));
        assert!(!matcher.matches("https://instagram.com/p/abc"));
        assert!(!matcher.matches("https://example.com/youtube.com"));
    }
}
