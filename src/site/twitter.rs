//! Twitter/X links (`twitter.com`, `x.com`).
//!
//! The tweet widget renders a tall footer that the card hides with a
//! negative bottom margin on the wrapper.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, EmbedLayout, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"twitter\.com", r"x\.com"]));

/// Twitter/X matcher.
pub struct TwitterMatcher;

impl SiteMatcher for TwitterMatcher {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Twitter
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }

    fn embed_layout(&self) -> EmbedLayout {
        EmbedLayout {
            margin_bottom_px: -90,
            ..EmbedLayout::CLIPPED
        }
    }

    fn oembed_endpoint(&self) -> Option<&'static str> {
        Some("https://publish.twitter.com/oembed")
    }
}
