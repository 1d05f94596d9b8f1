//! Instagram links (`instagram.com`).
//!
//! The post widget is small and letterboxed; the wrapper fixes the height,
//! doubles the scale and centres it so the photo fills the card.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, EmbedLayout, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"instagram\.com"]));

/// Instagram matcher.
pub struct InstagramMatcher;

impl SiteMatcher for InstagramMatcher {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Instagram
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }

    fn embed_layout(&self) -> EmbedLayout {
        EmbedLayout {
            height_px: Some(370),
            scale_percent: 200,
            centered: true,
            ..EmbedLayout::CLIPPED
        }
    }
}
