//! Pinterest links (`pinterest.com`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"pinterest\.com"]));

/// Pinterest matcher.
pub struct PinterestMatcher;

impl SiteMatcher for PinterestMatcher {
    fn name(&self) -> &'static str {
        "pinterest"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Pinterest
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }
}
