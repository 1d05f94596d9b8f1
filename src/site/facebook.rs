//! Facebook links (`facebook.com`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"facebook\.com"]));

/// Facebook matcher.
pub struct FacebookMatcher;

impl SiteMatcher for FacebookMatcher {
    fn name(&self) -> &'static str {
        "facebook"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Facebook
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }
}
