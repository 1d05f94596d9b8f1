//! LinkedIn links (`linkedin.com`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{host_pattern, PlatformTag, SiteMatcher};

static PATTERN: Lazy<Regex> = Lazy::new(|| host_pattern(&[r"linkedin\.com"]));

/// LinkedIn matcher.
pub struct LinkedInMatcher;

impl SiteMatcher for LinkedInMatcher {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn tag(&self) -> PlatformTag {
        PlatformTag::Linkedin
    }

    fn matches(&self, url: &str) -> bool {
        PATTERN.is_match(url)
    }
}
