//! Social platform classification for saved links.
//!
//! A saved URL is tagged with the social platform it belongs to so the card
//! renderer can pick a platform embed instead of a generic link preview.
//!
//! # Architecture
//!
//! - [`SiteMatcher`]: per-platform host pattern and embed layout
//! - [`Classifier`]: checks matchers in a fixed order, first match wins
//! - [`PlatformTag`]: the derived classification (never stored)
//!
//! # Example
//!
//! ```rust
//! use second_brain::site::{classify, PlatformTag};
//!
//! assert_eq!(classify(Some("https://youtu.be/dQw4w9WgXcQ")), PlatformTag::Youtube);
//! assert_eq!(classify(Some("https://example.com")), PlatformTag::None);
//! assert_eq!(classify(None), PlatformTag::None);
//! ```

pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod pinterest;
pub mod twitter;
pub mod youtube;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Social platform a URL belongs to. `None` when no platform matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Youtube,
    Twitter,
    Instagram,
    Facebook,
    Linkedin,
    Pinterest,
    None,
}

impl PlatformTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformTag::Youtube => "youtube",
            PlatformTag::Twitter => "twitter",
            PlatformTag::Instagram => "instagram",
            PlatformTag::Facebook => "facebook",
            PlatformTag::Linkedin => "linkedin",
            PlatformTag::Pinterest => "pinterest",
            PlatformTag::None => "none",
        }
    }

    /// Whether this tag names an actual platform.
    #[must_use]
    pub fn is_social(self) -> bool {
        self != PlatformTag::None
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrapper geometry for a platform embed.
///
/// Values are layout compensation for each platform's widget, not behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedLayout {
    /// Fixed wrapper height, `None` lets the widget size itself.
    pub height_px: Option<u32>,
    /// Widget scale in percent.
    pub scale_percent: u16,
    /// Bottom margin applied to the wrapper (negative pulls the card up).
    pub margin_bottom_px: i32,
    pub centered: bool,
    pub clip_overflow: bool,
    /// Embeds are previews only; clicks go through the card's open action.
    pub pointer_events: bool,
}

impl EmbedLayout {
    /// Full width, overflow clipped, no pointer events.
    pub const CLIPPED: EmbedLayout = EmbedLayout {
        height_px: None,
        scale_percent: 100,
        margin_bottom_px: 0,
        centered: false,
        clip_overflow: true,
        pointer_events: false,
    };
}

/// Host matcher for one social platform.
pub trait SiteMatcher: Send + Sync {
    /// Matcher name (e.g., "twitter", "youtube").
    fn name(&self) -> &'static str;

    /// Tag produced when this matcher wins.
    fn tag(&self) -> PlatformTag;

    /// Check if the URL starts with this platform's host.
    fn matches(&self, url: &str) -> bool;

    /// Wrapper layout for this platform's embed.
    fn embed_layout(&self) -> EmbedLayout {
        EmbedLayout::CLIPPED
    }

    /// Public oEmbed endpoint, if the platform offers one without an app token.
    fn oembed_endpoint(&self) -> Option<&'static str> {
        None
    }
}

/// Build a start-anchored host pattern: optional scheme, optional `www.`,
/// then one of `hosts` (already regex-escaped).
pub(crate) fn host_pattern(hosts: &[&str]) -> Regex {
    let pattern = format!(r"(?i)^(https?://)?(www\.)?({})", hosts.join("|"));
    Regex::new(&pattern).expect("host patterns are static and valid")
}

/// Classifies URLs against platform matchers.
///
/// Matchers are checked in registration order. First match wins.
pub struct Classifier {
    matchers: Vec<Box<dyn SiteMatcher>>,
}

impl Classifier {
    /// Create a classifier with all platforms in their fixed order:
    /// youtube, twitter, instagram, facebook, linkedin, pinterest.
    #[must_use]
    pub fn new() -> Self {
        let matchers: Vec<Box<dyn SiteMatcher>> = vec![
            Box::new(youtube::YouTubeMatcher),
            Box::new(twitter::TwitterMatcher),
            Box::new(instagram::InstagramMatcher),
            Box::new(facebook::FacebookMatcher),
            Box::new(linkedin::LinkedInMatcher),
            Box::new(pinterest::PinterestMatcher),
        ];

        Self { matchers }
    }

    /// Tag `url` with the first matching platform.
    pub fn classify(&self, url: Option<&str>) -> PlatformTag {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return PlatformTag::None;
        };

        for matcher in &self.matchers {
            if matcher.matches(url) {
                tracing::debug!("Matched platform: {}", matcher.name());
                return matcher.tag();
            }
        }
        PlatformTag::None
    }

    /// Matcher registered for `tag`, if any.
    pub fn matcher(&self, tag: PlatformTag) -> Option<&dyn SiteMatcher> {
        self.matchers
            .iter()
            .find(|m| m.tag() == tag)
            .map(|m| m.as_ref())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

static CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::new);

/// Classify a raw URL using the shared classifier.
///
/// Absent, empty or unrecognised input yields [`PlatformTag::None`].
pub fn classify(url: Option<&str>) -> PlatformTag {
    CLASSIFIER.classify(url)
}

/// Embed wrapper layout for `tag`. [`EmbedLayout::CLIPPED`] for `None`.
pub fn embed_layout(tag: PlatformTag) -> EmbedLayout {
    CLASSIFIER
        .matcher(tag)
        .map_or(EmbedLayout::CLIPPED, |m| m.embed_layout())
}

/// oEmbed endpoint for `tag`, if the platform has a public one.
pub fn oembed_endpoint(tag: PlatformTag) -> Option<&'static str> {
    CLASSIFIER.matcher(tag).and_then(|m| m.oembed_endpoint())
}
