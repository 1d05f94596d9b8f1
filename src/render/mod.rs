//! Card rendering decisions.
//!
//! [`render`] maps a content item and its platform classification to one
//! [`RenderDecision`]. [`CardView`] adds the parts around it: the type icon,
//! the available actions and the display date.
//!
//! | Item kind | Platform | Decision |
//! |-----------|----------|----------|
//! | `Note` | any | [`RenderDecision::NoteBlock`] |
//! | `Url` | social | [`RenderDecision::SocialEmbed`] |
//! | `Url` | none | [`RenderDecision::LinkPreview`] |
//! | `Doc`, `Image`, other | any | [`RenderDecision::IconOnly`] |
//!
//! Nothing here performs I/O. Favicons and embed metadata are loaded
//! separately by [`crate::loader::ResourceLoader`].

pub mod favicon;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ContentItem, ContentKind};
use crate::site::{self, EmbedLayout, PlatformTag};

pub use favicon::{favicon_host, favicon_url};

/// Note text is clamped to this many lines on a card.
pub const NOTE_LINE_CLAMP: usize = 6;

/// Minimum height of the preview placeholder shown for links without an image.
pub const PLACEHOLDER_MIN_HEIGHT_PX: u32 = 32;

/// What the body of a card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderDecision {
    /// Note body verbatim, whitespace and newlines preserved.
    NoteBlock { text: String },
    /// Platform widget for a social link.
    SocialEmbed {
        platform: PlatformTag,
        url: String,
        layout: EmbedLayout,
    },
    /// Preview image for a generic link, or a neutral placeholder when `None`.
    LinkPreview { image_url: Option<String> },
    /// No body, only the type icon.
    IconOnly,
}

impl RenderDecision {
    /// Lines of a note as displayed: at most [`NOTE_LINE_CLAMP`], the rest elided.
    #[must_use]
    pub fn clamped_lines(&self) -> Option<(Vec<&str>, bool)> {
        let RenderDecision::NoteBlock { text } = self else {
            return None;
        };
        let mut lines: Vec<&str> = text.lines().collect();
        let truncated = lines.len() > NOTE_LINE_CLAMP;
        lines.truncate(NOTE_LINE_CLAMP);
        Some((lines, truncated))
    }
}

/// Decide how a card's body is rendered.
#[must_use]
pub fn render(item: &ContentItem, platform: PlatformTag) -> RenderDecision {
    match item.kind {
        ContentKind::Note => RenderDecision::NoteBlock {
            text: item.body.clone().unwrap_or_default(),
        },
        ContentKind::Url => match (platform, item.url.as_deref()) {
            (platform, Some(url)) if platform.is_social() => RenderDecision::SocialEmbed {
                platform,
                url: url.to_string(),
                layout: site::embed_layout(platform),
            },
            _ => RenderDecision::LinkPreview {
                image_url: item.image_url.clone().filter(|u| !u.is_empty()),
            },
        },
        ContentKind::Doc | ContentKind::Image | ContentKind::Other => RenderDecision::IconOnly,
    }
}

/// Type icon shown next to the card title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardIcon {
    File,
    Image,
    Note,
    /// Site favicon for a link; the loader falls back to [`CardIcon::Globe`].
    Favicon { host: String },
    Globe,
}

impl CardIcon {
    #[must_use]
    pub fn for_item(item: &ContentItem) -> Self {
        match item.kind {
            ContentKind::Doc => CardIcon::File,
            ContentKind::Image => CardIcon::Image,
            ContentKind::Note => CardIcon::Note,
            ContentKind::Url | ContentKind::Other => item
                .url
                .as_deref()
                .and_then(favicon_host)
                .map_or(CardIcon::Globe, |host| CardIcon::Favicon { host }),
        }
    }
}

/// Action offered on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardAction {
    /// Open the saved link in a browser.
    OpenLink { url: String },
    /// Show the full note.
    Expand,
    Delete,
}

/// Everything needed to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub body: RenderDecision,
    pub icon: CardIcon,
    pub actions: Vec<CardAction>,
    /// Creation date, `Jul 27, 2025` style. Empty when the server sent none.
    pub date: String,
}

impl CardView {
    /// Build a card. `deletable` adds the delete action.
    #[must_use]
    pub fn from_item(item: &ContentItem, deletable: bool) -> Self {
        let platform = site::classify(item.url.as_deref());
        tracing::trace!(kind = %item.kind, platform = %platform, "Rendering card");

        let mut actions = Vec::with_capacity(2);
        match (item.kind, item.url.as_deref()) {
            (ContentKind::Url, Some(url)) => actions.push(CardAction::OpenLink {
                url: url.to_string(),
            }),
            _ => actions.push(CardAction::Expand),
        }
        if deletable {
            actions.push(CardAction::Delete);
        }

        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            kind: item.kind,
            body: render(item, platform),
            icon: CardIcon::for_item(item),
            actions,
            date: display_date(item.created_at),
        }
    }

    #[must_use]
    pub fn has_action(&self, wanted: impl Fn(&CardAction) -> bool) -> bool {
        self.actions.iter().any(wanted)
    }
}

/// A missing `createdAt` decodes to the epoch; show no date for it.
fn display_date(created_at: DateTime<Utc>) -> String {
    if created_at == DateTime::<Utc>::default() {
        return String::new();
    }
    created_at.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn item(kind: ContentKind, body: Option<&str>, url: Option<&str>, image: Option<&str>) -> ContentItem {
        ContentItem {
            id: "id-1".into(),
            title: "Title".into(),
            kind,
            body: body.map(Into::into),
            url: url.map(Into::into),
            image_url: image.map(Into::into),
            created_at: Utc.with_ymd_and_hms(2025, 7, 27, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn note_is_note_block_whatever_the_platform() {
        let note = item(ContentKind::Note, Some("a\n  b"), Some("https://youtu.be/x"), None);
        for platform in [PlatformTag::Youtube, PlatformTag::Twitter, PlatformTag::None] {
            assert_eq!(
                render(&note, platform),
                RenderDecision::NoteBlock { text: "a\n  b".into() }
            );
        }
    }

    #[test]
    fn social_url_becomes_embed() {
        let link = item(ContentKind::Url, None, Some("https://youtube.com/watch?v=1"), None);
        assert_eq!(
            render(&link, PlatformTag::Youtube),
            RenderDecision::SocialEmbed {
                platform: PlatformTag::Youtube,
                url: "https://youtube.com/watch?v=1".into(),
                layout: EmbedLayout::CLIPPED,
            }
        );
    }

    #[test]
    fn generic_url_becomes_preview_or_placeholder() {
        let with_image = item(ContentKind::Url, None, Some("https://example.com"), Some("https://img/p.png"));
        assert_eq!(
            render(&with_image, PlatformTag::None),
            RenderDecision::LinkPreview { image_url: Some("https://img/p.png".into()) }
        );

        let without = item(ContentKind::Url, None, Some("https://example.com"), None);
        assert_eq!(
            render(&without, PlatformTag::None),
            RenderDecision::LinkPreview { image_url: None }
        );
    }

    #[test]
    fn docs_and_images_are_icon_only() {
        for kind in [ContentKind::Doc, ContentKind::Image, ContentKind::Other] {
            let it = item(kind, None, Some("https://example.com/a.pdf"), None);
            assert_eq!(render(&it, PlatformTag::None), RenderDecision::IconOnly);
        }
    }

    #[test]
    fn note_lines_are_clamped() {
        let text = (1..=9).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let block = RenderDecision::NoteBlock { text };
        let (lines, truncated) = block.clamped_lines().unwrap();
        assert_eq!(lines, ["1", "2", "3", "4", "5", "6"]);
        assert!(truncated);
        assert!(RenderDecision::IconOnly.clamped_lines().is_none());
    }

    #[test]
    fn grocery_note_card() {
        let note = ContentItem {
            title: "Groceries".into(),
            ..item(ContentKind::Note, Some("milk, eggs"), None, None)
        };
        let card = CardView::from_item(&note, true);

        assert_eq!(card.title, "Groceries");
        assert_eq!(card.body, RenderDecision::NoteBlock { text: "milk, eggs".into() });
        assert_eq!(card.icon, CardIcon::Note);
        assert!(card.has_action(|a| *a == CardAction::Delete));
        assert!(card.has_action(|a| *a == CardAction::Expand));
        assert!(!card.has_action(|a| matches!(a, CardAction::OpenLink { .. })));
        assert_eq!(card.date, "Jul 27, 2025");
    }

    #[test]
    fn missing_creation_date_shows_no_date() {
        let undated = ContentItem {
            created_at: DateTime::<Utc>::default(),
            ..item(ContentKind::Note, Some("milk, eggs"), None, None)
        };
        let card = CardView::from_item(&undated, true);
        assert_eq!(card.date, "");
        assert!(!card.date.contains("1970"));
    }

    #[test]
    fn tweet_card_uses_twitter_embed_with_pulled_up_footer() {
        let tweet = item(ContentKind::Url, None, Some("https://twitter.com/foo/status/123"), None);
        let card = CardView::from_item(&tweet, true);

        let RenderDecision::SocialEmbed { platform, url, layout } = &card.body else {
            panic!("expected an embed, got {:?}", card.body);
        };
        assert_eq!(*platform, PlatformTag::Twitter);
        assert_eq!(url, "https://twitter.com/foo/status/123");
        assert_eq!(layout.margin_bottom_px, -90);
        assert_eq!(card.icon, CardIcon::Favicon { host: "twitter.com".into() });
        assert!(card.has_action(|a| matches!(a, CardAction::OpenLink { .. })));
    }

    #[test]
    fn icons_follow_kind_then_host() {
        assert_eq!(CardIcon::for_item(&item(ContentKind::Doc, None, None, None)), CardIcon::File);
        assert_eq!(CardIcon::for_item(&item(ContentKind::Image, None, None, None)), CardIcon::Image);
        assert_eq!(
            CardIcon::for_item(&item(ContentKind::Url, None, Some("https://www.example.com/x"), None)),
            CardIcon::Favicon { host: "example.com".into() }
        );
        assert_eq!(
            CardIcon::for_item(&item(ContentKind::Url, None, Some("garbage"), None)),
            CardIcon::Globe
        );
        assert_eq!(CardIcon::for_item(&item(ContentKind::Url, None, None, None)), CardIcon::Globe);
    }

    #[test]
    fn read_only_cards_have_no_delete() {
        let card = CardView::from_item(&item(ContentKind::Url, None, Some("https://example.com"), None), false);
        assert!(!card.has_action(|a| *a == CardAction::Delete));
    }
}
