//! Masonry grid of content cards.
//!
//! The grid owns no logic beyond splitting cards into columns and showing an
//! empty state. Column count follows the viewport width band.

use serde::Serialize;

use crate::model::ContentItem;
use crate::render::{CardAction, CardIcon, CardView, RenderDecision};

pub const EMPTY_TITLE: &str = "No content found";
pub const EMPTY_HINT: &str = "Start by adding some content using the button below";

const COLUMN_GAP: usize = 2;

/// Pixels counted per terminal character when picking a width band.
pub const CELL_WIDTH_PX: u16 = 10;

/// Column count for a viewport width: 1 below 640, 2 below 1024,
/// 3 below 1280, else 4.
#[must_use]
pub fn column_count(viewport_width: u16) -> usize {
    match viewport_width {
        0..=639 => 1,
        640..=1023 => 2,
        1024..=1279 => 3,
        _ => 4,
    }
}

/// Viewport width in pixels for a terminal `chars` wide.
#[must_use]
pub fn terminal_viewport(chars: u16) -> u16 {
    chars.saturating_mul(CELL_WIDTH_PX)
}

/// Centered two-line message shown instead of an empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: EMPTY_TITLE,
            hint: EMPTY_HINT,
        }
    }
}

/// Result of laying out a content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum GridLayout {
    Empty(EmptyState),
    Columns { columns: Vec<Vec<CardView>> },
}

/// Lay out `items` for a viewport. Every card gets a delete action.
#[must_use]
pub fn layout(items: &[ContentItem], viewport_width: u16) -> GridLayout {
    layout_cards(
        items.iter().map(|item| CardView::from_item(item, true)).collect(),
        viewport_width,
    )
}

/// Lay out a read-only collection (no delete actions).
#[must_use]
pub fn layout_read_only(items: &[ContentItem], viewport_width: u16) -> GridLayout {
    layout_cards(
        items.iter().map(|item| CardView::from_item(item, false)).collect(),
        viewport_width,
    )
}

/// Fill columns in order, top to bottom, keeping column lengths balanced.
fn layout_cards(cards: Vec<CardView>, viewport_width: u16) -> GridLayout {
    if cards.is_empty() {
        return GridLayout::Empty(EmptyState::default());
    }

    let count = column_count(viewport_width).min(cards.len());
    let mut columns = Vec::with_capacity(count);
    let mut remaining = cards.into_iter();
    let mut left = remaining.len();

    for filled in 0..count {
        let take = left.div_ceil(count - filled);
        columns.push(remaining.by_ref().take(take).collect::<Vec<_>>());
        left -= take;
    }

    GridLayout::Columns { columns }
}

impl GridLayout {
    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            GridLayout::Empty(_) => 0,
            GridLayout::Columns { columns } => columns.iter().map(Vec::len).sum(),
        }
    }

    /// Cards in column order.
    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        let columns: &[Vec<CardView>] = match self {
            GridLayout::Empty(_) => &[],
            GridLayout::Columns { columns } => columns,
        };
        columns.iter().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, GridLayout::Empty(_))
    }

    /// Plain-text rendering, columns side by side within `width` characters.
    #[must_use]
    pub fn to_text(&self, width: u16) -> String {
        let width = usize::from(width).max(20);
        match self {
            GridLayout::Empty(empty) => {
                let mut out = String::new();
                out.push_str(&center(empty.title, width));
                out.push('\n');
                out.push_str(&center(empty.hint, width));
                out.push('\n');
                out
            }
            GridLayout::Columns { columns } => {
                let gaps = COLUMN_GAP * (columns.len() - 1);
                let col_width = (width.saturating_sub(gaps) / columns.len()).max(12);
                let rendered: Vec<Vec<String>> = columns
                    .iter()
                    .map(|cards| {
                        let mut lines = Vec::new();
                        for (i, card) in cards.iter().enumerate() {
                            if i > 0 {
                                lines.push(String::new());
                            }
                            lines.extend(card_lines(card, col_width));
                        }
                        lines
                    })
                    .collect();

                let rows = rendered.iter().map(Vec::len).max().unwrap_or(0);
                let mut out = String::new();
                for row in 0..rows {
                    let mut line = String::new();
                    for (c, column) in rendered.iter().enumerate() {
                        let cell = column.get(row).map_or("", String::as_str);
                        if c + 1 < rendered.len() {
                            line.push_str(&pad(cell, col_width + COLUMN_GAP));
                        } else {
                            line.push_str(cell);
                        }
                    }
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
                out
            }
        }
    }
}

/// Render one card as text lines no wider than `width`.
#[must_use]
pub fn card_lines(card: &CardView, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let icon = match &card.icon {
        CardIcon::File => "[file]".to_string(),
        CardIcon::Image => "[image]".to_string(),
        CardIcon::Note => "[note]".to_string(),
        CardIcon::Favicon { host } => format!("[{host}]"),
        CardIcon::Globe => "[web]".to_string(),
    };
    lines.push(truncate_text(&format!("{icon} {}", card.title), width));

    match &card.body {
        RenderDecision::NoteBlock { .. } => {
            if let Some((note_lines, truncated)) = card.body.clamped_lines() {
                for line in note_lines {
                    lines.push(truncate_text(&format!("  {line}"), width));
                }
                if truncated {
                    lines.push("  ...".to_string());
                }
            }
        }
        RenderDecision::SocialEmbed { platform, url, .. } => {
            lines.push(truncate_text(&format!("  <{platform} embed>"), width));
            lines.push(truncate_text(&format!("  {url}"), width));
        }
        RenderDecision::LinkPreview { image_url: Some(image) } => {
            lines.push(truncate_text(&format!("  preview: {image}"), width));
        }
        RenderDecision::LinkPreview { image_url: None } => {
            lines.push(format!("  {}", "~".repeat(width.saturating_sub(2).min(24))));
        }
        RenderDecision::IconOnly => {}
    }

    let actions: Vec<&str> = card
        .actions
        .iter()
        .map(|a| match a {
            CardAction::OpenLink { .. } => "open",
            CardAction::Expand => "view",
            CardAction::Delete => "delete",
        })
        .collect();
    lines.push(truncate_text(
        &format!("  {} | {}  {}", card.id, actions.join(" "), card.date),
        width,
    ));
    lines
}

/// Cut `text` to `max` characters, ending in `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(left))
}
