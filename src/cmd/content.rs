use anyhow::Result;
use tracing::warn;

use second_brain::render::{CardView, RenderDecision};
use second_brain::{ApiError, Brain, NewContent};

use super::output::Output;
use crate::AddContent;

/// Sessions closer than this to expiry get a renewal hint.
const RENEW_HINT_WINDOW_HOURS: i64 = 1;

pub async fn cmd_list(brain: &Brain, out: &Output, previews: bool) -> Result<()> {
    if brain
        .api()
        .session()
        .expires_within(chrono::Duration::hours(RENEW_HINT_WINDOW_HOURS))
        .await
    {
        eprintln!("Session expires soon; run `brain signin` again to renew it.");
    }

    let Some(items) = fetch_or_warn(brain.contents().await) else {
        return Ok(());
    };
    let layout = out.layout(&items, false);
    if !(previews && out.is_json()) {
        out.print_grid(&layout)?;
    }

    if previews {
        let cards: Vec<CardView> = layout.cards().cloned().collect();
        let resources = brain.loader().load_cards(&cards).await;
        out.resources(&layout, &resources)?;
    }
    Ok(())
}

pub async fn cmd_add(brain: &Brain, out: &Output, content: AddContent) -> Result<()> {
    let content = match content {
        AddContent::Url { title, link } => NewContent::link(title, link),
        AddContent::Note { title, text } => NewContent::note(title, text),
    };

    match fetch_or_warn(brain.add(content).await) {
        Some(Some(items)) => {
            out.grid(&items, false)?;
        }
        Some(None) => eprintln!("Nothing added: the title is blank."),
        None => {}
    }
    Ok(())
}

pub async fn cmd_delete(brain: &Brain, out: &Output, id: &str) -> Result<()> {
    if let Some(items) = fetch_or_warn(brain.delete(id).await) {
        out.grid(&items, false)?;
    }
    Ok(())
}

/// Full text of a note, or the link of anything else.
pub async fn cmd_view(brain: &Brain, out: &Output, id: &str) -> Result<()> {
    let Some(found) = fetch_or_warn(brain.find(id).await) else {
        return Ok(());
    };
    let Some(item) = found else {
        eprintln!("No item with id {id}");
        return Ok(());
    };

    if out.is_json() {
        return out.json(&item);
    }

    let card = CardView::from_item(&item, true);
    println!("{}  ({}, {})\n", card.title, card.kind, card.date);
    match &card.body {
        RenderDecision::NoteBlock { text } => println!("{text}"),
        _ => println!("{}", item.url.as_deref().unwrap_or("")),
    }
    Ok(())
}

/// List fetch and mutation failures are logged, not fatal.
fn fetch_or_warn<T>(result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ApiError::NotSignedIn) => {
            eprintln!("Not signed in. Run `brain signin <username>` first.");
            None
        }
        Err(e) => {
            warn!("{}", e.message());
            None
        }
    }
}
