use anyhow::Result;
use serde::Serialize;

use second_brain::grid::{self, GridLayout};
use second_brain::loader::CardResources;
use second_brain::ContentItem;

use crate::OutputFormat;

/// Where and how command results are printed.
pub struct Output {
    pub format: OutputFormat,
    /// Terminal width in characters.
    pub width: u16,
}

#[derive(Serialize)]
struct GridWithResources<'a> {
    grid: &'a GridLayout,
    resources: &'a [CardResources],
}

impl Output {
    pub fn new(format: OutputFormat, width: u16) -> Self {
        Self { format, width }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Lay out a content list for this terminal without printing it.
    pub fn layout(&self, items: &[ContentItem], read_only: bool) -> GridLayout {
        let viewport = grid::terminal_viewport(self.width);
        if read_only {
            grid::layout_read_only(items, viewport)
        } else {
            grid::layout(items, viewport)
        }
    }

    pub fn print_grid(&self, layout: &GridLayout) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", layout.to_text(self.width)),
            OutputFormat::Json => self.json(layout)?,
        }
        Ok(())
    }

    /// Lay out and print a content list.
    pub fn grid(&self, items: &[ContentItem], read_only: bool) -> Result<GridLayout> {
        let layout = self.layout(items, read_only);
        self.print_grid(&layout)?;
        Ok(layout)
    }

    /// Print loaded card resources. In JSON mode this is the whole document,
    /// grid included, so the grid must not have been printed on its own.
    pub fn resources(&self, layout: &GridLayout, resources: &[CardResources]) -> Result<()> {
        if self.is_json() {
            return self.json(&GridWithResources {
                grid: layout,
                resources,
            });
        }

        println!();
        for res in resources {
            let favicon = match &res.favicon {
                Some(state) if !state.is_fallback() => "favicon",
                Some(_) => "globe",
                None => "-",
            };
            let embed = match res.embed.clone().and_then(|e| e.ready()) {
                Some(preview) => preview
                    .title
                    .or(preview.provider_name)
                    .unwrap_or_else(|| "embed".to_string()),
                None if res.embed.is_some() => "plain embed".to_string(),
                None => "-".to_string(),
            };
            println!(
                "{}  {favicon}  {}",
                res.card_id,
                grid::truncate_text(&embed, usize::from(self.width).saturating_sub(res.card_id.len() + 12))
            );
        }
        Ok(())
    }

    /// A one-line status message, or `{"message": ...}` in JSON mode.
    pub fn message(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{message}"),
            OutputFormat::Json => self.json(&serde_json::json!({ "message": message }))?,
        }
        Ok(())
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
