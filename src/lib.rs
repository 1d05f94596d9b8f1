//! `second-brain` - Terminal client for a personal second-brain service
//!
//! # Features
//!
//! - **Classification**: Map saved links to social platforms (`YouTube`, Twitter/X,
//!   Instagram, Facebook, `LinkedIn`, Pinterest)
//! - **Rendering**: Decide per card between note text, platform embed, link
//!   preview or a plain icon, then lay cards out in a responsive grid
//! - **API client**: Sign in, list/add/delete content, search, share, with
//!   an explicit session and normalised errors
//! - **Resources**: Favicons and embed metadata loaded with per-resource
//!   timeouts and cancellation
//!
//! # Example
//!
//! ```rust,no_run
//! use second_brain::{grid, Brain, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let brain = Brain::open(&config)?;
//!     let items = brain.contents().await?;
//!     print!("{}", grid::layout(&items, 1280).to_text(120));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod brain;
pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod model;
pub mod ops;
pub mod render;
pub mod session;
pub mod site;
pub mod typewriter;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use brain::Brain;
pub use config::Config;
pub use error::{ApiError, ConfigError, SessionError};
pub use grid::GridLayout;
pub use loader::{LoadState, ResourceLoader};
pub use model::{ContentItem, ContentKind, Credentials, NewContent};
pub use ops::{OperationKind, OperationRegistry};
pub use render::{render, CardView, RenderDecision};
pub use session::{Session, SessionManager};
pub use site::{classify, Classifier, EmbedLayout, PlatformTag, SiteMatcher};

/// Version of second-brain
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
