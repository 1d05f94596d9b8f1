//! Time-bounded loading of third-party card resources.
//!
//! Favicons and embed metadata come from services outside our control. Each
//! load runs as its own task with a timeout and ends in exactly one of two
//! states: [`LoadState::Ready`] or [`LoadState::Fallback`]. Failures of any
//! kind degrade to the fallback silently (logged at debug), so a card never
//! shows a broken image. Loading is independent of [`crate::render::render`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::render::{favicon_url, CardIcon, CardView, RenderDecision};
use crate::site::{self, PlatformTag};

/// Outcome of one resource load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    Ready(T),
    /// Globe glyph for favicons, plain embed wrapper for embeds.
    Fallback,
}

impl<T> LoadState<T> {
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            LoadState::Ready(value) => Some(value),
            LoadState::Fallback => None,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadState::Fallback)
    }
}

/// Raw body fetched for a resource.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Transport used by the loader.
#[async_trait]
pub trait ResourceFetch: Send + Sync {
    async fn get(&self, url: &str) -> anyhow::Result<Fetched>;
}

/// [`ResourceFetch`] over reqwest.
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .gzip(true)
            .connect_timeout(Duration::from_secs(5))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceFetch for HttpFetch {
    async fn get(&self, url: &str) -> anyhow::Result<Fetched> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(Fetched {
            status,
            content_type,
            bytes,
        })
    }
}

/// A site favicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favicon {
    pub host: String,
    pub source: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// oEmbed metadata for a social embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedPreview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// A running load that can be cancelled.
pub struct LoadTask<T> {
    handle: JoinHandle<LoadState<T>>,
}

impl<T> LoadTask<T> {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the outcome. A cancelled or failed task is a fallback.
    pub async fn outcome(self) -> LoadState<T> {
        self.handle.await.unwrap_or(LoadState::Fallback)
    }
}

/// Favicon and embed state for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardResources {
    pub card_id: String,
    pub favicon: Option<LoadState<Favicon>>,
    pub embed: Option<LoadState<EmbedPreview>>,
}

/// Loads third-party card resources.
#[derive(Clone)]
pub struct ResourceLoader {
    fetcher: Arc<dyn ResourceFetch>,
    favicon_service: String,
    timeout: Duration,
}

impl ResourceLoader {
    pub fn new(fetcher: Arc<dyn ResourceFetch>, favicon_service: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            favicon_service: favicon_service.into(),
            timeout,
        }
    }

    /// Favicon for `host`.
    pub async fn load_favicon(&self, host: &str) -> LoadState<Favicon> {
        let source = favicon_url(&self.favicon_service, host);
        let Some(fetched) = self.fetch(&source).await else {
            return LoadState::Fallback;
        };

        let content_type = fetched.content_type.unwrap_or_default();
        if !content_type.starts_with("image/") || fetched.bytes.is_empty() {
            debug!("Favicon for {} is not an image ({})", host, content_type);
            return LoadState::Fallback;
        }

        LoadState::Ready(Favicon {
            host: host.to_string(),
            source,
            content_type,
            bytes: fetched.bytes,
        })
    }

    /// oEmbed metadata for a social link. Platforms without a public
    /// endpoint go straight to the fallback.
    pub async fn load_embed(&self, platform: PlatformTag, url: &str) -> LoadState<EmbedPreview> {
        let Some(endpoint) = site::oembed_endpoint(platform) else {
            return LoadState::Fallback;
        };

        let request = format!("{endpoint}?url={}&format=json", urlencoding::encode(url));
        let Some(fetched) = self.fetch(&request).await else {
            return LoadState::Fallback;
        };

        match serde_json::from_slice::<EmbedPreview>(&fetched.bytes) {
            Ok(preview) => LoadState::Ready(preview),
            Err(e) => {
                debug!("Unreadable oEmbed from {}: {}", endpoint, e);
                LoadState::Fallback
            }
        }
    }

    /// Spawn a cancellable favicon load.
    pub fn spawn_favicon(&self, host: &str) -> LoadTask<Favicon> {
        let loader = self.clone();
        let host = host.to_string();
        LoadTask {
            handle: tokio::spawn(async move { loader.load_favicon(&host).await }),
        }
    }

    /// Spawn a cancellable embed load.
    pub fn spawn_embed(&self, platform: PlatformTag, url: &str) -> LoadTask<EmbedPreview> {
        let loader = self.clone();
        let url = url.to_string();
        LoadTask {
            handle: tokio::spawn(async move { loader.load_embed(platform, &url).await }),
        }
    }

    /// Load everything each card needs, one task per resource.
    pub async fn load_cards(&self, cards: &[CardView]) -> Vec<CardResources> {
        let loads = cards.iter().map(|card| {
            let favicon = match &card.icon {
                CardIcon::Favicon { host } => Some(self.spawn_favicon(host)),
                _ => None,
            };
            let embed = match &card.body {
                RenderDecision::SocialEmbed { platform, url, .. } => Some(self.spawn_embed(*platform, url)),
                _ => None,
            };
            let card_id = card.id.clone();

            async move {
                let favicon = match favicon {
                    Some(task) => Some(task.outcome().await),
                    None => None,
                };
                let embed = match embed {
                    Some(task) => Some(task.outcome().await),
                    None => None,
                };
                CardResources {
                    card_id,
                    favicon,
                    embed,
                }
            }
        });

        join_all(loads).await
    }

    async fn fetch(&self, url: &str) -> Option<Fetched> {
        match tokio::time::timeout(self.timeout, self.fetcher.get(url)).await {
            Ok(Ok(fetched)) if (200..300).contains(&fetched.status) => Some(fetched),
            Ok(Ok(fetched)) => {
                debug!("Resource {} answered {}", url, fetched.status);
                None
            }
            Ok(Err(e)) => {
                debug!("Resource {} failed: {}", url, e);
                None
            }
            Err(_) => {
                debug!("Resource {} timed out after {:?}", url, self.timeout);
                None
            }
        }
    }
}
