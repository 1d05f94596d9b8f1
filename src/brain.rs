//! User-facing actions over the API, one operation slot per action kind.
//!
//! [`Brain`] is what the CLI talks to. Each action runs through the
//! [`OperationRegistry`], so re-triggering an action supersedes the earlier
//! request of the same kind. Mutations refetch the list afterwards since
//! items are never patched locally.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::config::{config_dir, Config};
use crate::error::ApiError;
use crate::loader::{HttpFetch, ResourceLoader};
use crate::model::{ContentItem, Credentials, NewContent, SearchResult, SharedBrain};
use crate::ops::{OperationKind, OperationRegistry};
use crate::session::{FileSessionStore, Session, SessionManager};

/// Shown when enabling sharing returns neither a link nor a hash.
pub const SHARE_CREATED: &str = "Hash created successfully";
pub const SIGNUP_SUCCESS: &str = "Account created successfully! You can now sign in.";

/// Client-side entry point to a second brain.
pub struct Brain {
    api: ApiClient,
    ops: Arc<OperationRegistry>,
    loader: ResourceLoader,
}

impl Brain {
    /// Build from config, keeping the session in the config directory.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let store = FileSessionStore::in_dir(&config_dir());
        let session = Arc::new(SessionManager::open(Box::new(store), config.session_ttl()));
        Self::with_session(config, session)
    }

    /// Build with an explicit session manager.
    pub fn with_session(config: &Config, session: Arc<SessionManager>) -> anyhow::Result<Self> {
        let api = ApiClient::new(config.api_base()?, config.request_timeout(), session)?;
        let loader = ResourceLoader::new(
            Arc::new(HttpFetch::new()?),
            config.favicon_service.clone(),
            config.resource_timeout(),
        );

        Ok(Self {
            api,
            ops: Arc::new(OperationRegistry::new()),
            loader,
        })
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    pub async fn session(&self) -> Option<Session> {
        self.api.session().current().await
    }

    pub async fn signin(&self, credentials: Credentials) -> Result<Session, ApiError> {
        let api = self.api.clone();
        self.ops
            .run(OperationKind::Signin, async move { api.signin(&credentials).await })
            .await
    }

    /// Create an account; returns the message to show on success.
    pub async fn signup(&self, credentials: Credentials) -> Result<String, ApiError> {
        let api = self.api.clone();
        self.ops
            .run(OperationKind::Signup, async move { api.signup(&credentials).await })
            .await?;
        Ok(SIGNUP_SUCCESS.to_string())
    }

    pub async fn signout(&self) -> Result<(), ApiError> {
        self.ops.cancel_all();
        Ok(self.api.session().end().await?)
    }

    /// The signed-in user's items.
    pub async fn contents(&self) -> Result<Vec<ContentItem>, ApiError> {
        self.require_session().await?;
        let api = self.api.clone();
        self.ops
            .run(OperationKind::FetchContent, async move { api.list_content().await })
            .await
    }

    /// Add an item, then return the refetched list. A blank title does nothing.
    pub async fn add(&self, content: NewContent) -> Result<Option<Vec<ContentItem>>, ApiError> {
        if content.title().trim().is_empty() {
            debug!("Ignoring content with a blank title");
            return Ok(None);
        }
        self.require_session().await?;
        let api = self.api.clone();
        self.ops
            .run(OperationKind::AddContent, async move { api.add_content(&content).await })
            .await?;
        self.contents().await.map(Some)
    }

    /// Delete an item, then return the refetched list.
    pub async fn delete(&self, id: &str) -> Result<Vec<ContentItem>, ApiError> {
        self.require_session().await?;
        let api = self.api.clone();
        let id = id.to_string();
        self.ops
            .run(OperationKind::DeleteContent, async move { api.delete_content(&id).await })
            .await?;
        self.contents().await
    }

    /// Search the collection. A blank query does nothing.
    pub async fn search(&self, query: &str) -> Result<Option<SearchResult>, ApiError> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Ok(None);
        }
        self.require_session().await?;
        let api = self.api.clone();
        self.ops
            .run(OperationKind::Search, async move { api.search(&query).await })
            .await
            .map(Some)
    }

    /// Enable sharing and return the link to hand out, or disable it.
    pub async fn share(&self, enabled: bool) -> Result<Option<String>, ApiError> {
        self.require_session().await?;
        let api = self.api.clone();
        let link = self
            .ops
            .run(OperationKind::Share, async move { api.share(enabled).await })
            .await?;

        if !enabled {
            return Ok(None);
        }
        Ok(Some(link.link().unwrap_or(SHARE_CREATED).to_string()))
    }

    /// Read-only view of a shared collection. No session needed.
    pub async fn shared(&self, hash: &str) -> Result<SharedBrain, ApiError> {
        let api = self.api.clone();
        let hash = share_hash(hash).to_string();
        self.ops
            .run(OperationKind::SharedBrain, async move { api.shared_brain(&hash).await })
            .await
    }

    /// Find one item by id in the current list.
    pub async fn find(&self, id: &str) -> Result<Option<ContentItem>, ApiError> {
        Ok(self.contents().await?.into_iter().find(|item| item.id == id))
    }

    /// Stop everything in flight, e.g. when leaving a view.
    pub fn cancel_all(&self) {
        self.ops.cancel_all();
    }

    async fn require_session(&self) -> Result<(), ApiError> {
        if self.session().await.is_none() {
            warn!("No live session; sign in first");
            return Err(ApiError::NotSignedIn);
        }
        Ok(())
    }
}

/// Accept either a bare hash or a full `/share/<hash>` link.
#[must_use]
pub fn share_hash(input: &str) -> &str {
    let trimmed = input.trim().trim_end_matches('/');
    match trimmed.rsplit_once("/share/") {
        Some((_, hash)) => hash,
        None => trimmed,
    }
}
