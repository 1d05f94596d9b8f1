//! REST client for the second-brain API.
//!
//! The client is built with an explicit [`SessionManager`]; the bearer token
//! comes from there on every request and is dropped there when the server
//! answers 401. Every failure is normalised into [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{ApiError, NETWORK_ERROR};
use crate::model::{
    ContentItem, ContentList, Credentials, MessageBody, NewContent, SearchResult, ShareLink,
    SharedBrain, TokenResponse,
};
use crate::ops::OperationKind;
use crate::session::{Session, SessionManager};

/// HTTP client for the second-brain REST API.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Create a client for `base` (which must end in `/`).
    pub fn new(base: Url, timeout: Duration, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .gzip(true)
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .user_agent(concat!("second-brain/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|_| ApiError::Network {
                message: NETWORK_ERROR.to_string(),
            })?;

        Ok(Self {
            http,
            base,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Sign in and start a session with the returned token.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signin(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let kind = OperationKind::Signin;
        let request = self.request(kind, Method::POST, "auth/signin")?.json(credentials);
        let response: TokenResponse = self.fetch_json(kind, request).await?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode {
                message: kind.failure_message().to_string(),
            })?;

        Ok(self.session.begin(token).await?)
    }

    /// Create an account. Returns the server's message, if any.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signup(&self, credentials: &Credentials) -> Result<Option<String>, ApiError> {
        let kind = OperationKind::Signup;
        let request = self.request(kind, Method::POST, "auth/signup")?.json(credentials);
        let response = self.execute(kind, request).await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|b| b.message))
    }

    /// List the signed-in user's content.
    pub async fn list_content(&self) -> Result<Vec<ContentItem>, ApiError> {
        let kind = OperationKind::FetchContent;
        let request = self.request(kind, Method::GET, "content")?;
        let list: ContentList = self.fetch_json(kind, request).await?;
        debug!(count = list.content.len(), "Fetched content");
        Ok(list.content)
    }

    pub async fn add_content(&self, content: &NewContent) -> Result<(), ApiError> {
        let kind = OperationKind::AddContent;
        let request = self.request(kind, Method::POST, "content")?.json(content);
        self.execute(kind, request).await?;
        Ok(())
    }

    pub async fn delete_content(&self, id: &str) -> Result<(), ApiError> {
        let kind = OperationKind::DeleteContent;
        let path = format!("content/{}", urlencoding::encode(id));
        let request = self.request(kind, Method::DELETE, &path)?;
        self.execute(kind, request).await?;
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<SearchResult, ApiError> {
        let kind = OperationKind::Search;
        let request = self
            .request(kind, Method::PUT, "search")?
            .json(&json!({ "query": query }));
        self.fetch_json(kind, request).await
    }

    /// Turn sharing of the whole collection on or off.
    pub async fn share(&self, enabled: bool) -> Result<ShareLink, ApiError> {
        let kind = OperationKind::Share;
        let request = self
            .request(kind, Method::POST, "share")?
            .json(&json!({ "share": enabled }));
        let response = self.execute(kind, request).await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// Fetch someone's shared collection by its share hash.
    pub async fn shared_brain(&self, hash: &str) -> Result<SharedBrain, ApiError> {
        let kind = OperationKind::SharedBrain;
        let path = format!("share/{}", urlencoding::encode(hash));
        let request = self.request(kind, Method::GET, &path)?;
        self.fetch_json(kind, request).await
    }

    fn request(&self, kind: OperationKind, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.base.join(path).map_err(|e| {
            debug!(operation = %kind, "Bad endpoint {}: {}", path, e);
            ApiError::Network {
                message: NETWORK_ERROR.to_string(),
            }
        })?;
        Ok(self.http.request(method, url))
    }

    /// Send with the session's bearer token and map failures.
    async fn execute(&self, kind: OperationKind, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.current().await {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        };

        debug!(operation = %kind, "Sending request");
        let response = request
            .send()
            .await
            .map_err(|e| {
                debug!(operation = %kind, "Transport failure: {}", e);
                ApiError::from_transport(kind, &e)
            })?;

        let status = response.status();
        info!(operation = %kind, status = %status, "Response received");
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate().await;
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(kind, status.as_u16(), &body))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        kind: OperationKind,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(kind, request).await?;
        let body = response.text().await.map_err(|e| ApiError::from_transport(kind, &e))?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(operation = %kind, "Undecodable response: {}", e);
            ApiError::Decode {
                message: kind.failure_message().to_string(),
            }
        })
    }
}
