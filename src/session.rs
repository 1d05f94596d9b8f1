//! Session lifecycle: the bearer token, its expiry, and where it is kept.
//!
//! The API client never reads ambient storage. It is constructed with a
//! [`SessionManager`], which owns the current [`Session`] and mirrors it to a
//! [`SessionStore`] (a JSON file for the CLI, memory for tests and embedding).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::SessionError;

/// Session file name inside the config directory.
pub const SESSION_FILE: &str = "session.json";

/// An authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    issued_at: DateTime<Utc>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session now, expiring after `ttl` if given.
    #[must_use]
    pub fn new(token: impl Into<String>, ttl: Option<Duration>) -> Self {
        Self::issued_at(token, Utc::now(), ttl)
    }

    #[must_use]
    pub fn issued_at(token: impl Into<String>, issued_at: DateTime<Utc>, ttl: Option<Duration>) -> Self {
        Self {
            token: token.into(),
            issued_at,
            expires_at: ttl.map(|ttl| issued_at + ttl),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[redacted]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Durable home of the session between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionError>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept as JSON in a file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/session.json`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept in memory only.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Owns the current session and keeps its store in sync.
pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: RwLock<Option<Session>>,
    ttl: Option<Duration>,
}

impl SessionManager {
    /// Open a manager over `store`, restoring a saved session.
    ///
    /// A corrupt or unreadable saved session is discarded with a warning.
    pub fn open(store: Box<dyn SessionStore>, ttl: Option<Duration>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable session: {}", e);
                None
            }
        };

        Self {
            store,
            current: RwLock::new(restored),
            ttl,
        }
    }

    /// Manager with no persistence.
    #[must_use]
    pub fn in_memory(ttl: Option<Duration>) -> Self {
        Self::open(Box::new(MemorySessionStore::new()), ttl)
    }

    /// The live session, if any. An expired session is ended here.
    pub async fn current(&self) -> Option<Session> {
        let session = self.current.read().await.clone()?;
        if session.is_expired_at(Utc::now()) {
            debug!("Session expired");
            self.invalidate().await;
            return None;
        }
        Some(session)
    }

    /// Start a session from a freshly issued token.
    pub async fn begin(&self, token: impl Into<String>) -> Result<Session, SessionError> {
        let session = Session::new(token, self.ttl);
        self.store.save(&session)?;
        *self.current.write().await = Some(session.clone());
        Ok(session)
    }

    /// Whether the live session ends within `window`, so it is due for
    /// renewal by signing in again. Sessions without expiry never are.
    pub async fn expires_within(&self, window: Duration) -> bool {
        self.current()
            .await
            .and_then(|s| s.expires_at())
            .is_some_and(|at| at - Utc::now() <= window)
    }

    /// Drop the session after the server rejected it. Store failures are logged.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
    }

    /// Sign out explicitly.
    pub async fn end(&self) -> Result<(), SessionError> {
        *self.current.write().await = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_after_ttl() {
        let issued = Utc::now();
        let session = Session::issued_at("t", issued, Some(Duration::hours(1)));
        assert!(!session.is_expired_at(issued + Duration::minutes(59)));
        assert!(session.is_expired_at(issued + Duration::hours(1)));

        let forever = Session::issued_at("t", issued, None);
        assert!(!forever.is_expired_at(issued + Duration::days(3650)));
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session::new("secret-token", None);
        assert!(!format!("{session:?}").contains("secret-token"));
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(&dir.path().join("nested"));
        assert!(store.load().unwrap().is_none());

        let session = Session::new("abc", Some(Duration::hours(2)));
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[tokio::test]
    async fn manager_restores_and_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        store.save(&Session::new("saved", None)).unwrap();

        let manager = SessionManager::open(Box::new(FileSessionStore::in_dir(dir.path())), None);
        assert_eq!(manager.current().await.unwrap().token(), "saved");

        manager.invalidate().await;
        assert!(manager.current().await.is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_not_returned() {
        let store = MemorySessionStore::new();
        let stale = Session::issued_at("old", Utc::now() - Duration::hours(5), Some(Duration::hours(1)));
        store.save(&stale).unwrap();

        let manager = SessionManager::open(Box::new(store), Some(Duration::hours(1)));
        assert!(manager.current().await.is_none());
    }

    #[tokio::test]
    async fn renewal_window_tracks_expiry() {
        let manager = SessionManager::in_memory(Some(Duration::hours(2)));
        assert!(!manager.expires_within(Duration::hours(1)).await);

        manager.begin("t").await.unwrap();
        assert!(!manager.expires_within(Duration::hours(1)).await);
        assert!(manager.expires_within(Duration::hours(3)).await);

        let forever = SessionManager::in_memory(None);
        forever.begin("t").await.unwrap();
        assert!(!forever.expires_within(Duration::days(365)).await);
    }

    #[tokio::test]
    async fn corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        let manager = SessionManager::open(Box::new(FileSessionStore::in_dir(dir.path())), None);
        assert!(manager.current().await.is_none());
    }

    #[tokio::test]
    async fn begin_persists_through_store() {
        let manager = SessionManager::in_memory(None);
        let session = manager.begin("fresh").await.unwrap();
        assert_eq!(session.token(), "fresh");
        assert_eq!(manager.current().await, Some(session));
        manager.end().await.unwrap();
        assert!(manager.current().await.is_none());
    }
}
