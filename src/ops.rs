//! Per-operation cancellation of in-flight API requests.
//!
//! Each user action runs as one spawned task registered under its
//! [`OperationKind`]. Starting a second operation of the same kind aborts the
//! first, so a rapid re-trigger never lets a stale response land after a
//! fresh one. Kinds are independent of each other.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;
use tracing::debug;

use crate::error::ApiError;

/// Kind of a user-triggered API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Signin,
    Signup,
    FetchContent,
    AddContent,
    DeleteContent,
    Search,
    Share,
    SharedBrain,
}

impl OperationKind {
    /// Message used when the server gives no reason for a failure.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            OperationKind::Signin => "Signin failed",
            OperationKind::Signup => "Signup failed",
            OperationKind::FetchContent => "Failed to fetch content",
            OperationKind::AddContent => "Failed to add content",
            OperationKind::DeleteContent => "Failed to delete content",
            OperationKind::Search => "Search failed",
            OperationKind::Share => "Failed to share brain",
            OperationKind::SharedBrain => "Failed to get shared brain",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Signin => "signin",
            OperationKind::Signup => "signup",
            OperationKind::FetchContent => "fetch-content",
            OperationKind::AddContent => "add-content",
            OperationKind::DeleteContent => "delete-content",
            OperationKind::Search => "search",
            OperationKind::Share => "share",
            OperationKind::SharedBrain => "shared-brain",
        };
        f.write_str(name)
    }
}

/// Tracks the running task of each operation kind.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    running: Mutex<HashMap<OperationKind, (u64, AbortHandle)>>,
    next_id: AtomicU64,
}

impl OperationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` as the current operation of `kind`.
    ///
    /// Any earlier operation of the same kind that is still running is
    /// aborted and its caller receives [`ApiError::Cancelled`].
    pub async fn run<F, T>(&self, kind: OperationKind, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
        T: Send + 'static,
    {
        let (id, handle) = {
            let mut running = self.lock();
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let handle = tokio::spawn(operation);
            if let Some((_, previous)) = running.insert(kind, (id, handle.abort_handle())) {
                debug!(operation = %kind, "Superseding in-flight operation");
                previous.abort();
            }
            (id, handle)
        };

        let slot = RunningSlot {
            registry: self,
            kind,
            id,
            abort: handle.abort_handle(),
        };
        let outcome = handle.await;
        drop(slot);

        match outcome {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                debug!(operation = %kind, "Operation cancelled");
                Err(ApiError::Cancelled)
            }
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    /// Abort the running operation of `kind`, if any.
    pub fn cancel(&self, kind: OperationKind) -> bool {
        match self.lock().remove(&kind) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort everything, e.g. when leaving a view.
    pub fn cancel_all(&self) {
        for (kind, (_, handle)) in self.lock().drain() {
            debug!(operation = %kind, "Cancelling operation");
            handle.abort();
        }
    }

    /// Whether an operation of `kind` is in flight.
    pub fn is_running(&self, kind: OperationKind) -> bool {
        self.lock().contains_key(&kind)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<OperationKind, (u64, AbortHandle)>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registry entry of one `run` call. Dropping it (including when the
/// caller's future is dropped mid-flight) aborts the task and frees the slot
/// unless a newer operation has taken it.
struct RunningSlot<'a> {
    registry: &'a OperationRegistry,
    kind: OperationKind,
    id: u64,
    abort: AbortHandle,
}

impl Drop for RunningSlot<'_> {
    fn drop(&mut self) {
        self.abort.abort();
        let mut running = self.registry.lock();
        if running.get(&self.kind).is_some_and(|(current, _)| *current == self.id) {
            running.remove(&self.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn completed_operation_returns_its_result() {
        let registry = OperationRegistry::new();
        let value = registry
            .run(OperationKind::Search, async { Ok::<_, ApiError>(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert!(!registry.is_running(OperationKind::Search));
    }

    #[tokio::test]
    async fn second_operation_of_same_kind_cancels_first() {
        let registry = Arc::new(OperationRegistry::new());
        let (started_tx, started_rx) = oneshot::channel();

        let first = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .run(OperationKind::FetchContent, async move {
                        let _ = started_tx.send(());
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok::<_, ApiError>("stale")
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        let second = registry
            .run(OperationKind::FetchContent, async { Ok::<_, ApiError>("fresh") })
            .await
            .unwrap();

        assert_eq!(second, "fresh");
        assert!(first.await.unwrap().unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn different_kinds_do_not_interfere() {
        let registry = Arc::new(OperationRegistry::new());
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let search = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .run(OperationKind::Search, async move {
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        Ok::<_, ApiError>("answer")
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        registry
            .run(OperationKind::Share, async { Ok::<_, ApiError>(()) })
            .await
            .unwrap();
        assert!(registry.is_running(OperationKind::Search));

        release_tx.send(()).unwrap();
        assert_eq!(search.await.unwrap().unwrap(), "answer");
    }

    #[tokio::test]
    async fn cancel_all_aborts_running_operations() {
        let registry = Arc::new(OperationRegistry::new());
        let (started_tx, started_rx) = oneshot::channel();

        let pending = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .run(OperationKind::Share, async move {
                        let _ = started_tx.send(());
                        std::future::pending::<Result<(), ApiError>>().await
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        registry.cancel_all();
        assert!(pending.await.unwrap().unwrap_err().is_cancelled());
        assert!(!registry.cancel(OperationKind::Share));
    }

    #[tokio::test]
    async fn dropping_the_caller_aborts_its_operation() {
        let registry = Arc::new(OperationRegistry::new());
        let (started_tx, started_rx) = oneshot::channel();
        let (alive_tx, alive_rx) = oneshot::channel::<()>();

        let caller = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .run(OperationKind::FetchContent, async move {
                        let _alive = alive_tx;
                        let _ = started_tx.send(());
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok::<_, ApiError>(())
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        // The operation's future is dropped long before its sleep ends.
        let dropped = tokio::time::timeout(Duration::from_secs(5), alive_rx).await;
        assert!(dropped.is_ok());
        assert!(!registry.is_running(OperationKind::FetchContent));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn newest_of_many_concurrent_runs_survives() {
        let registry = Arc::new(OperationRegistry::new());
        let mut callers = Vec::new();
        for n in 0..16u32 {
            let registry = Arc::clone(&registry);
            callers.push(tokio::spawn(async move {
                registry
                    .run(OperationKind::Search, async move {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        Ok::<_, ApiError>(n)
                    })
                    .await
            }));
        }

        let mut finished = 0;
        for caller in callers {
            if caller.await.unwrap().is_ok() {
                finished += 1;
            }
        }
        // Every run but the last registered one was superseded.
        assert_eq!(finished, 1);
        assert!(!registry.is_running(OperationKind::Search));
    }

    #[test]
    fn every_kind_has_a_default_failure_message() {
        assert_eq!(OperationKind::Share.failure_message(), "Failed to share brain");
        assert_eq!(
            OperationKind::SharedBrain.failure_message(),
            "Failed to get shared brain"
        );
        assert_eq!(OperationKind::AddContent.to_string(), "add-content");
    }
}
