use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info_span};
use uuid::Uuid;

use crate::error::LendingError;

/// Stand-in deadline for delays past what the clock can represent (~30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Correlates a scheduled task with its log lines. Not a cancellation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Runs one-shot work after a delay on the tokio runtime.
///
/// Pending tasks belong to this scheduler: `shutdown` or dropping it aborts
/// them, and they never keep the runtime alive on their own. Nothing is
/// persisted or retried, so a pending transition is simply lost on shutdown.
#[derive(Default)]
pub struct DelayedTransitionScheduler {
    tasks: Mutex<JoinSet<()>>,
}

impl DelayedTransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` exactly once after `delay`. Errors are logged, never returned.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, work: F) -> TaskId
    where
        F: Future<Output = Result<(), LendingError>> + Send + 'static,
    {
        let task_id = TaskId(Uuid::now_v7());
        let now = tokio::time::Instant::now();
        let deadline = now.checked_add(delay).unwrap_or(now + FAR_FUTURE);
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let span = info_span!("deferred_transition", %task_id, delay_ms);
        let mut tasks = self.tasks();
        reap(&mut tasks);
        tasks.spawn(
            async move {
                tokio::time::sleep_until(deadline).await;
                match work.await {
                    Ok(()) => debug!("deferred transition done"),
                    Err(e) => error!(error = ?e, kind = e.kind(), "deferred transition failed"),
                }
            }
            .instrument(span),
        );
        debug!(%task_id, pending = tasks.len(), "deferred transition scheduled");
        task_id
    }

    /// Number of tasks that have not fired yet.
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks();
        reap(&mut tasks);
        tasks.len()
    }

    /// Abort every pending task. The scheduler stays usable afterwards.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks();
        if !tasks.is_empty() {
            debug!(dropped = tasks.len(), "dropping pending deferred transitions");
        }
        tasks.abort_all();
        reap(&mut tasks);
    }

    fn tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for DelayedTransitionScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedTransitionScheduler")
            .field("tasks", &self.tasks().len())
            .finish()
    }
}

fn reap(tasks: &mut JoinSet<()>) {
    while tasks.try_join_next().is_some() {}
}
