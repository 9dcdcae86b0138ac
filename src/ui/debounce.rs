//! Cancellable scheduled task.
//!
//! Each [`Debouncer::schedule`] replaces whatever was pending: a task still
//! waiting out its delay is cancelled, a task that already fired runs to
//! completion. So overlapping triggers collapse into one, and a search that
//! has started is never cut off halfway. Only [`Debouncer::abort`] stops a
//! task that already fired.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const WAITING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

struct Pending {
    handle: JoinHandle<()>,
    state: Arc<AtomicU8>,
}

impl Pending {
    /// Cancel if still waiting. Returns whether the task was stopped.
    fn cancel(&self) -> bool {
        let stopped = self
            .state
            .compare_exchange(WAITING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if stopped {
            self.handle.abort();
        }
        stopped
    }
}

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the quiet period unless rescheduled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = Arc::new(AtomicU8::new(WAITING));
        let delay = self.delay;
        let task_state = state.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task_state
                .compare_exchange(WAITING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            task.await;
        });

        let previous = self.pending.lock().replace(Pending { handle, state });
        if let Some(previous) = previous {
            if previous.cancel() {
                log::trace!("debounced task superseded");
            }
        }
    }

    /// Drop the pending task if it has not fired yet.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.cancel();
        }
    }

    /// Stop the latest task whether or not it has fired yet.
    pub fn abort(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.state.store(CANCELLED, Ordering::Release);
            pending.handle.abort();
        }
    }

    /// A task is scheduled and still inside its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|p| p.state.load(Ordering::Acquire) == WAITING)
    }

    /// Wait for the most recently scheduled task to fire and finish.
    /// Returns immediately when nothing is scheduled.
    pub async fn flush(&self) {
        let pending = self.pending.lock().take();
        let Some(pending) = pending else {
            return;
        };
        if let Err(e) = pending.handle.await {
            if e.is_panic() {
                log::error!("debounced task panicked: {}", e);
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
