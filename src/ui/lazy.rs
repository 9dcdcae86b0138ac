//! Build-once lazy initialization.
//!
//! ```text
//! Uninitialized ──ensure_ready──▶ Initializing ──ok──▶ Ready
//!                                      │
//!                                      └──err──▶ Failed (terminal)
//! ```
//!
//! While `Initializing`, every caller awaits the same shared future, so a
//! burst of interactions builds the index once. When the build settles the
//! cached future is dropped and the outcome is recorded. A failure is not
//! retried.

use crate::SearchError;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::fmt;

type InitFuture = Shared<BoxFuture<'static, Result<(), SearchError>>>;

/// Observable lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

enum Slot {
    Uninitialized,
    Initializing(InitFuture),
    Ready,
    Failed(SearchError),
}

pub struct LazyInit {
    slot: Mutex<Slot>,
}

impl Default for LazyInit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LazyInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyInit").field("phase", &self.phase()).finish()
    }
}

impl LazyInit {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Uninitialized),
        }
    }

    pub fn phase(&self) -> InitPhase {
        match &*self.slot.lock() {
            Slot::Uninitialized => InitPhase::Uninitialized,
            Slot::Initializing(_) => InitPhase::Initializing,
            Slot::Ready => InitPhase::Ready,
            Slot::Failed(_) => InitPhase::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == InitPhase::Ready
    }

    /// The recorded failure, if initialization failed.
    pub fn failure(&self) -> Option<SearchError> {
        match &*self.slot.lock() {
            Slot::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Handle to the build currently in flight, if any. Two handles taken
    /// during the same build compare equal with [`Shared::ptr_eq`].
    pub fn in_flight(&self) -> Option<InitFuture> {
        match &*self.slot.lock() {
            Slot::Initializing(future) => Some(future.clone()),
            _ => None,
        }
    }

    /// Resolve once the build has finished.
    ///
    /// `start` is called only if nothing has started yet; everyone else
    /// joins the in-flight build or reads the recorded outcome.
    pub async fn ensure_ready<F>(&self, start: F) -> Result<(), SearchError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<(), SearchError>>,
    {
        let future = {
            let mut slot = self.slot.lock();
            match &*slot {
                Slot::Ready => return Ok(()),
                Slot::Failed(e) => return Err(e.clone()),
                Slot::Initializing(future) => future.clone(),
                Slot::Uninitialized => {
                    let future = start().shared();
                    *slot = Slot::Initializing(future.clone());
                    future
                }
            }
        };

        let outcome = future.clone().await;

        let mut slot = self.slot.lock();
        // First waiter back records the outcome
        if let Slot::Initializing(current) = &*slot {
            if current.ptr_eq(&future) {
                *slot = match &outcome {
                    Ok(()) => Slot::Ready,
                    Err(e) => Slot::Failed(e.clone()),
                };
            }
        }
        outcome
    }
}
