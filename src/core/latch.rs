//! # Cancellation latch: first error wins.
//!
//! [`CancelLatch`] records the first failure reported during a run and fires a
//! [`CancellationToken`] exactly once. Every later report is a no-op.
//!
//! ```text
//!            close(err)               close(_)
//!   Open ───────────────► Closed ─────────────► Closed (ignored)
//!            slot = err
//!            token.cancel()
//! ```
//!
//! The slot and the open/closed decision share one mutex, so two workers
//! failing at the same instant can never both believe they were first.

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::error::UnitError;

/// Flip-once holder of a run's first failure.
#[derive(Debug, Default)]
pub(crate) struct CancelLatch {
    token: CancellationToken,
    first: Mutex<Option<UnitError>>,
}

impl CancelLatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `err` if the latch is still open and fires the stop signal.
    ///
    /// Returns `true` only for the call that closed the latch.
    pub(crate) fn close(&self, err: UnitError) -> bool {
        let mut first = self.first.lock().unwrap_or_else(PoisonError::into_inner);
        if self.token.is_cancelled() {
            return false;
        }
        *first = Some(err);
        self.token.cancel();
        true
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once the latch has closed.
    pub(crate) async fn closed(&self) {
        self.token.cancelled().await
    }

    /// Takes the recorded failure, leaving the latch closed.
    pub(crate) fn take(&self) -> Option<UnitError> {
        self.first
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Handle given to every mapper invocation to report a failure.
///
/// Cloning is cheap; all clones of one run share the same latch.
#[derive(Clone, Debug)]
pub struct Cancel {
    latch: Arc<CancelLatch>,
}

impl Cancel {
    pub(crate) fn new(latch: Arc<CancelLatch>) -> Self {
        Self { latch }
    }

    /// Reports a failure. The first report becomes the run outcome and stops
    /// further dispatch; later reports are discarded.
    ///
    /// Returns `true` if this call's error became the run outcome.
    pub fn cancel(&self, err: UnitError) -> bool {
        self.latch.close(err)
    }

    /// Returns `true` once any failure has been reported for the run.
    pub fn is_cancelled(&self) -> bool {
        self.latch.is_closed()
    }
}
