//! # Sequential executor.
//!
//! Same producer/dispatcher plumbing as the concurrent mode, serialized by a gate:
//!
//! ```text
//! producer:  lock gate ─► send Job{gate guard} ─► lock gate (waits) ─► ...
//! worker:                 execute(job) ─► report outcome ─► drop guard ─┘
//! ```
//!
//! The guard travels inside the [`Job`], so at most one unit executes at a time
//! and units execute in generation order. After a failure the next job is sent
//! only once the latch is already closed: the dispatcher drains it, dropping its
//! guard, and the producer runs through the rest without executing anything.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::job::Job;
use crate::core::producer::Source;
use crate::units::UnitRef;

/// Generator for the sequential mode: one gate lock per unit, held by the job.
pub(crate) async fn produce_gated(units: Vec<UnitRef>, source: Source<Job>) {
    let gate = Arc::new(Mutex::new(()));
    for (index, unit) in units.into_iter().enumerate() {
        let guard = Arc::clone(&gate).lock_owned().await;
        if source.send(Job::gated(index, unit, guard)).await.is_err() {
            break;
        }
    }
}
