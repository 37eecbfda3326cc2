//! # Job: one work unit in flight, and how a worker executes it.
//!
//! ```text
//! execute(job)
//!   ├─ latch closed?  → publish UnitSkipped (unit dropped, never called)
//!   ├─ publish UnitStarting
//!   ├─ unit.call().await
//!   │     ├─ Ok  → publish UnitCompleted
//!   │     └─ Err → publish UnitFailed
//!   │              └─ cancel(err) won? → publish RunCancelled
//!   └─ release the sequential gate (if the job carries one)
//! ```

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;

use crate::core::context::RunContext;
use crate::core::latch::Cancel;
use crate::core::producer::Source;
use crate::events::{Event, EventKind};
use crate::units::UnitRef;

/// A unit tagged with its position in generation order.
pub(crate) struct Job {
    pub(crate) index: u64,
    pub(crate) unit: UnitRef,
    /// Sequential gate held from send until execution finished.
    pub(crate) gate: Option<OwnedMutexGuard<()>>,
}

impl Job {
    pub(crate) fn new(index: usize, unit: UnitRef) -> Self {
        Self {
            index: index as u64,
            unit,
            gate: None,
        }
    }

    pub(crate) fn gated(index: usize, unit: UnitRef, gate: OwnedMutexGuard<()>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(index, unit)
        }
    }
}

/// Generator for the concurrent mode: sends every unit in list order.
pub(crate) async fn produce(units: Vec<UnitRef>, source: Source<Job>) {
    for (index, unit) in units.into_iter().enumerate() {
        if source.send(Job::new(index, unit)).await.is_err() {
            break;
        }
    }
}

/// Executes one job and reports its outcome to the latch.
pub(crate) async fn execute(job: Job, cancel: Cancel, ctx: RunContext) {
    let Job { index, unit, gate } = job;
    let name: Arc<str> = Arc::from(unit.name());

    if cancel.is_cancelled() {
        ctx.publish(
            Event::new(EventKind::UnitSkipped)
                .with_unit(name)
                .with_index(index),
        );
        drop(gate);
        return;
    }

    ctx.publish(
        Event::new(EventKind::UnitStarting)
            .with_unit(Arc::clone(&name))
            .with_index(index),
    );

    match unit.call().await {
        Ok(()) => {
            ctx.publish(
                Event::new(EventKind::UnitCompleted)
                    .with_unit(name)
                    .with_index(index),
            );
        }
        Err(err) => {
            let reason: Arc<str> = Arc::from(err.to_string());
            ctx.publish(
                Event::new(EventKind::UnitFailed)
                    .with_unit(Arc::clone(&name))
                    .with_index(index)
                    .with_reason(Arc::clone(&reason)),
            );
            if cancel.cancel(err) {
                ctx.publish(
                    Event::new(EventKind::RunCancelled)
                        .with_unit(name)
                        .with_index(index)
                        .with_reason(reason),
                );
            }
        }
    }

    // Released only after the outcome is recorded, so the next sequential
    // job cannot slip past a failure.
    drop(gate);
}
