//! Per-run identity shared by every task of one run.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::{Bus, Event};

/// Global run id counter.
static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

/// Run id plus the bus its events go to.
///
/// Cheap to clone; every task spawned for a run carries one.
#[derive(Clone, Debug)]
pub(crate) struct RunContext {
    id: u64,
    bus: Bus,
}

impl RunContext {
    /// Allocates the next run id.
    pub(crate) fn new(bus: Bus) -> Self {
        Self {
            id: RUN_SEQ.fetch_add(1, Ordering::Relaxed),
            bus,
        }
    }

    #[cfg(test)]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Stamps the run id on `ev` and publishes it.
    pub(crate) fn publish(&self, ev: Event) {
        self.bus.publish(ev.with_run(self.id));
    }
}
