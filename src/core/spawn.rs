//! # Panic-safe spawning.
//!
//! Every task a run spawns (the producer and each worker) goes through here.
//! A panic inside the task is caught at the task boundary with `catch_unwind`
//! and published as an event; it never reaches the runtime or the caller.
//!
//! ```text
//! spawn_safe(fut) ──► tokio task ──► AssertUnwindSafe(fut).catch_unwind()
//!                                        ├─ Ok(())     → done
//!                                        └─ Err(panic) → publish TaskPanicked / ProducerPanicked
//! ```
//!
//! Returned `UnitError`s are not faults; they flow through the cancellation latch.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::{JoinHandle, JoinSet};

use crate::core::context::RunContext;
use crate::events::{Event, EventKind};

/// Which part of a run a spawned task belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Origin {
    Producer,
    /// Worker for the item at this index.
    Worker(u64),
}

impl Origin {
    fn fault(self, info: String) -> Event {
        match self {
            Origin::Producer => Event::new(EventKind::ProducerPanicked).with_reason(info),
            Origin::Worker(index) => Event::new(EventKind::TaskPanicked)
                .with_index(index)
                .with_reason(info),
        }
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Wraps `fut` so a panic is converted into a fault event for `ctx`.
fn guarded<F>(fut: F, origin: Origin, ctx: RunContext) -> impl Future<Output = ()> + Send + 'static
where
    F: Future<Output = ()> + Send + 'static,
{
    async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            ctx.publish(origin.fault(panic_message(panic.as_ref())));
        }
    }
}

/// Spawns a detached, panic-safe task.
pub(crate) fn spawn_safe<F>(fut: F, origin: Origin, ctx: RunContext) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(guarded(fut, origin, ctx))
}

/// Spawns a panic-safe task into `set`.
pub(crate) fn spawn_safe_in<F>(set: &mut JoinSet<()>, fut: F, origin: Origin, ctx: RunContext)
where
    F: Future<Output = ()> + Send + 'static,
{
    set.spawn(guarded(fut, origin, ctx));
}
