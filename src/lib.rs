//! # taskfan
//!
//! **Taskfan** is a bounded concurrent task runner for tokio.
//!
//! Give it a list of independent, fallible units of work. It runs them on a pool of
//! at most `workers` concurrent tasks, stops dispatching as soon as one fails, and
//! returns that first failure. A sequential mode runs the same kind of list strictly
//! one unit at a time, in order, over the same producer/dispatcher plumbing.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     caller: Vec<UnitRef>
//!            │
//!            ▼
//!     ┌──────────────┐  Source<T>   ┌──────────────────┐  permit (≤ workers)  ┌──────────┐
//!     │   Producer   │ ───────────► │    Dispatcher    │ ───────────────────► │  Worker  │ ×N
//!     │ (generator)  │ handoff queue│ (admission loop) │   spawn_safe_in      │ (1 unit) │
//!     └──────────────┘              └────────┬─────────┘                      └────┬─────┘
//!                                            │ latch closed?                       │ Err(e)
//!                                            ▼                                     ▼
//!                                    ┌──────────────┐     cancel(e), first wins  ┌──────────────┐
//!                                    │    Drain     │ ◄───────────────────────── │ CancelLatch  │
//!                                    │ (discard all)│                            └──────────────┘
//!                                    └──────────────┘
//!
//!   every stage ── publish(Event) ──► Bus ──► listener ──► SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ### Lifecycle of one run
//! ```text
//! Idle ──► Running ──┬──► Completed   (queue closed, every worker joined, no failure)
//!                    └──► Cancelled   (first failure recorded; queue drained; workers joined)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / functions                         |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------------|
//! | **Runs**          | Bounded concurrent and strictly sequential execution.        | [`run_concurrent`], [`run_sequential`], [`Runner`] |
//! | **Generic runs**  | Custom generator + mapper over any item type.                | [`Runner::map_void`], [`Source`], [`Cancel`]  |
//! | **Units**         | Define units as closures or trait impls.                     | [`Unit`], [`UnitFn`], [`UnitRef`]             |
//! | **Errors**        | First unit failure is the run outcome.                       | [`UnitError`]                                 |
//! | **Subscriber API**| Observe run events (logging, metrics, tests).                | [`Subscribe`], [`Event`], [`EventKind`]       |
//! | **Configuration** | Worker count, handoff capacity, bus capacity.                | [`RunConfig`]                                 |
//!
//! ## Optional features
//! - `logging` _(default)_: exports [`LogWriter`], which forwards events to `tracing`,
//!   and attaches it to the runners used by the free functions.
//!
//! ## Example
//! ```rust
//! use taskfan::{RunConfig, UnitError, UnitFn, UnitRef, run_concurrent, run_sequential};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), UnitError> {
//!     let units: Vec<UnitRef> = (0..5)
//!         .map(|i| UnitFn::boxed(format!("step-{i}"), move || async move {
//!             if i == 2 {
//!                 return Err(UnitError::fail("boom"));
//!             }
//!             Ok(())
//!         }))
//!         .collect();
//!
//!     // Steps 0, 1 and 2 run; 3 and 4 never do.
//!     let err = run_sequential(units).await.unwrap_err();
//!     assert_eq!(err.as_message(), "boom");
//!
//!     let ok: Vec<UnitRef> = (0..5)
//!         .map(|i| UnitFn::boxed(format!("job-{i}"), || async { Ok::<_, UnitError>(()) }))
//!         .collect();
//!     run_concurrent(ok, RunConfig::new(2)).await
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod subscribers;
mod units;

// ---- Public re-exports ----

pub use config::{DEFAULT_WORKERS, RunConfig};
pub use core::{Cancel, Runner, RunnerBuilder, Source, run_concurrent, run_sequential};
pub use error::{SourceClosed, UnitError};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};
pub use units::{BoxUnitFuture, Unit, UnitFn, UnitRef};

// Built-in `tracing` subscriber.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
