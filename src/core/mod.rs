//! Runtime core: producer, dispatcher, cancellation and the runner.
//!
//! The public API from this module is [`Runner`] (plus its builder), the free
//! functions [`run_concurrent`] / [`run_sequential`], and the handles given to
//! custom generators and mappers ([`Source`], [`Cancel`]).
//!
//! Internal modules:
//! - [`spawn`]: panic-safe spawning of producer and worker tasks;
//! - [`producer`]: generator task and the handoff queue;
//! - [`latch`]: first-error-wins cancellation latch;
//! - [`dispatcher`]: bounded worker pool, drain on cancellation;
//! - [`job`]: executing one unit and reporting its outcome;
//! - [`sequential`]: gated generator for strict in-order execution;
//! - [`runner`]: run orchestration and event listener.

mod builder;
mod context;
mod dispatcher;
mod job;
mod latch;
mod producer;
mod runner;
mod sequential;
mod spawn;

pub use builder::RunnerBuilder;
pub use latch::Cancel;
pub use producer::Source;
pub use runner::{Runner, run_concurrent, run_sequential};

pub(crate) use spawn::panic_message;
