//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the producer, dispatcher, workers,
//! the cancellation latch and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Runner::map_void`, `dispatcher::dispatch`, unit workers,
//!   `spawn::spawn_safe` (panics), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the runner's listener task, which fans out to `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
