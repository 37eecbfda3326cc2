//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and the
//! built-in [`LogWriter`] for handling events published on the [`Bus`](crate::events::Bus).
//!
//! Subscribers are the injectable replacement for process-wide logging: a run never
//! prints anything itself, it publishes events and whoever is subscribed decides what
//! to do with them (log, count, assert in tests).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   worker ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                                                         │
//!                                               ┌─────────┼─────────┐
//!                                               ▼         ▼         ▼
//!                                           LogWriter  Metrics   Custom ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
