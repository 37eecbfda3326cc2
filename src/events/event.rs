//! # Runtime events emitted by runs and their workers.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Run events**: run lifecycle (started, cancelled, drained, finished)
//! - **Unit events**: unit execution flow (starting, completed, failed, skipped)
//! - **Fault events**: panics contained at a task boundary
//! - **Subscriber events**: delivery problems inside the subscriber set
//!
//! The [`Event`] struct carries additional metadata such as timestamps, run id,
//! unit name and index, and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskfan::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::UnitFailed)
//!     .with_run(7)
//!     .with_unit("resize")
//!     .with_index(2)
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::UnitFailed);
//! assert_eq!(ev.unit.as_deref(), Some("resize"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Run events ===
    /// A run entered `Running`.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `count`: effective worker count
    RunStarted,

    /// The cancellation latch closed on the first failure; no further units are dispatched.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `unit`, `index`: the failing unit
    /// - `reason`: the failure that became the run outcome
    RunCancelled,

    /// Items still queued after cancellation were discarded without executing.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `count`: number of discarded items
    QueueDrained,

    /// The run reached its terminal state and every worker has been joined.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `reason`: the returned failure (absent on success)
    RunFinished,

    // === Unit events ===
    /// A worker is about to execute a unit.
    ///
    /// Sets:
    /// - `run`, `unit`, `index`
    UnitStarting,

    /// A unit returned `Ok(())`.
    ///
    /// Sets:
    /// - `run`, `unit`, `index`
    UnitCompleted,

    /// A unit returned an error. Published for every failure, including
    /// the ones discarded by the latch.
    ///
    /// Sets:
    /// - `run`, `unit`, `index`
    /// - `reason`: failure message
    UnitFailed,

    /// A unit reached a worker after the latch closed and was not executed.
    ///
    /// Sets:
    /// - `run`, `unit`, `index`
    UnitSkipped,

    // === Fault events ===
    /// A worker task panicked; the panic was contained.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `index`: item index in generation order
    /// - `reason`: panic message
    TaskPanicked,

    /// The generator panicked; the handoff queue was closed with the items produced so far.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `reason`: panic message
    ProducerPanicked,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the run that emitted the event.
    pub run: Option<u64>,
    /// Name of the unit, if applicable.
    pub unit: Option<Arc<str>>,
    /// Zero-based position of the item in generation order.
    pub index: Option<u64>,
    /// Human-readable reason (errors, panic messages, overflow details).
    pub reason: Option<Arc<str>>,
    /// Kind-specific counter (worker count, drained items).
    pub count: Option<u64>,
    /// Name of the subscriber, for subscriber events.
    pub subscriber: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            run: None,
            unit: None,
            index: None,
            reason: None,
            count: None,
            subscriber: None,
        }
    }

    /// Attaches a run id.
    #[inline]
    pub fn with_run(mut self, run: u64) -> Self {
        self.run = Some(run);
        self
    }

    /// Attaches a unit name.
    #[inline]
    pub fn with_unit(mut self, unit: impl Into<Arc<str>>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Attaches the item index.
    #[inline]
    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a counter.
    #[inline]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"));
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.subscriber = Some(subscriber);
        ev
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    /// True for contained panics of workers or the producer.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TaskPanicked | EventKind::ProducerPanicked
        )
    }
}
