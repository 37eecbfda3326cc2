//! # LogWriter: forwards events to `tracing`
//!
//! A subscriber that turns every [`Event`] into a structured `tracing` record.
//! Faults and failures are logged at `warn`, drains and cancellations at `info`,
//! per-unit progress at `debug`.
//!
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt()`) to see the output.

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let unit = e.unit.as_deref().unwrap_or("unknown");
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::RunStarted => {
                tracing::debug!(run = ?e.run, workers = ?e.count, "run started");
            }
            EventKind::RunCancelled => {
                tracing::info!(run = ?e.run, unit, index = ?e.index, reason, "run cancelled");
            }
            EventKind::QueueDrained => {
                tracing::info!(run = ?e.run, discarded = ?e.count, "queue drained");
            }
            EventKind::RunFinished => match &e.reason {
                Some(reason) => tracing::debug!(run = ?e.run, reason = %reason, "run failed"),
                None => tracing::debug!(run = ?e.run, "run completed"),
            },
            EventKind::UnitStarting => {
                tracing::debug!(run = ?e.run, unit, index = ?e.index, "unit starting");
            }
            EventKind::UnitCompleted => {
                tracing::debug!(run = ?e.run, unit, index = ?e.index, "unit completed");
            }
            EventKind::UnitFailed => {
                tracing::warn!(run = ?e.run, unit, index = ?e.index, reason, "unit failed");
            }
            EventKind::UnitSkipped => {
                tracing::debug!(run = ?e.run, unit, index = ?e.index, "unit skipped");
            }
            EventKind::TaskPanicked => {
                tracing::warn!(run = ?e.run, index = ?e.index, reason, "worker panicked");
            }
            EventKind::ProducerPanicked => {
                tracing::warn!(run = ?e.run, reason, "producer panicked; input truncated");
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    reason,
                    "subscriber panicked"
                );
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    reason,
                    "subscriber dropped event"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
