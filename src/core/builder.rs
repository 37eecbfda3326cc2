use std::sync::Arc;

use crate::{
    config::RunConfig,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};
use super::runner::Runner;

/// Builder for constructing a [`Runner`] with optional subscribers.
pub struct RunnerBuilder {
    cfg: RunConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RunnerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: RunConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive run events (unit lifecycle, cancellation, contained panics)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds a single subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the runner.
    ///
    /// With subscribers attached this spawns the listener and subscriber workers,
    /// so it must be called from within a tokio runtime.
    pub fn build(self) -> Runner {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = if self.subscribers.is_empty() {
            None
        } else {
            Some(SubscriberSet::new(self.subscribers, bus.clone()))
        };
        Runner::new_internal(self.cfg, bus, subs)
    }
}
