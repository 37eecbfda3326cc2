//! # Run configuration.
//!
//! Provides [`RunConfig`] the settings applied to one run.
//!
//! Config is used in two ways:
//! 1. **Runner creation**: `Runner::builder(config)`
//! 2. **Free functions**: `run_concurrent(units, config)`
//!
//! ## Sentinel values
//! - `workers = 0` → clamped to 1 (a run always has at least one worker)
//! - `queue_capacity = 0` → unbounded handoff queue (producer never suspends on send)
//! - `bus_capacity = 0` → clamped to 1

/// Worker count used when none is specified.
pub const DEFAULT_WORKERS: usize = 20;

/// Configuration for a single run.
///
/// ## Field semantics
/// - `workers`: Maximum number of units executing at the same time (min 1; clamped)
/// - `queue_capacity`: Handoff queue capacity between producer and dispatcher (`0` = unbounded)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum number of concurrently executing units.
    ///
    /// Enforced by an admission semaphore of this size. For finite batches
    /// [`RunConfig::for_batch`] sets it to the batch length so no unit waits for a slot.
    pub workers: usize,

    /// Capacity of the producer → dispatcher handoff queue.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = the producer suspends while `n` items are waiting
    pub queue_capacity: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Only relevant when subscribers are attached. A listener that lags behind more
    /// than `bus_capacity` events skips the oldest ones.
    pub bus_capacity: usize,
}

impl RunConfig {
    /// Creates a config with the given worker count and an unbounded handoff queue.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// Creates a config sized for a finite batch of `len` units (`workers = len`).
    pub fn for_batch(len: usize) -> Self {
        Self::new(len)
    }

    /// Sets the handoff queue capacity (`0` = unbounded).
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Returns the worker count clamped to a minimum of 1.
    #[inline]
    pub fn workers_clamped(&self) -> usize {
        self.workers.max(1)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the handoff capacity as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → bounded to `n`
    #[inline]
    pub fn handoff_capacity(&self) -> Option<usize> {
        if self.queue_capacity == 0 {
            None
        } else {
            Some(self.queue_capacity)
        }
    }
}

impl Default for RunConfig {
    /// Default configuration:
    ///
    /// - `workers = 20`
    /// - `queue_capacity = 0` (unbounded)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: 0,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.workers, 20);
        assert_eq!(cfg.handoff_capacity(), None);
        assert_eq!(cfg.bus_capacity, 1024);
    }

    #[test]
    fn test_zero_workers_clamped() {
        assert_eq!(RunConfig::new(0).workers_clamped(), 1);
        assert_eq!(RunConfig::for_batch(0).workers_clamped(), 1);
        assert_eq!(RunConfig::for_batch(7).workers_clamped(), 7);
        assert_eq!(
            RunConfig {
                bus_capacity: 0,
                ..RunConfig::default()
            }
            .bus_capacity_clamped(),
            1
        );
    }

    #[test]
    fn test_bounded_handoff() {
        let cfg = RunConfig::new(4).with_queue_capacity(2);
        assert_eq!(cfg.handoff_capacity(), Some(2));
        assert_eq!(cfg.workers, 4);
    }
}
