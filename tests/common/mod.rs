#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use taskfan::{Event, EventKind, Subscribe, UnitError, UnitFn, UnitRef};

/// Subscriber that keeps every event it sees.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        let mut events = self.events.lock().unwrap().clone();
        events.sort_by_key(|e| e.seq);
        events
    }

    pub fn of_kind(&self, kind: EventKind) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect()
    }

    /// Indexes of units that actually started, in start order.
    pub fn started(&self) -> Vec<u64> {
        self.of_kind(EventKind::UnitStarting)
            .iter()
            .filter_map(|e| e.index)
            .collect()
    }
}

#[async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, ev: &Event) {
        self.events.lock().unwrap().push(ev.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }

    fn queue_capacity(&self) -> usize {
        4096
    }
}

/// Tracks how many units are mid-execution and the highest value ever seen.
#[derive(Default)]
pub struct Gauge {
    active: AtomicUsize,
    peak: AtomicUsize,
    runs: AtomicUsize,
}

impl Gauge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.runs.fetch_add(1, Ordering::SeqCst);
    }

    pub fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

/// `n` units that sleep for `pause` while counted by `gauge`; unit `fail_at` returns "boom".
pub fn units(n: usize, fail_at: Option<usize>, pause: Duration, gauge: &Arc<Gauge>) -> Vec<UnitRef> {
    (0..n)
        .map(move |i| {
            let gauge = Arc::clone(gauge);
            UnitFn::boxed(format!("unit-{i}"), move || async move {
                gauge.enter();
                tokio::time::sleep(pause).await;
                gauge.leave();
                if fail_at == Some(i) {
                    return Err(UnitError::fail("boom"));
                }
                Ok(())
            })
        })
        .collect()
}
