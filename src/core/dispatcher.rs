//! # Dispatcher: bounded worker pool with first-error cancellation.
//!
//! Pulls items from the [`Handoff`] and runs each one on its own panic-safe worker,
//! never more than `workers` at a time.
//!
//! ## Flow
//! ```text
//! loop {
//!   ├─► acquire admission permit        (races latch.closed(), latch wins)
//!   ├─► handoff.recv()                  (races latch.closed(), latch wins)
//!   │      └─ None → queue closed, stop admitting
//!   └─► spawn_safe_in(set, mapper(item, cancel))   permit released on exit
//! }
//! if latch closed:
//!   └─► drain: recv + drop until the producer closes the queue → QueueDrained
//! join every in-flight worker
//! return latch.take()  (None → Ok)
//! ```
//!
//! ## Rules
//! - Items admitted after the latch closes are never dispatched.
//! - Workers already running when the latch closes run to completion.
//! - The drain runs on every cancellation so a producer blocked on a full
//!   queue (or on the sequential gate) always gets to finish.
//! - No ordering between workers.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::context::RunContext;
use crate::core::latch::{Cancel, CancelLatch};
use crate::core::producer::Handoff;
use crate::core::spawn::{Origin, spawn_safe_in};
use crate::error::UnitError;
use crate::events::{Event, EventKind};

/// Runs `mapper` over every item of `handoff` with at most `workers` active at once.
///
/// Returns the first failure reported through [`Cancel`], or `Ok(())`.
pub(crate) async fn dispatch<T, M, Fut>(
    mut handoff: Handoff<T>,
    mapper: M,
    workers: usize,
    latch: Arc<CancelLatch>,
    ctx: &RunContext,
) -> Result<(), UnitError>
where
    T: Send + 'static,
    M: Fn(T, Cancel) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mapper = Arc::new(mapper);
    let slots = Arc::new(Semaphore::new(workers.max(1)));
    let mut set = JoinSet::new();
    let mut index: u64 = 0;

    loop {
        let permit = tokio::select! {
            biased;
            _ = latch.closed() => break,
            res = Arc::clone(&slots).acquire_owned() => match res {
                Ok(permit) => permit,
                Err(_closed) => break,
            },
        };

        let item = tokio::select! {
            biased;
            _ = latch.closed() => break,
            item = handoff.recv() => match item {
                Some(item) => item,
                None => break,
            },
        };

        let cancel = Cancel::new(Arc::clone(&latch));
        let mapper = Arc::clone(&mapper);
        spawn_safe_in(
            &mut set,
            async move {
                let _permit = permit;
                mapper(item, cancel).await;
            },
            Origin::Worker(index),
            ctx.clone(),
        );
        index += 1;

        // Reap finished workers so the set does not grow with the input.
        while set.try_join_next().is_some() {}
    }

    if latch.is_closed() {
        let discarded = drain(&mut handoff).await;
        if discarded > 0 {
            ctx.publish(Event::new(EventKind::QueueDrained).with_count(discarded));
        }
    }

    while set.join_next().await.is_some() {}

    match latch.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Receives and drops items until the producer closes the queue.
async fn drain<T>(handoff: &mut Handoff<T>) -> u64 {
    let mut discarded = 0;
    while let Some(item) = handoff.recv().await {
        drop(item);
        discarded += 1;
    }
    discarded
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::producer::channel;
    use crate::events::Bus;

    #[tokio::test]
    async fn test_closed_queue_without_failure_is_ok() {
        let ctx = RunContext::new(Bus::new(4));
        let (source, handoff) = channel::<u32>(None);
        for i in 0..5 {
            source.send(i).await.unwrap();
        }
        drop(source);

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let res = dispatch(
            handoff,
            move |_item, _cancel| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
            2,
            Arc::new(CancelLatch::new()),
            &ctx,
        )
        .await;

        assert!(res.is_ok());
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_closed_latch_drains_without_dispatching() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let ctx = RunContext::new(bus);
        let (source, handoff) = channel::<u32>(None);
        for i in 0..3 {
            source.send(i).await.unwrap();
        }
        drop(source);

        let latch = Arc::new(CancelLatch::new());
        latch.close(UnitError::fail("early"));

        let dispatched = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&dispatched);
        let res = dispatch(
            handoff,
            move |_item, _cancel| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {}
            },
            4,
            latch,
            &ctx,
        )
        .await;

        assert_eq!(res.unwrap_err().as_message(), "early");
        assert_eq!(dispatched.load(Ordering::SeqCst), 0);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::QueueDrained);
        assert_eq!(ev.count, Some(3));
    }
}
