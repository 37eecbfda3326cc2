//! # Runner: owns configuration and observability, drives runs.
//!
//! The [`Runner`] holds a [`RunConfig`], the event [`Bus`] and (when subscribers are
//! attached) a listener task that fans events out through a [`SubscriberSet`].
//! A runner can drive any number of runs, sequentially or concurrently.
//!
//! ## High-level architecture
//! ```text
//! run_concurrent(units) / run_sequential(units) / map_void(generate, mapper)
//!     │
//!     ├─► RunContext::new(bus)                     (fresh run id)
//!     ├─► publish RunStarted
//!     ├─► spawn_producer(generate)  ──► Handoff ──► dispatch(mapper, workers, latch)
//!     │                                               ├─ workers: spawn_safe_in(...)
//!     │                                               ├─ first error → latch → drain
//!     │                                               └─ join in-flight workers
//!     ├─► await producer task
//!     └─► publish RunFinished, return first error or Ok(())
//!
//! Event flow:
//!   producer / workers ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//! ```
//!
//! ## Example
//! ```rust
//! use taskfan::{RunConfig, Runner, UnitError, UnitFn, UnitRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), UnitError> {
//!     let runner = Runner::builder(RunConfig::new(4)).build();
//!
//!     let units: Vec<UnitRef> = (0..8)
//!         .map(|i| UnitFn::boxed(format!("unit-{i}"), move || async move { Ok::<_, UnitError>(()) }))
//!         .collect();
//!
//!     runner.run_concurrent(units).await?;
//!     runner.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::RunConfig;
use crate::core::builder::RunnerBuilder;
use crate::core::context::RunContext;
use crate::core::dispatcher::dispatch;
use crate::core::job::{self, Job};
use crate::core::latch::{Cancel, CancelLatch};
use crate::core::producer::{Source, spawn_producer};
use crate::core::sequential;
use crate::error::UnitError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::SubscriberSet;
use crate::units::UnitRef;

/// Bounded concurrent task runner.
pub struct Runner {
    cfg: RunConfig,
    bus: Bus,
    closing: CancellationToken,
    listener: Option<JoinHandle<()>>,
}

impl Runner {
    /// Starts building a runner with the given configuration.
    pub fn builder(cfg: RunConfig) -> RunnerBuilder {
        RunnerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: RunConfig, bus: Bus, subs: Option<SubscriberSet>) -> Self {
        let closing = CancellationToken::new();
        let listener = subs.map(|set| {
            let rx = bus.subscribe();
            tokio::spawn(listen(rx, set, closing.clone()))
        });
        Self {
            cfg,
            bus,
            closing,
            listener,
        }
    }

    /// Returns the runner's configuration.
    pub fn config(&self) -> &RunConfig {
        &self.cfg
    }

    /// Returns the event bus, e.g. to subscribe a raw receiver.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Executes all units with at most `config().workers` running at once.
    ///
    /// Returns `Ok(())` if every unit succeeded, otherwise the first reported failure.
    /// Units still queued when the failure is recorded are discarded without running;
    /// units already running are awaited before this returns.
    pub async fn run_concurrent(&self, units: Vec<UnitRef>) -> Result<(), UnitError> {
        if units.is_empty() {
            return Ok(());
        }
        let ctx = RunContext::new(self.bus.clone());
        let worker_ctx = ctx.clone();
        self.run_with(
            ctx,
            self.cfg.workers_clamped(),
            move |source: Source<Job>| job::produce(units, source),
            move |item: Job, cancel: Cancel| job::execute(item, cancel, worker_ctx.clone()),
        )
        .await
    }

    /// Executes all units strictly one after another, in list order.
    ///
    /// Returns `Ok(())` if every unit succeeded, otherwise the failure of the first
    /// failing unit; no unit after it is executed.
    pub async fn run_sequential(&self, units: Vec<UnitRef>) -> Result<(), UnitError> {
        if units.is_empty() {
            return Ok(());
        }
        let ctx = RunContext::new(self.bus.clone());
        let worker_ctx = ctx.clone();
        let workers = units.len();
        self.run_with(
            ctx,
            workers,
            move |source: Source<Job>| sequential::produce_gated(units, source),
            move |item: Job, cancel: Cancel| job::execute(item, cancel, worker_ctx.clone()),
        )
        .await
    }

    /// Generic producer/mapper run.
    ///
    /// `generate` pushes items into its [`Source`] and returns when done; `mapper` is
    /// called once per item on a pool of at most `config().workers` workers and reports
    /// failures through [`Cancel`]. The first reported failure is returned; items still
    /// queued at that point are dropped without reaching `mapper`.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use taskfan::{Cancel, RunConfig, Runner, Source, UnitError};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let runner = Runner::builder(RunConfig::new(3)).build();
    ///     let total = Arc::new(AtomicU64::new(0));
    ///     let sum = Arc::clone(&total);
    ///
    ///     let res = runner
    ///         .map_void(
    ///             |source: Source<u64>| async move {
    ///                 for n in 1..=10 {
    ///                     if source.send(n).await.is_err() {
    ///                         break;
    ///                     }
    ///                 }
    ///             },
    ///             move |n: u64, cancel: Cancel| {
    ///                 let sum = Arc::clone(&sum);
    ///                 async move {
    ///                     if n == 13 {
    ///                         cancel.cancel(UnitError::fail("unlucky"));
    ///                     }
    ///                     sum.fetch_add(n, Ordering::Relaxed);
    ///                 }
    ///             },
    ///         )
    ///         .await;
    ///
    ///     assert!(res.is_ok());
    ///     assert_eq!(total.load(Ordering::Relaxed), 55);
    /// }
    /// ```
    pub async fn map_void<T, G, GFut, M, MFut>(&self, generate: G, mapper: M) -> Result<(), UnitError>
    where
        T: Send + 'static,
        G: FnOnce(Source<T>) -> GFut + Send + 'static,
        GFut: Future<Output = ()> + Send + 'static,
        M: Fn(T, Cancel) -> MFut + Send + Sync + 'static,
        MFut: Future<Output = ()> + Send + 'static,
    {
        let ctx = RunContext::new(self.bus.clone());
        self.run_with(ctx, self.cfg.workers_clamped(), generate, mapper)
            .await
    }

    /// Drives one run: producer, dispatcher, and terminal events.
    async fn run_with<T, G, GFut, M, MFut>(
        &self,
        ctx: RunContext,
        workers: usize,
        generate: G,
        mapper: M,
    ) -> Result<(), UnitError>
    where
        T: Send + 'static,
        G: FnOnce(Source<T>) -> GFut + Send + 'static,
        GFut: Future<Output = ()> + Send + 'static,
        M: Fn(T, Cancel) -> MFut + Send + Sync + 'static,
        MFut: Future<Output = ()> + Send + 'static,
    {
        ctx.publish(Event::new(EventKind::RunStarted).with_count(workers as u64));

        let (handoff, producer) = spawn_producer(generate, self.cfg.handoff_capacity(), &ctx);
        let latch = Arc::new(CancelLatch::new());
        let res = dispatch(handoff, mapper, workers, latch, &ctx).await;

        // The queue is closed at this point; the producer is finishing up.
        let _ = producer.await;

        let finished = Event::new(EventKind::RunFinished);
        ctx.publish(match &res {
            Ok(()) => finished,
            Err(err) => finished.with_reason(err.to_string()),
        });
        res
    }

    /// Stops the event listener after delivering every event published so far,
    /// and waits for all subscribers to handle them.
    pub async fn shutdown(mut self) {
        self.closing.cancel();
        if let Some(listener) = self.listener.take() {
            let _ = listener.await;
        }
    }
}

/// Executes `units` with at most `cfg.workers` running at once.
///
/// Returns `Ok(())` on full success, or the first reported failure. An empty list
/// returns `Ok(())` without spawning anything. Events go to a [`LogWriter`](crate::LogWriter)
/// when the `logging` feature is enabled; use [`Runner`] to attach other subscribers.
///
/// ## Example
/// ```rust
/// use taskfan::{RunConfig, UnitError, UnitFn, UnitRef, run_concurrent};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let units: Vec<UnitRef> = vec![
///         UnitFn::boxed("ok", || async { Ok::<_, UnitError>(()) }),
///         UnitFn::boxed("bad", || async { Err::<(), _>(UnitError::fail("boom")) }),
///     ];
///     let err = run_concurrent(units, RunConfig::for_batch(2)).await.unwrap_err();
///     assert_eq!(err.as_message(), "boom");
/// }
/// ```
pub async fn run_concurrent(units: Vec<UnitRef>, cfg: RunConfig) -> Result<(), UnitError> {
    if units.is_empty() {
        return Ok(());
    }
    default_runner(cfg).run_concurrent(units).await
}

/// Executes `units` strictly in order, stopping at the first failure.
///
/// Returns `Ok(())` on full success, or the failure of the first failing unit;
/// units after it never execute.
pub async fn run_sequential(units: Vec<UnitRef>) -> Result<(), UnitError> {
    if units.is_empty() {
        return Ok(());
    }
    let cfg = RunConfig::for_batch(units.len());
    default_runner(cfg).run_sequential(units).await
}

fn default_runner(cfg: RunConfig) -> Runner {
    let builder = Runner::builder(cfg);
    #[cfg(feature = "logging")]
    let builder = builder.with_subscriber(Arc::new(crate::subscribers::LogWriter::new()));
    builder.build()
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.closing.cancel();
    }
}

/// Forwards bus events to the subscriber set until the runner closes.
async fn listen(
    mut rx: tokio::sync::broadcast::Receiver<Event>,
    set: SubscriberSet,
    closing: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            res = rx.recv() => match res {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            _ = closing.cancelled() => {
                loop {
                    match rx.try_recv() {
                        Ok(ev) => set.emit(&ev),
                        Err(TryRecvError::Lagged(_)) => continue,
                        Err(_) => break,
                    }
                }
                break;
            }
        }
    }
    set.shutdown().await;
}
