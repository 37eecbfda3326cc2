//! # Producer: streams generated items into the handoff queue.
//!
//! A generator receives a write-only [`Source`] and pushes items one at a time.
//! When the generator returns, its `Source` is dropped, which closes the queue;
//! that is the only "no more input" signal the dispatcher gets.
//!
//! ```text
//! spawn_producer(generate)
//!     ├─► channel(capacity)  ──► (Source, Handoff)
//!     ├─► spawn_safe(generate(Source))      (Origin::Producer)
//!     │       └─ return / panic → Source dropped → queue closed
//!     └─► Handoff returned to the dispatcher
//! ```
//!
//! A panicking generator only truncates input: the items already sent are still
//! executed and the run ends as if the generator had returned.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::context::RunContext;
use crate::core::spawn::{Origin, spawn_safe};
use crate::error::SourceClosed;

/// Write-only handle to a run's handoff queue.
///
/// Handed to the generator of [`Runner::map_void`](crate::Runner::map_void).
/// Dropping it closes the queue.
#[derive(Debug)]
pub struct Source<T> {
    tx: Tx<T>,
}

#[derive(Debug)]
enum Tx<T> {
    Bounded(mpsc::Sender<T>),
    Unbounded(mpsc::UnboundedSender<T>),
}

impl<T> Source<T> {
    /// Pushes one item.
    ///
    /// Suspends while a bounded queue is full. Fails with [`SourceClosed`] once
    /// the run stopped receiving; the generator should stop producing then.
    pub async fn send(&self, item: T) -> Result<(), SourceClosed> {
        match &self.tx {
            Tx::Bounded(tx) => tx.send(item).await.map_err(|_| SourceClosed),
            Tx::Unbounded(tx) => tx.send(item).map_err(|_| SourceClosed),
        }
    }
}

/// Receiving half of the handoff queue, owned by the dispatcher.
#[derive(Debug)]
pub(crate) enum Handoff<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

impl<T> Handoff<T> {
    /// Next item, or `None` once the producer closed the queue and it is empty.
    pub(crate) async fn recv(&mut self) -> Option<T> {
        match self {
            Handoff::Bounded(rx) => rx.recv().await,
            Handoff::Unbounded(rx) => rx.recv().await,
        }
    }
}

/// Creates a handoff queue; `None` means unbounded.
pub(crate) fn channel<T>(capacity: Option<usize>) -> (Source<T>, Handoff<T>) {
    match capacity {
        Some(cap) => {
            let (tx, rx) = mpsc::channel(cap.max(1));
            (Source { tx: Tx::Bounded(tx) }, Handoff::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                Source {
                    tx: Tx::Unbounded(tx),
                },
                Handoff::Unbounded(rx),
            )
        }
    }
}

/// Starts the generator on its own panic-safe task.
///
/// Returns the receiving half and the producer's join handle. The handle
/// completes once the generator returned (or panicked) and the queue is closed.
pub(crate) fn spawn_producer<T, G, Fut>(
    generate: G,
    capacity: Option<usize>,
    ctx: &RunContext,
) -> (Handoff<T>, JoinHandle<()>)
where
    T: Send + 'static,
    G: FnOnce(Source<T>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (source, handoff) = channel(capacity);
    let handle = spawn_safe(
        async move { generate(source).await },
        Origin::Producer,
        ctx.clone(),
    );
    (handoff, handle)
}
