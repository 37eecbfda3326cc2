//! # Example: concurrent
//!
//! Resizes a batch of "images" with at most four workers. One image is corrupt:
//! its failure cancels the run, queued images are discarded, and the failure is returned.
//!
//! ## Flow
//! ```text
//! Vec<UnitRef> ──► run_concurrent(units, RunConfig::new(4))
//!     ├─► producer sends units into the handoff queue
//!     ├─► dispatcher admits ≤ 4 workers at a time
//!     ├─► "img-5" fails → latch closes → RunCancelled
//!     ├─► queue drained → QueueDrained
//!     └─► in-flight workers joined → Err("corrupt header")
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example concurrent
//! ```

use std::time::Duration;

use taskfan::{RunConfig, UnitError, UnitFn, UnitRef, run_concurrent};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // 1. Route run events to stdout through the built-in LogWriter
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2. One unit per image; image 5 is corrupt
    let units: Vec<UnitRef> = (0..16)
        .map(|i| {
            UnitFn::boxed(format!("img-{i}"), move || async move {
                tokio::time::sleep(Duration::from_millis(20 + (i % 3) * 10)).await;
                if i == 5 {
                    return Err(UnitError::fail("corrupt header"));
                }
                println!("[img-{i}] resized");
                Ok(())
            })
        })
        .collect();

    // 3. Run with four workers
    match run_concurrent(units, RunConfig::new(4)).await {
        Ok(()) => println!("all images resized"),
        Err(err) => println!("batch stopped: {err}"),
    }
}
