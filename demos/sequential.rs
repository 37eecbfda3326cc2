//! # Example: sequential
//!
//! Applies schema migrations strictly in order. Migration 3 fails, so migrations
//! 4 and 5 never run.
//!
//! ## Flow
//! ```text
//! Vec<UnitRef> ──► run_sequential(units)
//!     ├─► 0001 ─► 0002 ─► 0003 (fails)
//!     ├─► latch closes before the gate is released
//!     └─► 0004, 0005 drained → Err("column already exists")
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example sequential
//! ```

use std::time::Duration;

use taskfan::{UnitError, UnitFn, UnitRef, run_sequential};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let migrations: Vec<UnitRef> = (1..=5)
        .map(|n| {
            UnitFn::boxed(format!("migration-{n:04}"), move || async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                if n == 3 {
                    return Err(UnitError::fail("column already exists"));
                }
                println!("[migration-{n:04}] applied");
                Ok(())
            })
        })
        .collect();

    if let Err(err) = run_sequential(migrations).await {
        println!("migrations stopped: {err}");
    }
}
