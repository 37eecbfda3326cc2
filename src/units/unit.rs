//! # Work unit abstraction.
//!
//! A [`Unit`] is a zero-argument operation that runs once and either succeeds or
//! reports a [`UnitError`]. Units are consumed by execution: ownership moves from
//! the caller's list, through the handoff queue, into exactly one worker.

use std::future::Future;
use std::pin::Pin;

use crate::error::UnitError;

/// Boxed future returned by [`Unit::call`].
pub type BoxUnitFuture = Pin<Box<dyn Future<Output = Result<(), UnitError>> + Send + 'static>>;

/// Owned, type-erased unit as accepted by the runner.
pub type UnitRef = Box<dyn Unit>;

/// # One-shot, fallible unit of work.
///
/// A `Unit` has a human-readable [`name`](Unit::name) used in events and a
/// [`call`](Unit::call) method that consumes it and returns the future to run.
///
/// # Example
/// ```
/// use taskfan::{BoxUnitFuture, Unit, UnitError};
///
/// struct Flush {
///     path: String,
/// }
///
/// impl Unit for Flush {
///     fn name(&self) -> &str { "flush" }
///
///     fn call(self: Box<Self>) -> BoxUnitFuture {
///         Box::pin(async move {
///             if self.path.is_empty() {
///                 return Err(UnitError::fail("empty path"));
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Unit: Send + 'static {
    /// Returns a human-readable unit name.
    fn name(&self) -> &str;

    /// Consumes the unit and returns the future that executes it.
    ///
    /// The runner awaits the returned future on a worker task; it is polled to completion
    /// even if the run gets cancelled while it executes.
    fn call(self: Box<Self>) -> BoxUnitFuture;
}
