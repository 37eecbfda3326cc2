//! Error types used by taskfan runs and work units.
//!
//! This module defines:
//!
//! - [`UnitError`]: the failure a work unit reports; the first one becomes the run outcome.
//! - [`SourceClosed`]: returned by [`Source::send`](crate::Source::send) once nobody receives anymore.
//!
//! [`UnitError`] provides helper methods (`as_label`, `as_message`) for logging/metrics.

use std::error::Error as StdError;
use thiserror::Error;

/// # Errors reported by work units.
///
/// A unit returns `Err(UnitError)` to fail; the runner records the first such error
/// and returns it to the caller unchanged. Later failures of the same run are discarded.
///
/// Panics inside a unit are **not** turned into a `UnitError`; they are contained by the
/// runner and published as [`EventKind::TaskPanicked`](crate::EventKind::TaskPanicked).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UnitError {
    /// Unit execution failed with a plain message.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Unit execution failed with a caller-defined error type.
    #[error(transparent)]
    Source(Box<dyn StdError + Send + Sync + 'static>),
}

impl UnitError {
    /// Shorthand for [`UnitError::Fail`].
    ///
    /// # Example
    /// ```
    /// use taskfan::UnitError;
    ///
    /// let err = UnitError::fail("boom");
    /// assert_eq!(err.as_message(), "boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        UnitError::Fail {
            error: error.into(),
        }
    }

    /// Wraps any error type so it can be returned from a unit.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        UnitError::Source(Box::new(err))
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskfan::UnitError;
    ///
    /// assert_eq!(UnitError::fail("boom").as_label(), "unit_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            UnitError::Fail { .. } => "unit_failed",
            UnitError::Source(_) => "unit_error",
        }
    }

    /// Returns the bare failure message, without the variant prefix.
    pub fn as_message(&self) -> String {
        match self {
            UnitError::Fail { error } => error.clone(),
            UnitError::Source(err) => err.to_string(),
        }
    }
}

/// The handoff queue has no receiver anymore.
///
/// Only observable by custom generators passed to [`Runner::map_void`](crate::Runner::map_void);
/// a generator should stop producing when it sees this.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("handoff queue closed")]
pub struct SourceClosed;
