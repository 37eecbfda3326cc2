//! # Closure-backed unit (`UnitFn`)
//!
//! [`UnitFn`] wraps a closure `F: FnOnce() -> Fut`. The closure is called once,
//! when a worker picks the unit up; any state it captures moves into the future.
//!
//! ## Example
//! ```rust
//! use taskfan::{UnitError, UnitFn, UnitRef};
//!
//! let unit: UnitRef = UnitFn::boxed("upload", || async move {
//!     // do work...
//!     Ok::<_, UnitError>(())
//! });
//!
//! assert_eq!(unit.name(), "upload");
//! ```

use std::borrow::Cow;
use std::future::Future;

use crate::error::UnitError;
use crate::units::unit::{BoxUnitFuture, Unit, UnitRef};

/// Closure-backed unit implementation.
#[derive(Debug)]
pub struct UnitFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> UnitFn<F> {
    /// Creates a new closure-backed unit.
    ///
    /// Prefer [`UnitFn::boxed`] when you immediately need a [`UnitRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F, Fut> UnitFn<F>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), UnitError>> + Send + 'static,
{
    /// Creates the unit and returns it as an owned handle (`Box<dyn Unit>`).
    pub fn boxed(name: impl Into<Cow<'static, str>>, f: F) -> UnitRef {
        Box::new(Self::new(name, f))
    }
}

impl<F, Fut> Unit for UnitFn<F>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), UnitError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(self: Box<Self>) -> BoxUnitFuture {
        let UnitFn { f, .. } = *self;
        Box::pin(f())
    }
}
