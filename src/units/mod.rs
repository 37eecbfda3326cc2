//! # Work unit abstractions.
//!
//! This module provides the unit-related types:
//! - [`Unit`] - trait for one-shot, fallible async operations
//! - [`UnitFn`] - closure-based unit implementation
//! - [`UnitRef`] - owned, type-erased unit (`Box<dyn Unit>`)

mod unit;
mod unit_fn;

pub use unit::{BoxUnitFuture, Unit, UnitRef};
pub use unit_fn::UnitFn;
