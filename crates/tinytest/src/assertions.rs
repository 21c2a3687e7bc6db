//! Assertion helpers
//!
//! Each helper checks a single condition and returns
//! `Err(AssertionFailure)` when it does not hold, so a test propagates the
//! failure with `?`.
//!
//! # API
//!
//! - `fail(msg)` — fail unconditionally
//! - `assert(value, msg)` — value must be truthy
//! - `assert_equals(expected, actual)` — loose (coercive) equality, alias `eq`
//! - `assert_strict_equals(expected, actual)` — strict equality, no coercion
//!
//! Helpers are `#[track_caller]`: the failure remembers the line of the
//! test that called the helper, which the runner reports as the trace.

use crate::value::Value;
use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Error produced by a failed assertion
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
    location: &'static Location<'static>,
}

impl AssertionFailure {
    /// Create a failure located at the caller
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source location of the assertion that failed
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// Fail unconditionally with `"fail(): " + msg`.
///
/// Generic over the success type so it can stand in for any expression,
/// e.g. an unreachable match arm.
#[track_caller]
pub fn fail<T>(msg: impl fmt::Display) -> Result<T, AssertionFailure> {
    Err(AssertionFailure::new(format!("fail(): {}", msg)))
}

/// Fail with `"assert(): " + msg` when `value` is falsy.
#[track_caller]
pub fn assert(value: impl Into<Value>, msg: impl fmt::Display) -> Result<(), AssertionFailure> {
    if !value.into().is_truthy() {
        return Err(AssertionFailure::new(format!("assert(): {}", msg)));
    }
    Ok(())
}

/// Fail unless `expected` and `actual` are loosely equal.
///
/// `assert_equals(1, "1")` passes; use [`assert_strict_equals`] when the
/// kinds must match too.
#[track_caller]
pub fn assert_equals(
    expected: impl Into<Value>,
    actual: impl Into<Value>,
) -> Result<(), AssertionFailure> {
    let expected = expected.into();
    let actual = actual.into();

    if !expected.loose_eq(&actual) {
        return Err(AssertionFailure::new(format!(
            "assertEquals() \"{}\" != \"{}\"",
            expected, actual
        )));
    }
    Ok(())
}

/// Alias for [`assert_equals`].
#[track_caller]
pub fn eq(expected: impl Into<Value>, actual: impl Into<Value>) -> Result<(), AssertionFailure> {
    assert_equals(expected, actual)
}

/// Fail unless `expected` and `actual` are strictly equal.
#[track_caller]
pub fn assert_strict_equals(
    expected: impl Into<Value>,
    actual: impl Into<Value>,
) -> Result<(), AssertionFailure> {
    let expected = expected.into();
    let actual = actual.into();

    if !expected.strict_eq(&actual) {
        return Err(AssertionFailure::new(format!(
            "assertStrictEquals() \"{}\" !== \"{}\"",
            expected, actual
        )));
    }
    Ok(())
}
