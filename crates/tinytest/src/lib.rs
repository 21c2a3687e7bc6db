//! tinytest - a very small in-process unit-test harness
//!
//! Hand the runner a registry of named test procedures; it runs each one in
//! order, logs `OK` or `FAILED` per test, and once the run is over signals
//! the overall result on an optional page (light green or light red).
//!
//! - Tests are closures returning `anyhow::Result<()>`; any error or panic
//!   counts as a failure
//! - Assertion helpers return `Result<(), AssertionFailure>` for use with `?`
//! - Console, page and event loop are injected, so runs can be observed
//!   headlessly
//!
//! # Example
//!
//! ```
//! use tinytest::prelude::*;
//!
//! fn add(a: f64, b: f64) -> f64 {
//!     a + b
//! }
//!
//! let summary = tests(registry! {
//!     "adds numbers" => || {
//!         eq(6, add(2.0, 4.0))?;
//!         eq(6.6, add(2.6, 4.0))?;
//!         Ok(())
//!     },
//!     "subtracts numbers" => || Ok(eq(-2, add(2.0, -4.0))?),
//! });
//! assert!(summary.is_pass());
//! ```

/// tinytest version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assertions;
mod capture;
pub mod console;
pub mod event_loop;
pub mod page;
pub mod prelude;
pub mod registry;
pub mod runner;
pub mod value;

// Re-export commonly used types
pub use assertions::{assert, assert_equals, assert_strict_equals, eq, fail, AssertionFailure};
pub use console::{CapturedConsole, Console, Level, LogRecord, StdConsole};
pub use event_loop::EventLoop;
pub use page::{Indicator, Page, TerminalPage};
pub use registry::{TestCase, TestRegistry, TestResult};
pub use runner::{tests, Failure, RunSummary, TestRun, TestRunner};
pub use value::Value;
