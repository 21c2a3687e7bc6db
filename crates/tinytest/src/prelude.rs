//! Everything a test file usually needs
//!
//! ```
//! use tinytest::prelude::*;
//!
//! let summary = tests(registry! {
//!     "strings coerce" => || Ok(eq(1, "1")?),
//! });
//! assert_eq!(summary.failures(), 0);
//! ```

pub use crate::assertions::{assert, assert_equals, assert_strict_equals, eq, fail};
pub use crate::registry;
pub use crate::registry::{TestRegistry, TestResult};
pub use crate::runner::{tests, TestRunner};
pub use crate::value::Value;
