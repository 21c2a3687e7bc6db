//! Testing a tiny adder.
//!
//! Run with `cargo run --example adder`. Each test logs `OK` or `FAILED`,
//! then a green or red banner shows the overall result.

use std::process::ExitCode;
use std::rc::Rc;
use tinytest::prelude::*;
use tinytest::TerminalPage;

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn main() -> ExitCode {
    let runner = TestRunner::new().with_page(Rc::new(TerminalPage::new()));

    let summary = runner.run(registry! {
        "adds numbers" => || {
            eq(6, add(2.0, 4.0))?;
            eq(6.6, add(2.6, 4.0))?;
            Ok(())
        },
        "subtracts numbers" => || Ok(eq(-2, add(2.0, -4.0))?),
        "returns a number, not a string" => || Ok(assert_strict_equals(5, add(2.0, 3.0))?),
    });
    runner.event_loop().run_pending();

    if summary.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
