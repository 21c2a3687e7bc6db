//! Test runner - execute a registry of tests and report each outcome
//!
//! Tests run one after another on the calling thread, in registry order.
//! A test fails by returning `Err` or by panicking; either way the failure
//! is counted, logged, and the next test still runs. A test that never
//! returns blocks the run: there is no timeout.

use crate::assertions::AssertionFailure;
use crate::capture::{self, CaughtPanic};
use crate::console::{Console, LogRecord, StdConsole};
use crate::event_loop::EventLoop;
use crate::page::{Indicator, Page};
use crate::registry::{TestCase, TestRegistry};
use crate::value::Value;
use std::backtrace::BacktraceStatus;
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// What was captured from a failing test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    trace: Option<String>,
}

impl Failure {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace information, when any was available
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    fn from_error(err: &anyhow::Error) -> Self {
        let mut trace = Vec::new();

        if let Some(failure) = err.downcast_ref::<AssertionFailure>() {
            trace.push(format!("    at {}", failure.location()));
        }
        for cause in err.chain().skip(1) {
            trace.push(format!("caused by: {}", cause));
        }
        let backtrace = err.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            trace.push(backtrace.to_string());
        }

        Self {
            message: err.to_string(),
            trace: (!trace.is_empty()).then(|| trace.join("\n")),
        }
    }

    /// Best-effort stringification of whatever the test panicked with
    fn from_panic(caught: CaughtPanic) -> Self {
        let payload = caught.payload.as_ref();

        if let Some(failure) = payload.downcast_ref::<AssertionFailure>() {
            return Self {
                message: failure.message().to_string(),
                trace: Some(format!("    at {}", failure.location())),
            };
        }
        if let Some(err) = payload.downcast_ref::<anyhow::Error>() {
            let mut failure = Self::from_error(err);
            failure.trace = failure.trace.or(caught.trace);
            return failure;
        }

        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(value) = payload.downcast_ref::<Value>() {
            value.to_string()
        } else if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
            err.to_string()
        } else {
            "<non-string panic payload>".to_string()
        };

        Self {
            message,
            trace: caught.trace,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A completed test
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Name the test was registered under
    pub name: String,
    /// `Err` holds what the test failed with
    pub result: Result<(), Failure>,
}

impl TestRun {
    pub fn is_pass(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_fail(&self) -> bool {
        self.result.is_err()
    }
}

/// Outcome of one run over a registry
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    runs: Vec<TestRun>,
    failures: usize,
}

impl RunSummary {
    /// Completed tests in execution order
    pub fn runs(&self) -> &[TestRun] {
        &self.runs
    }

    pub fn total(&self) -> usize {
        self.runs.len()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn passed(&self) -> usize {
        self.runs.len() - self.failures
    }

    pub fn is_pass(&self) -> bool {
        self.failures == 0
    }

    pub fn indicator(&self) -> Indicator {
        Indicator::from_failures(self.failures)
    }
}

/// Test runner with its output channels
pub struct TestRunner {
    console: Rc<dyn Console>,
    page: Option<Rc<dyn Page>>,
    event_loop: Rc<EventLoop>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    /// Runner logging to stdout/stderr, with no page attached
    pub fn new() -> Self {
        Self {
            console: Rc::new(StdConsole::new()),
            page: None,
            event_loop: Rc::new(EventLoop::new()),
        }
    }

    /// Set the console test outcomes are logged to
    pub fn with_console(mut self, console: Rc<dyn Console>) -> Self {
        self.console = console;
        self
    }

    /// Attach a page to show the pass/fail indicator on
    pub fn with_page(mut self, page: Rc<dyn Page>) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the event loop the indicator update is deferred to
    pub fn with_event_loop(mut self, event_loop: Rc<EventLoop>) -> Self {
        self.event_loop = event_loop;
        self
    }

    pub fn event_loop(&self) -> &Rc<EventLoop> {
        &self.event_loop
    }

    /// Run every test in the registry, in order.
    ///
    /// The page indicator is not applied here: it is deferred to the event
    /// loop and shows once the loop is drained.
    pub fn run(&self, registry: TestRegistry) -> RunSummary {
        debug!(tests = registry.len(), "running test registry");

        let mut summary = RunSummary::default();
        for test in registry {
            let run = self.run_single_test(test);
            if run.is_fail() {
                summary.failures += 1;
            }
            summary.runs.push(run);
        }

        debug!(
            total = summary.total(),
            failures = summary.failures,
            "test registry finished"
        );
        self.schedule_indicator(summary.indicator());
        summary
    }

    /// Run a single test
    fn run_single_test(&self, test: TestCase) -> TestRun {
        let (name, procedure) = test.into_parts();

        let result = match capture::catch_quietly(procedure) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(Failure::from_error(&err)),
            Err(caught) => Err(Failure::from_panic(caught)),
        };

        match &result {
            Ok(()) => self.console.record(&LogRecord::Passed { name: name.clone() }),
            Err(failure) => {
                self.console.record(&LogRecord::Failed {
                    name: name.clone(),
                    message: failure.message().to_string(),
                });
                if let Some(trace) = failure.trace() {
                    self.console.record(&LogRecord::Trace {
                        trace: trace.to_string(),
                    });
                }
            }
        }

        TestRun { name, result }
    }

    fn schedule_indicator(&self, indicator: Indicator) {
        let page = self.page.clone();
        self.event_loop.defer(move || match page {
            Some(page) => {
                debug!(color = indicator.color(), "setting page background");
                page.set_background(indicator);
            }
            None => debug!("no page attached, skipping indicator"),
        });
    }
}

/// Run a registry with the default runner, then drain its event loop.
///
/// Outcomes go to stdout/stderr; no page is attached.
pub fn tests(registry: TestRegistry) -> RunSummary {
    let runner = TestRunner::new();
    let summary = runner.run(registry);
    runner.event_loop().run_pending();
    summary
}
