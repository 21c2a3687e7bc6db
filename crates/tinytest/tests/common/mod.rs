//! Shared helpers for observing runs headlessly

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tinytest::{CapturedConsole, Indicator, LogRecord, Page, RunSummary, TestRegistry, TestRunner};

/// Page that remembers every background it was given
#[derive(Debug, Default)]
pub struct RecordingPage {
    backgrounds: RefCell<Vec<Indicator>>,
}

impl RecordingPage {
    pub fn backgrounds(&self) -> Vec<Indicator> {
        self.backgrounds.borrow().clone()
    }
}

impl Page for RecordingPage {
    fn set_background(&self, indicator: Indicator) {
        self.backgrounds.borrow_mut().push(indicator);
    }
}

/// Runner wired to a captured console and a recording page
pub struct Harness {
    pub runner: TestRunner,
    pub console: Rc<CapturedConsole>,
    pub page: Rc<RecordingPage>,
}

impl Harness {
    pub fn new() -> Self {
        let console = Rc::new(CapturedConsole::new());
        let page = Rc::new(RecordingPage::default());
        let runner = TestRunner::new()
            .with_console(console.clone())
            .with_page(page.clone());
        Self {
            runner,
            console,
            page,
        }
    }

    /// Run the registry and drain the event loop
    pub fn run(&self, registry: TestRegistry) -> RunSummary {
        let summary = self.runner.run(registry);
        self.runner.event_loop().run_pending();
        summary
    }

    /// Logged lines, without trace records
    pub fn outcome_lines(&self) -> Vec<String> {
        self.console
            .records()
            .iter()
            .filter(|record| !matches!(record, LogRecord::Trace { .. }))
            .map(ToString::to_string)
            .collect()
    }

    /// Number of `FAILED` records logged
    pub fn failure_logs(&self) -> usize {
        self.console
            .records()
            .iter()
            .filter(|record| matches!(record, LogRecord::Failed { .. }))
            .count()
    }
}
