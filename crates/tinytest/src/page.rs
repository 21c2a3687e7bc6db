//! Page indicator - coarse pass/fail signal shown after a run
//!
//! A [`Page`] is an optional capability handed to the runner. When one is
//! attached, its background is set once per run: light green when every
//! test passed, light red otherwise.

use colored::*;

/// Overall outcome shown on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Pass,
    Fail,
}

impl Indicator {
    pub fn from_failures(failures: usize) -> Self {
        if failures == 0 {
            Indicator::Pass
        } else {
            Indicator::Fail
        }
    }

    /// Background color as a CSS hex string
    pub fn color(self) -> &'static str {
        match self {
            Indicator::Pass => "#99ff99",
            Indicator::Fail => "#ff9999",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Indicator::Pass => (0x99, 0xff, 0x99),
            Indicator::Fail => (0xff, 0x99, 0x99),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Pass => "PASSED",
            Indicator::Fail => "FAILED",
        }
    }
}

/// A surface whose background reflects the run outcome
pub trait Page {
    fn set_background(&self, indicator: Indicator);
}

/// Page rendered as a full-width banner on stdout
#[derive(Debug)]
pub struct TerminalPage {
    width: usize,
    /// Disable colored output
    no_color: bool,
}

impl Default for TerminalPage {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPage {
    pub fn new() -> Self {
        Self {
            width: 50,
            no_color: false,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    fn render(&self, indicator: Indicator) -> String {
        let banner = format!("{:^width$}", indicator.label(), width = self.width);
        if self.no_color {
            return banner;
        }
        let (r, g, b) = indicator.rgb();
        banner.black().bold().on_truecolor(r, g, b).to_string()
    }
}

impl Page for TerminalPage {
    fn set_background(&self, indicator: Indicator) {
        println!("{}", self.render(indicator));
    }
}
