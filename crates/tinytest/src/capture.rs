//! Panic capture - catch a panicking test without printing to stderr
//!
//! A single process-wide hook is installed on first use. While the current
//! thread is inside [`catch_quietly`], the hook stores the panic location
//! (and a backtrace, when one was captured) instead of printing. Panics on
//! any other thread, or outside a capture, go to the previously installed
//! hook unchanged.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

static INSTALL_HOOK: Once = Once::new();

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static LAST_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// A panic caught by [`catch_quietly`]
pub(crate) struct CaughtPanic {
    pub payload: Box<dyn Any + Send>,
    /// Panic site and backtrace, as reported to the hook
    pub trace: Option<String>,
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
                return;
            }

            let mut trace = Vec::new();
            if let Some(location) = info.location() {
                trace.push(format!("    at {}", location));
            }
            let backtrace = Backtrace::capture();
            if backtrace.status() == BacktraceStatus::Captured {
                trace.push(backtrace.to_string());
            }
            let trace = (!trace.is_empty()).then(|| trace.join("\n"));
            LAST_TRACE.with(|slot| *slot.borrow_mut() = trace);
        }));
    });
}

/// Run `f`, turning a panic into a [`CaughtPanic`] instead of printing it
pub(crate) fn catch_quietly<R>(f: impl FnOnce() -> R) -> Result<R, CaughtPanic> {
    install_hook();
    LAST_TRACE.with(|slot| slot.borrow_mut().take());

    let was_capturing = CAPTURING.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|flag| flag.set(was_capturing));

    result.map_err(|payload| CaughtPanic {
        payload,
        trace: LAST_TRACE.with(|slot| slot.borrow_mut().take()),
    })
}
