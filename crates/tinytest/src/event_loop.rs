//! Event loop - tasks deferred until the current synchronous phase ends

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// A deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// FIFO queue of deferred tasks.
///
/// Nothing runs on [`EventLoop::defer`]; the host drains the queue with
/// [`EventLoop::run_pending`] once its synchronous work is done.
#[derive(Default)]
pub struct EventLoop {
    queue: RefCell<VecDeque<Task>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task to run after the current synchronous phase
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run tasks in order until the queue is empty, including tasks
    /// deferred by tasks run here. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Borrow must end before the task runs so it can defer more work
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.pending())
            .finish()
    }
}
