//! Supervision of auxiliary children: processes the tracer started or adopted that are
//! not traced, but whose wait statuses arrive through the same `wait4(2)` loop.

use std::collections::HashMap;
use std::fmt;

use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ptrace::Pid;

/// What a handler wants done with its record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChildAction {
    /// Keep the record; the child is still running.
    Keep,

    /// Forget the child.
    Remove,

    /// Forget the child and stop the whole supervisor.
    Terminate,
}

/// Verdict of [`Children::signal()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignalOutcome {
    /// The pid is not an auxiliary child.
    Unclaimed,

    /// Handled; keep supervising.
    Continue,

    /// Handled; the supervisor should shut down.
    Terminate,
}

/// Callbacks for one auxiliary child. Every method has a default.
///
/// State the callbacks need lives in the implementing type.
pub trait ChildHandler {
    /// The child changed state.
    ///
    /// By default the record is dropped once the child is no longer merely stopped.
    fn on_signal(&mut self, pid: Pid, status: WaitStatus) -> ChildAction {
        let _ = pid;

        match status {
            WaitStatus::Stopped(..) => ChildAction::Keep,
            _ => ChildAction::Remove,
        }
    }

    /// The supervisor is about to exit with `exit_code`.
    fn on_exit_notify(&mut self, pid: Pid, exit_code: i32) {
        let _ = (pid, exit_code);
    }

    /// Final reaping during shutdown.
    ///
    /// By default, block until the child terminates, then drop the record.
    fn on_exit_wait(&mut self, pid: Pid, exit_code: i32) -> ChildAction {
        let _ = exit_code;

        wait_for_exit(pid);

        ChildAction::Remove
    }
}

/// Handler with every default behavior.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultHandler;

impl ChildHandler for DefaultHandler {}

/// Block until `pid` terminates, ignoring interruptions.
pub fn wait_for_exit(pid: Pid) {
    loop {
        match wait::waitpid(pid, None) {
            Ok(WaitStatus::Exited(..) | WaitStatus::Signaled(..)) => {
                debug!(pid = pid.as_raw(), "reaped auxiliary child");
                return;
            },
            Ok(status) => {
                debug!(pid = pid.as_raw(), ?status, "auxiliary child still running");
            },
            Err(Errno::EINTR) => continue,
            Err(errno) => {
                debug!(pid = pid.as_raw(), %errno, "stopped waiting for auxiliary child");
                return;
            },
        }
    }
}

/// Registry of auxiliary children, keyed by pid.
#[derive(Default)]
pub struct Children {
    records: HashMap<Pid, Box<dyn ChildHandler>>,
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.records.keys()).finish()
    }
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supervise `pid` with `handler`.
    ///
    /// Fails if `pid` is already registered.
    pub fn register(&mut self, pid: Pid, handler: impl ChildHandler + 'static) -> Result<()> {
        if self.records.contains_key(&pid) {
            return Err(Error::DuplicateChild { pid });
        }

        info!(pid = pid.as_raw(), "registered auxiliary child");
        self.records.insert(pid, Box::new(handler));

        Ok(())
    }

    /// Stop supervising `pid`. Unknown pids are ignored.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let removed = self.records.remove(&pid).is_some();

        if removed {
            debug!(pid = pid.as_raw(), "removed auxiliary child");
        }

        removed
    }

    /// Offer a wait status to the handler of `pid`.
    pub fn signal(&mut self, pid: Pid, status: WaitStatus) -> SignalOutcome {
        let handler = match self.records.get_mut(&pid) {
            Some(handler) => handler,
            None => return SignalOutcome::Unclaimed,
        };

        match handler.on_signal(pid, status) {
            ChildAction::Keep => SignalOutcome::Continue,
            ChildAction::Remove => {
                self.remove(pid);
                SignalOutcome::Continue
            },
            ChildAction::Terminate => {
                warn!(pid = pid.as_raw(), ?status, "auxiliary child requested termination");
                self.remove(pid);
                SignalOutcome::Terminate
            },
        }
    }

    /// Tell every child's handler that the supervisor is exiting.
    pub fn notify_all_of_exit(&mut self, exit_code: i32) {
        for (&pid, handler) in self.records.iter_mut() {
            handler.on_exit_notify(pid, exit_code);
        }
    }

    /// Run every child's exit-wait handler.
    ///
    /// Returns the number of children whose handler kept them, which are still running.
    pub fn wait_all(&mut self, exit_code: i32) -> usize {
        let mut running = 0;

        self.records.retain(|&pid, handler| match handler.on_exit_wait(pid, exit_code) {
            ChildAction::Keep => {
                running += 1;
                true
            },
            ChildAction::Remove | ChildAction::Terminate => false,
        });

        debug!(running, "waited on auxiliary children");

        running
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.records.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
