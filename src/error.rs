use std::io;

use nix::errno::Errno;
use nix::sys::wait::WaitStatus;

use crate::ptrace::Pid;
use crate::tracer::Restart;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not attach to tracee = {pid}")]
    Attach {
        pid: Pid,
        source: nix::Error,
    },

    #[error("Could not restart tracee = {pid} with mode = {mode:?}")]
    Restart { pid: Pid, mode: Restart, source: nix::Error },

    #[error("Tracee = {pid} died before it could be inspected")]
    TraceeDied { pid: Pid, source: nix::Error },

    #[error("Tracee = {pid} is already registered")]
    DuplicateTracee { pid: Pid },

    #[error("Auxiliary child = {pid} is already registered")]
    DuplicateChild { pid: Pid },

    #[error("Wait status {status:?} reported for unknown pid = {pid}")]
    UnknownPid { pid: Pid, status: WaitStatus },

    #[error("Input/output error")]
    IO(#[from] io::Error),

    #[error("OS error")]
    OS(#[from] nix::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True if the error is due to the tracee vanishing between a stop and a request.
    ///
    /// Such errors only affect the one tracee, and the supervisor recovers from them.
    pub fn tracee_died(&self) -> bool {
        match self {
            Error::TraceeDied { .. } => true,
            Error::Restart { source, .. } => *source == Errno::ESRCH,
            _ => false,
        }
    }

    /// True if the error means the supervisor's bookkeeping no longer matches the kernel.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DuplicateTracee { .. }
                | Error::DuplicateChild { .. }
                | Error::UnknownPid { .. }
                | Error::Internal(..)
        )
    }
}

pub(crate) trait ResultExt<T> {
    fn died_if_esrch(self, pid: Pid) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, nix::Error> {
    fn died_if_esrch(self, pid: Pid) -> Result<T> {
        self.map_err(|source| {
            if source == Errno::ESRCH {
                Error::TraceeDied { pid, source }
            } else {
                Error::OS(source)
            }
        })
    }
}

impl<T> ResultExt<T> for std::result::Result<T, io::Error> {
    fn died_if_esrch(self, pid: Pid) -> Result<T> {
        self.map_err(|err| match err.raw_os_error().map(Errno::from_i32) {
            // A vanished task's `/proc/<pid>/mem` reports `ESRCH` or reads as empty.
            Some(Errno::ESRCH) | Some(Errno::ENOENT) => Error::TraceeDied { pid, source: Errno::ESRCH },
            _ => Error::IO(err),
        })
    }
}

macro_rules! internal_error {
    ($msg: expr) => {
        return Err($crate::error::Error::Internal($msg.into()))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esrch_is_tracee_died() {
        let pid = Pid::from_raw(42);
        let res: std::result::Result<(), nix::Error> = Err(Errno::ESRCH);
        let err = res.died_if_esrch(pid).unwrap_err();

        assert!(matches!(err, Error::TraceeDied { .. }));
        assert!(err.tracee_died());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_other_errno_is_os_error() {
        let pid = Pid::from_raw(42);
        let res: std::result::Result<(), nix::Error> = Err(Errno::EPERM);
        let err = res.died_if_esrch(pid).unwrap_err();

        assert!(matches!(err, Error::OS(Errno::EPERM)));
        assert!(!err.tracee_died());
    }

    #[test]
    fn test_bookkeeping_errors_are_fatal() {
        let pid = Pid::from_raw(7);

        assert!(Error::DuplicateTracee { pid }.is_fatal());
        assert!(Error::DuplicateChild { pid }.is_fatal());
        assert!(Error::UnknownPid { pid, status: WaitStatus::Exited(pid, 0) }.is_fatal());
    }
}
