//! Kernel access to stopped tracees: registers, memory, ptrace requests and `wait4(2)`.

use std::fs;
use std::marker::PhantomData;
use std::time::Duration;

use nix::sys::ptrace;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};

use crate::arch::RegisterSet;
use crate::error::{Error, Result, ResultExt};
use crate::tracer::Restart;

pub use nix::errno::Errno;
pub use nix::sys::ptrace::Options;
pub use nix::unistd::Pid;

/// POSIX signal.
pub use nix::sys::signal::Signal;

/// Extra signal info, such as its cause.
pub type Siginfo = libc::siginfo_t;

/// Options required for internal tracee state management.
/// These are:
/// - [`PTRACE_O_TRACEEXEC`](Options::PTRACE_O_TRACEEXEC)
/// - [`PTRACE_O_TRACEEXIT`](Options::PTRACE_O_TRACEEXIT)
/// - [`PTRACE_O_TRACESYSGOOD`](Options::PTRACE_O_TRACESYSGOOD)
pub const REQUIRED_OPTIONS: Options = Options::empty()
    .union(Options::PTRACE_O_TRACEEXEC)
    .union(Options::PTRACE_O_TRACEEXIT)
    .union(Options::PTRACE_O_TRACESYSGOOD);

/// Options that make the kernel auto-attach new children of a tracee.
pub const FORK_OPTIONS: Options = Options::empty()
    .union(Options::PTRACE_O_TRACEFORK)
    .union(Options::PTRACE_O_TRACEVFORK)
    .union(Options::PTRACE_O_TRACECLONE);

/// Read access to a stopped task.
///
/// The resolver only sees tracees through this trait, so it can run against
/// synthetic register sets and memory.
pub trait Task {
    fn pid(&self) -> Pid;

    fn registers(&self) -> Result<RegisterSet>;

    /// Read tracee memory at `addr` into `data`, returning the number of bytes read.
    fn read_memory(&self, addr: u64, data: &mut [u8]) -> Result<usize>;
}

/// Tracee task in ptrace-stop.
///
/// **Warning:** the underlying tracee is not guaranteed to exist, and
/// operations on it may fail between calls to `wait4()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tracee {
    pid: Pid,

    #[doc(hidden)]
    _not_send: PhantomData<*const ()>,
}

impl Tracee {
    pub fn new(pid: Pid) -> Self {
        Self { pid, _not_send: PhantomData }
    }

    /// Set custom tracing options on the tracee.
    ///
    /// **NOTE:** [`REQUIRED_OPTIONS`] are always set, even if unset in the passed value.
    pub fn set_options(&self, options: Options) -> Result<()> {
        let options = options | REQUIRED_OPTIONS;
        ptrace::setoptions(self.pid, options).died_if_esrch(self.pid)
    }

    /// `PTRACE_GETEVENTMSG` for the current ptrace-event-stop.
    pub fn event_message(&self) -> Result<u64> {
        Ok(ptrace::getevent(self.pid).died_if_esrch(self.pid)? as u64)
    }

    pub fn siginfo(&self) -> Result<Siginfo> {
        ptrace::getsiginfo(self.pid).died_if_esrch(self.pid)
    }

    /// Resume the tracee, delivering `signal` if set.
    pub fn restart(&self, mode: Restart, signal: Option<Signal>) -> Result<()> {
        let res = match mode {
            Restart::Syscall => ptrace::syscall(self.pid, signal),
            Restart::Continue => ptrace::cont(self.pid, signal),
        };

        res.map_err(|source| Error::Restart { pid: self.pid, mode, source })
    }

    /// Detach, delivering `signal` if set. Fails as if the tracee died when it is not
    /// in a ptrace-stop.
    pub fn detach(&self, signal: Option<Signal>) -> Result<()> {
        ptrace::detach(self.pid, signal).died_if_esrch(self.pid)
    }

    /// Send `SIGSTOP` to this thread alone, forcing a running tracee into a ptrace-stop.
    pub fn stop(&self) -> Result<()> {
        let res = unsafe { libc::syscall(libc::SYS_tkill, self.pid.as_raw(), libc::SIGSTOP) };

        Errno::result(res).map(drop).died_if_esrch(self.pid)
    }

    /// Block until this tracee changes state.
    ///
    /// Returns `None` if it is no longer ours to wait on.
    pub fn wait(&self) -> Result<Option<WaitStatus>> {
        loop {
            match wait::waitpid(self.pid, Some(WaitPidFlag::__WALL)) {
                Ok(status) => return Ok(Some(status)),
                Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => return Ok(None),
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    fn proc_mem_path(&self) -> String {
        let tid = self.pid.as_raw() as u32;
        format!("/proc/{}/mem", tid)
    }
}

impl Task for Tracee {
    fn pid(&self) -> Pid {
        self.pid
    }

    #[cfg(target_arch = "x86_64")]
    fn registers(&self) -> Result<RegisterSet> {
        let regs = ptrace::getregs(self.pid).died_if_esrch(self.pid)?;

        Ok(RegisterSet::X86_64(regs.into()))
    }

    #[cfg(target_arch = "aarch64")]
    fn registers(&self) -> Result<RegisterSet> {
        use crate::arch::aarch64::{self, REGS_SIZE};

        let mut data = [0u64; REGS_SIZE / 8];
        let mut iov = libc::iovec {
            iov_base: data.as_mut_ptr() as *mut libc::c_void,
            iov_len: REGS_SIZE,
        };

        let res = unsafe {
            libc::ptrace(
                aarch64::PTRACE_GETREGSET,
                self.pid.as_raw(),
                aarch64::NT_PRSTATUS,
                &mut iov as *mut _ as *mut libc::c_void,
            )
        };

        Errno::result(res).died_if_esrch(self.pid)?;

        // The kernel reports the size of the set it wrote in `iov_len`.
        let bytes: Vec<u8> = data
            .iter()
            .flat_map(|word| word.to_ne_bytes())
            .take(iov.iov_len)
            .collect();

        aarch64::register_set_from_regset(&bytes)
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn registers(&self) -> Result<RegisterSet> {
        internal_error!("unsupported host architecture")
    }

    fn read_memory(&self, addr: u64, data: &mut [u8]) -> Result<usize> {
        use std::os::unix::fs::FileExt;

        let mem = fs::File::open(self.proc_mem_path()).died_if_esrch(self.pid)?;
        let len = mem.read_at(data, addr).died_if_esrch(self.pid)?;

        Ok(len)
    }
}

/// A state change collected by [`wait_any()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Waited {
    pub status: WaitStatus,

    /// System time consumed so far by the child the status belongs to.
    pub stime: Duration,
}

/// Block until any child, traced or not, changes state.
///
/// Returns `None` once there are no children left to wait on.
pub fn wait_any() -> Result<Option<Waited>> {
    loop {
        let mut status = 0;
        let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();

        let pid = unsafe { libc::wait4(-1, &mut status, libc::__WALL, usage.as_mut_ptr()) };

        match Errno::result(pid) {
            Ok(pid) => {
                // SAFETY: `wait4()` fills the rusage for any reported child, and it
                // starts zeroed.
                let usage = unsafe { usage.assume_init() };
                let pid = Pid::from_raw(pid);
                let status = WaitStatus::from_raw(pid, status)?;
                let stime = timeval_to_duration(usage.ru_stime);

                return Ok(Some(Waited { status, stime }));
            },
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => return Ok(None),
            Err(errno) => return Err(errno.into()),
        }
    }
}

fn timeval_to_duration(tv: libc::timeval) -> Duration {
    let secs = tv.tv_sec.max(0) as u64;
    let micros = tv.tv_usec.clamp(0, 999_999) as u32;

    Duration::new(secs, micros * 1000)
}
