//! The wait-event dispatcher: turns `wait4(2)` statuses into typed events, keeps each
//! tracee's syscall parity, and resumes tracees.

use std::collections::HashSet;
use std::io;
use std::marker::PhantomData;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command};
use std::time::Duration;

use nix::sys::ptrace;
use nix::sys::wait::WaitStatus;
use tracing::{debug, info, trace, warn};

use crate::arch::{Arch, SyscallAbi};
use crate::children::{Children, SignalOutcome};
use crate::error::{Error, Result, ResultExt};
use crate::personality::{ActivePersonality, Personality};
use crate::ptrace::{wait_any, Errno, Options, Pid, Signal, Task, Tracee, Waited, FORK_OPTIONS, REQUIRED_OPTIONS};
use crate::resolve::{self, EntrySnapshot, ExitSnapshot, Outcome};
use crate::tcb::{Registry, Tcb, TcbFlags, TcbHandle};

/// Restart requests, which resume stopped tracees.
///
/// The restart mode determines the possible subsequent stops of the restarted tracee.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Restart {
    Syscall,
    Continue,
}

/// How tracees are set up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Ptrace options applied to every tracee we start or attach to.
    ///
    /// **NOTE:** [`REQUIRED_OPTIONS`] are always added.
    pub options: Options,

    /// Auto-attach to children of tracees.
    pub follow_forks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { options: REQUIRED_OPTIONS, follow_forks: true }
    }
}

impl Config {
    /// Options actually requested from the kernel.
    pub fn effective_options(&self) -> Options {
        let options = self.options | REQUIRED_OPTIONS;

        if self.follow_forks {
            options | FORK_OPTIONS
        } else {
            options - FORK_OPTIONS
        }
    }
}

/// How a tracee is about to leave, as reported by `PTRACE_EVENT_EXIT`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitType {
    Exit(i32),
    Signaled(Signal, bool),
}

impl ExitType {
    pub fn parse(status: u16) -> Result<Self> {
        // The bit layout of the word `status` is:
        //
        //   15                         8   7                     0
        //    +-------------------------+---+---------------------+
        //    |        exit_code        | c |       sig_no        |
        //    +-------------------------+---+---------------------+
        //
        // A nonzero `sig_no` means a signaled exit, and `c` flags a core dump.
        let sig_no = status & 0x7f;

        let ty = if sig_no == 0 {
            ExitType::Exit((status >> 8) as u8 as i32)
        } else {
            let signal = Signal::try_from(sig_no as i32)?;
            let core_dumped = status & (1 << 7) != 0;

            ExitType::Signaled(signal, core_dumped)
        };

        Ok(ty)
    }
}

/// Exactly one decoded wait status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    SyscallEnter(EntrySnapshot),
    SyscallExit(ExitSnapshot),

    /// A syscall-stop whose registers did not look like a syscall entry.
    Spurious,

    SignalDelivery { signal: Signal },
    Group { signal: Signal },

    /// Attach-stop of a new tracee.
    Attach,

    Exec { old: Pid },
    Fork { new: Pid },
    Vfork { new: Pid },
    VforkDone { new: Pid },
    Clone { new: Pid },
    Seccomp { data: u16 },
    Exiting(ExitType),

    Exited { exit_code: i32 },
    Signaled { signal: Signal, core_dumped: bool },

    /// The tracee vanished while being handled. Its TCB is gone.
    Lost,

    /// Status of a tracee we already dropped.
    Dropped { status: WaitStatus },

    /// Status of an auxiliary child.
    Auxiliary { status: WaitStatus, outcome: SignalOutcome },
}

/// One event and the pid it belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Report {
    pub pid: Pid,
    pub event: Event,
}

/// Receiver of decoded syscalls and lifecycle events. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Observer {
    fn syscall_entry(&mut self, tcb: &mut Tcb, entry: &EntrySnapshot, active: &ActivePersonality) {}

    fn syscall_exit(&mut self, tcb: &mut Tcb, exit: &ExitSnapshot, active: &ActivePersonality) {}

    /// The tracee was lost before its current syscall returned.
    fn syscall_unavailable(&mut self, tcb: &Tcb) {}

    fn signal(&mut self, tcb: &Tcb, signal: Signal, group: bool) {}

    fn exec(&mut self, tcb: &Tcb, old: Pid) {}

    fn attached(&mut self, tcb: &Tcb) {}

    fn exited(&mut self, pid: Pid, exit_code: i32) {}

    fn signaled(&mut self, pid: Pid, signal: Signal, core_dumped: bool) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Observer for Silent {}

/// Selects what reaches the [`Observer`].
#[allow(unused_variables)]
pub trait Filter {
    fn trace_syscall(&self, personality: &Personality, scno: u64) -> bool {
        true
    }

    fn trace_signal(&self, signal: Signal) -> bool {
        true
    }
}

/// Filter that lets everything through.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceAll;

impl Filter for TraceAll {}

/// Syscall tracer for a tree of Linux processes.
///
/// Every child of the calling process is reaped through [`Tracer::step()`], so children
/// that are not tracees must be registered as auxiliary children first.
pub struct Tracer {
    registry: Registry,
    children: Children,
    abi: &'static dyn SyscallAbi,
    active: ActivePersonality,
    config: Config,

    /// Tracees we gave up on, whose termination has not been reaped yet.
    dropped: HashSet<Pid>,

    #[doc(hidden)]
    _not_send: PhantomData<*const ()>,
}

impl Tracer {
    /// Tracer for the host architecture.
    pub fn new(config: Config) -> Result<Self> {
        match Arch::host() {
            Some(arch) => Ok(Self::with_arch(arch, config)),
            None => internal_error!("unsupported host architecture"),
        }
    }

    pub fn with_arch(arch: Arch, config: Config) -> Self {
        let abi = arch.abi();

        Self {
            registry: Registry::new(),
            children: Children::new(),
            abi,
            active: ActivePersonality::new(abi.personalities()),
            config,
            dropped: HashSet::new(),
            _not_send: PhantomData,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the ptrace options applied to tracees started or attached from now on.
    ///
    /// **NOTE:** [`REQUIRED_OPTIONS`] are always set, even if unset in the passed value.
    pub fn set_options(&mut self, options: Options) {
        self.config.options = options | REQUIRED_OPTIONS;
    }

    /// Choose whether tracees started or attached from now on auto-attach their children.
    ///
    /// Tracees whose options were already applied keep following forks as before.
    pub fn set_follow_forks(&mut self, follow_forks: bool) {
        self.config.follow_forks = follow_forks;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn active(&self) -> &ActivePersonality {
        &self.active
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Spawn `cmd` for tracing.
    ///
    /// The command will be configured to request `PTRACE_TRACEME` after `fork()` and
    /// pre-`exec()`. Nothing is reported for the tracee until that `exec()` completes.
    pub fn spawn(&mut self, mut cmd: Command) -> Result<Child> {
        // On fork, request `PTRACE_TRACEME`.
        unsafe {
            cmd.pre_exec(|| ptrace::traceme().map_err(|err| io::Error::from_raw_os_error(err as i32)))
        };

        let child = cmd.spawn()?;
        let pid = Pid::from_raw(child.id() as i32);

        // A self-attached tracee has default options, so its `execve()` is reported as
        // a plain `SIGTRAP`. Its options are applied at that stop.
        let handle = self.registry.create(pid)?;
        self.tcb_mut(handle)?.flags = TcbFlags::AWAIT_EXEC_STOP | TcbFlags::STARTUP | TcbFlags::HIDE_LOG;
        self.dropped.remove(&pid);

        info!(pid = pid.as_raw(), "spawned tracee");

        Ok(child)
    }

    /// Attach to a running task. This will deliver a `SIGSTOP`.
    ///
    /// **Warning:** the tracee may not be considered stopped until its attach-stop has
    /// been reported by [`Tracer::step()`].
    pub fn attach(&mut self, pid: Pid) -> Result<()> {
        if self.registry.lookup(pid).is_some() {
            return Err(Error::DuplicateTracee { pid });
        }

        ptrace::attach(pid).map_err(|source| Error::Attach { pid, source })?;

        let handle = self.registry.create(pid)?;
        self.tcb_mut(handle)?.flags = TcbFlags::ATTACHING | TcbFlags::STARTUP;
        self.dropped.remove(&pid);

        info!(pid = pid.as_raw(), "attaching to tracee");

        Ok(())
    }

    /// Trace until no children are left, or an auxiliary child asks to terminate.
    pub fn run(&mut self, observer: &mut dyn Observer, filter: &dyn Filter) -> Result<()> {
        while let Some(report) = self.step(observer, filter)? {
            if let Event::Auxiliary { outcome: SignalOutcome::Terminate, .. } = report.event {
                info!(pid = report.pid.as_raw(), "terminating on auxiliary child request");
                break;
            }
        }

        Ok(())
    }

    /// Wait for one child to change state, handle it, and resume it if it is a tracee.
    ///
    /// Returns `None` once there are no children left to wait on.
    pub fn step(&mut self, observer: &mut dyn Observer, filter: &dyn Filter) -> Result<Option<Report>> {
        let Waited { status, stime } = match wait_any()? {
            Some(waited) => waited,
            None => {
                debug!("no children to wait on");
                return Ok(None);
            },
        };

        let pid = match status.pid() {
            Some(pid) => pid,
            None => internal_error!("unreachable `wait()` status"),
        };

        trace!(pid = pid.as_raw(), ?status, "wait status");

        let res = match self.registry.lookup(pid) {
            Some(handle) => self.dispatch(handle, status, stime, observer, filter),
            None => self.dispatch_unknown(pid, status, observer),
        };

        let event = match res {
            Ok(event) => event,
            Err(err) if err.tracee_died() => {
                debug!(pid = pid.as_raw(), %err, "lost tracee");
                self.drop_tracee(pid, observer);
                Event::Lost
            },
            Err(err) => return Err(err),
        };

        Ok(Some(Report { pid, event }))
    }

    /// Detach from every tracee, then let the auxiliary children wind down.
    ///
    /// Detached tracees keep running. Those that are our children are still reaped
    /// by [`Tracer::step()`], which reports them as [`Event::Dropped`].
    ///
    /// Returns the number of auxiliary children that are still running.
    pub fn shutdown(&mut self, exit_code: i32) -> usize {
        let mut cursor = self.registry.cursor();

        while let Some(handle) = cursor.next(&self.registry) {
            let pid = handle.pid();

            match self.release(handle) {
                Ok(Released::Detached) => {
                    debug!(pid = pid.as_raw(), "detached tracee");
                    self.dropped.insert(pid);
                },
                Ok(Released::Reaped) => debug!(pid = pid.as_raw(), "tracee exited while detaching"),
                Ok(Released::Gone) => debug!(pid = pid.as_raw(), "tracee gone before detach"),
                Err(err) => {
                    warn!(pid = pid.as_raw(), %err, "error detaching tracee");
                    self.dropped.insert(pid);
                },
            }

            self.registry.destroy(handle);
        }

        self.children.notify_all_of_exit(exit_code);
        self.children.wait_all(exit_code)
    }

    // Detach one tracee, first forcing it into a ptrace-stop if it is running.
    fn release(&mut self, handle: TcbHandle) -> Result<Released> {
        let tracee = Tracee::new(handle.pid());

        match tracee.detach(None) {
            Ok(()) => return Ok(Released::Detached),
            // Not in a ptrace-stop, or gone.
            Err(err) if err.tracee_died() => {},
            Err(err) => return Err(err),
        }

        let flags = self.tcb_mut(handle)?.flags;

        // A tracee still waiting for its attach-stop already has a `SIGSTOP` pending.
        if !flags.contains(TcbFlags::ATTACHING) {
            match tracee.stop() {
                Ok(()) => {},
                Err(err) if err.tracee_died() => return Ok(Released::Gone),
                Err(err) => return Err(err),
            }
        }

        loop {
            let Some(status) = tracee.wait()? else {
                return Ok(Released::Gone);
            };

            trace!(pid = handle.pid().as_raw(), ?status, "wait status while detaching");

            let res = match status {
                WaitStatus::Exited(..) | WaitStatus::Signaled(..) => return Ok(Released::Reaped),
                WaitStatus::Stopped(_, Signal::SIGSTOP) => {
                    tracee.detach(None)?;
                    return Ok(Released::Detached);
                },
                // Exec and syscall traps of a tracee without options are ours.
                WaitStatus::Stopped(_, Signal::SIGTRAP)
                    if flags.intersects(TcbFlags::STARTUP | TcbFlags::AWAIT_EXEC_STOP) =>
                {
                    tracee.restart(Restart::Continue, None)
                },
                // Re-inject anything else, and keep waiting for our `SIGSTOP`.
                WaitStatus::Stopped(_, signal) => tracee.restart(Restart::Continue, Some(signal)),
                _ => tracee.restart(Restart::Continue, None),
            };

            // A tracee killed meanwhile still reports its exit.
            match res {
                Err(err) if !err.tracee_died() => return Err(err),
                _ => {},
            }
        }
    }

    fn tcb_mut(&mut self, handle: TcbHandle) -> Result<&mut Tcb> {
        live(&mut self.registry, handle)
    }

    // Give up on a tracee that vanished mid-handling.
    fn drop_tracee(&mut self, pid: Pid, observer: &mut dyn Observer) {
        if let Some(handle) = self.registry.lookup(pid) {
            self.retire(handle, observer);
        }

        self.dropped.insert(pid);
    }

    // Destroy the TCB, flagging a syscall that will never return.
    fn retire(&mut self, handle: TcbHandle, observer: &mut dyn Observer) {
        if let Some(tcb) = self.registry.get(handle) {
            if tcb.in_syscall() && !tcb.flags.intersects(TcbFlags::FILTERED | TcbFlags::HIDE_LOG) {
                observer.syscall_unavailable(tcb);
            }
        }

        info!(pid = handle.pid().as_raw(), "removing tracee");
        self.registry.destroy(handle);
    }

    fn dispatch_unknown(&mut self, pid: Pid, status: WaitStatus, observer: &mut dyn Observer) -> Result<Event> {
        if self.dropped.contains(&pid) {
            if matches!(status, WaitStatus::Exited(..) | WaitStatus::Signaled(..)) {
                debug!(pid = pid.as_raw(), ?status, "reaped dropped tracee");
                self.dropped.remove(&pid);
            } else if let Err(err) = Tracee::new(pid).detach(None) {
                // Still stopped under us. Let it go.
                debug!(pid = pid.as_raw(), %err, "could not detach dropped tracee");
            }

            return Ok(Event::Dropped { status });
        }

        match self.children.signal(pid, status) {
            SignalOutcome::Unclaimed => {},
            outcome => return Ok(Event::Auxiliary { status, outcome }),
        }

        match status {
            WaitStatus::Stopped(_, Signal::SIGSTOP) if self.follows_forks() => {
                // An auto-attached child can report its attach-stop before the
                // ptrace-event-stop of its parent. Its options are inherited.
                let personality = self.active.index();
                let handle = self.registry.create(pid)?;
                let tcb = self.tcb_mut(handle)?;
                tcb.flags = TcbFlags::FOLLOW_FORKS;
                tcb.personality = personality;

                info!(pid = pid.as_raw(), "saw attach-stop of new tracee before its parent's event");

                if let Some(tcb) = self.registry.get(handle) {
                    observer.attached(tcb);
                }

                Tracee::new(pid).restart(Restart::Syscall, None)?;

                Ok(Event::Attach)
            },
            _ => Err(Error::UnknownPid { pid, status }),
        }
    }

    // True if some tracee can still have children auto-attached.
    fn follows_forks(&self) -> bool {
        self.registry.iter().any(|tcb| tcb.flags.contains(TcbFlags::FOLLOW_FORKS))
    }

    fn dispatch(
        &mut self,
        handle: TcbHandle,
        status: WaitStatus,
        stime: Duration,
        observer: &mut dyn Observer,
        filter: &dyn Filter,
    ) -> Result<Event> {
        let pid = handle.pid();
        let flags = self.tcb_mut(handle)?.flags;

        match status {
            WaitStatus::Exited(_, exit_code) => {
                self.retire(handle, observer);
                observer.exited(pid, exit_code);

                Ok(Event::Exited { exit_code })
            },
            WaitStatus::Signaled(_, signal, core_dumped) => {
                self.retire(handle, observer);
                observer.signaled(pid, signal, core_dumped);

                Ok(Event::Signaled { signal, core_dumped })
            },
            WaitStatus::Stopped(_, Signal::SIGTRAP)
                if flags.contains(TcbFlags::AWAIT_EXEC_STOP) && !flags.contains(TcbFlags::IN_SYSCALL) =>
            {
                self.exec_trap(handle, observer)
            },
            WaitStatus::Stopped(_, Signal::SIGTRAP)
                if flags.contains(TcbFlags::STARTUP) && !flags.contains(TcbFlags::ATTACHING) =>
            {
                // Without `PTRACE_O_TRACESYSGOOD`, syscall-stops are plain `SIGTRAP`s.
                self.syscall_stop(handle, stime, observer, filter)
            },
            WaitStatus::Stopped(_, Signal::SIGSTOP) if flags.contains(TcbFlags::ATTACHING) => {
                self.attach_stop(handle, observer)
            },
            WaitStatus::Stopped(_, signal) => self.signal_stop(handle, signal, observer, filter),
            WaitStatus::PtraceEvent(_, _, code) => self.event_stop(handle, code, observer),
            WaitStatus::PtraceSyscall(_) => self.syscall_stop(handle, stime, observer, filter),
            // Assume `!WNOHANG`, `!WCONTINUED`.
            WaitStatus::Continued(_) | WaitStatus::StillAlive => internal_error!("unreachable `wait()` status"),
        }
    }

    // Apply the configured options, degrading to plain `SIGTRAP` syscall-stops if the
    // kernel refuses them.
    fn apply_options(&mut self, handle: TcbHandle) -> Result<()> {
        let options = self.config.effective_options();

        match Tracee::new(handle.pid()).set_options(options) {
            Ok(()) => {
                let tcb = self.tcb_mut(handle)?;
                tcb.flags.remove(TcbFlags::STARTUP);
                tcb.flags.set(TcbFlags::FOLLOW_FORKS, options.intersects(FORK_OPTIONS));
            },
            Err(err) if err.tracee_died() => return Err(err),
            Err(err) => {
                warn!(pid = handle.pid().as_raw(), %err, "could not set ptrace options");
            },
        }

        Ok(())
    }

    fn exec_trap(&mut self, handle: TcbHandle, observer: &mut dyn Observer) -> Result<Event> {
        let pid = handle.pid();

        if self.tcb_mut(handle)?.flags.contains(TcbFlags::STARTUP) {
            self.apply_options(handle)?;
        }

        let tcb = self.tcb_mut(handle)?;
        tcb.flags.remove(TcbFlags::AWAIT_EXEC_STOP | TcbFlags::HIDE_LOG);
        observer.exec(tcb, pid);

        debug!(pid = pid.as_raw(), "suppressed post-exec SIGTRAP");

        Tracee::new(pid).restart(Restart::Syscall, None)?;

        Ok(Event::Exec { old: pid })
    }

    fn attach_stop(&mut self, handle: TcbHandle, observer: &mut dyn Observer) -> Result<Event> {
        let pid = handle.pid();

        self.tcb_mut(handle)?.flags.remove(TcbFlags::ATTACHING);

        if self.tcb_mut(handle)?.flags.contains(TcbFlags::STARTUP) {
            self.apply_options(handle)?;
        }

        observer.attached(self.tcb_mut(handle)?);

        Tracee::new(pid).restart(Restart::Syscall, None)?;

        Ok(Event::Attach)
    }

    fn signal_stop(
        &mut self,
        handle: TcbHandle,
        signal: Signal,
        observer: &mut dyn Observer,
        filter: &dyn Filter,
    ) -> Result<Event> {
        let pid = handle.pid();
        let group = is_group_stop(pid, signal)?;

        let tcb = self.tcb_mut(handle)?;
        if !tcb.flags.contains(TcbFlags::HIDE_LOG) && filter.trace_signal(signal) {
            observer.signal(tcb, signal, group);
        }

        if group {
            Tracee::new(pid).restart(Restart::Syscall, None)?;

            Ok(Event::Group { signal })
        } else {
            Tracee::new(pid).restart(Restart::Syscall, Some(signal))?;

            Ok(Event::SignalDelivery { signal })
        }
    }

    fn event_stop(&mut self, handle: TcbHandle, code: i32, observer: &mut dyn Observer) -> Result<Event> {
        let pid = handle.pid();
        let tracee = Tracee::new(pid);

        let (event, restart) = match code {
            libc::PTRACE_EVENT_FORK => (Event::Fork { new: self.adopt(handle)? }, Restart::Syscall),
            libc::PTRACE_EVENT_VFORK => (Event::Vfork { new: self.adopt(handle)? }, Restart::Syscall),
            libc::PTRACE_EVENT_CLONE => (Event::Clone { new: self.adopt(handle)? }, Restart::Syscall),
            libc::PTRACE_EVENT_VFORK_DONE => {
                let new = Pid::from_raw(tracee.event_message()? as u32 as i32);

                (Event::VforkDone { new }, Restart::Syscall)
            },
            libc::PTRACE_EVENT_EXEC => {
                // The exec'ing thread now has the tgid as its tid, whatever it had before.
                let old = Pid::from_raw(tracee.event_message()? as u32 as i32);

                if old != pid {
                    self.take_over(handle, old)?;
                }

                let tcb = self.tcb_mut(handle)?;
                tcb.flags.remove(TcbFlags::AWAIT_EXEC_STOP | TcbFlags::HIDE_LOG);
                observer.exec(tcb, old);

                (Event::Exec { old }, Restart::Syscall)
            },
            libc::PTRACE_EVENT_EXIT => {
                // The pending wait status, of which only the low 16-bit word matters.
                let status = tracee.event_message()? as u16;
                let exit = ExitType::parse(status)?;

                debug!(pid = pid.as_raw(), ?exit, "tracee exiting");

                (Event::Exiting(exit), Restart::Continue)
            },
            libc::PTRACE_EVENT_SECCOMP => {
                // `SECCOMP_RET_DATA`, which is the low 16 bits of an int.
                let data = tracee.event_message()? as u16;

                (Event::Seccomp { data }, Restart::Syscall)
            },
            libc::PTRACE_EVENT_STOP => internal_error!("unreachable ptrace-event-stop"),
            _ => internal_error!("unexpected ptrace-event-stop code"),
        };

        tracee.restart(restart, None)?;

        Ok(event)
    }

    // Register the child announced by a fork-like ptrace-event-stop of `parent`.
    fn adopt(&mut self, parent: TcbHandle) -> Result<Pid> {
        let new = Pid::from_raw(Tracee::new(parent.pid()).event_message()? as u32 as i32);
        let (personality, flags) = {
            let tcb = self.tcb_mut(parent)?;
            (tcb.personality, tcb.flags)
        };

        // The child may have reported its attach-stop already.
        if self.registry.lookup(new).is_none() && !self.dropped.contains(&new) {
            let handle = self.registry.create(new)?;
            let tcb = self.tcb_mut(handle)?;
            tcb.flags = TcbFlags::ATTACHING | (flags & TcbFlags::FOLLOW_FORKS);
            tcb.personality = personality;

            info!(pid = new.as_raw(), parent = parent.pid().as_raw(), "attaching to new tracee");
        }

        Ok(new)
    }

    // After an off-leader `execve()`, the leader's tid belongs to the exec'ing thread,
    // whose in-flight syscall moves along with it.
    fn take_over(&mut self, leader: TcbHandle, old: Pid) -> Result<()> {
        debug!(pid = leader.pid().as_raw(), old = old.as_raw(), "exec off thread-group leader");

        let Some(thread) = self.registry.lookup(old) else {
            return Ok(());
        };

        let (flags, personality, scno, args, nargs, entry_time, entry_stime) = {
            let t = live(&mut self.registry, thread)?;
            (t.flags, t.personality, t.scno, t.args, t.nargs, t.entry_time, t.entry_stime)
        };

        self.registry.destroy(thread);

        let tcb = self.tcb_mut(leader)?;
        tcb.clear_private();
        tcb.flags = flags;
        tcb.personality = personality;
        tcb.scno = scno;
        tcb.args = args;
        tcb.nargs = nargs;
        tcb.entry_time = entry_time;
        tcb.entry_stime = entry_stime;

        Ok(())
    }

    fn syscall_stop(
        &mut self,
        handle: TcbHandle,
        stime: Duration,
        observer: &mut dyn Observer,
        filter: &dyn Filter,
    ) -> Result<Event> {
        let tracee = Tracee::new(handle.pid());
        let abi = self.abi;
        let tcb = live(&mut self.registry, handle)?;

        if tcb.flags.contains(TcbFlags::ATTACHING) {
            warn!(pid = tracee.pid().as_raw(), "syscall-stop before attach-stop");
            tcb.flags.remove(TcbFlags::ATTACHING);
        }

        let event = if tcb.in_syscall() {
            let exit = resolve::resolve_exit(abi, &tracee, tcb, &mut self.active, stime)?;

            if !matches!(exit.outcome, Outcome::Success(_)) {
                // A failed `execve()` never traps.
                tcb.flags.remove(TcbFlags::AWAIT_EXEC_STOP);
            }

            if !tcb.flags.intersects(TcbFlags::FILTERED | TcbFlags::HIDE_LOG) {
                observer.syscall_exit(tcb, &exit, &self.active);
            }

            tcb.end_syscall();

            Event::SyscallExit(exit)
        } else {
            match resolve::resolve_entry(abi, &tracee, tcb, &mut self.active, stime)? {
                Some(entry) => {
                    let personality = &abi.personalities()[entry.personality];

                    if !filter.trace_syscall(personality, entry.scno) {
                        tcb.flags.insert(TcbFlags::FILTERED);
                    }

                    // Without `PTRACE_O_TRACEEXEC`, a successful exec is followed by a `SIGTRAP`.
                    if personality.syscall(entry.scno).is_exec() && tcb.flags.contains(TcbFlags::STARTUP) {
                        tcb.flags.insert(TcbFlags::AWAIT_EXEC_STOP);
                    }

                    if !tcb.flags.intersects(TcbFlags::FILTERED | TcbFlags::HIDE_LOG) {
                        observer.syscall_entry(tcb, &entry, &self.active);
                    }

                    Event::SyscallEnter(entry)
                },
                None => Event::Spurious,
            }
        };

        tracee.restart(Restart::Syscall, None)?;

        Ok(event)
    }
}

// How a tracee left during shutdown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Released {
    Detached,

    /// Exited before it stopped, and its status is consumed.
    Reaped,

    /// Already gone, or not ours to wait on.
    Gone,
}

fn live(registry: &mut Registry, handle: TcbHandle) -> Result<&mut Tcb> {
    match registry.get_mut(handle) {
        Some(tcb) => Ok(tcb),
        None => internal_error!(format!("stale handle for pid {}", handle.pid())),
    }
}

// Check if a wait stop with signal delivery is a group-stop.
//
// Assumes attach-stop has already been ruled out.
fn is_group_stop(pid: Pid, sig: Signal) -> Result<bool> {
    use Signal::*;

    match sig {
        SIGSTOP | SIGTSTP | SIGTTIN | SIGTTOU => {
            // If `PTRACE_GETSIGINFO` fails with `EINVAL`, then it is definitely a group-stop.
            match ptrace::getsiginfo(pid) {
                Err(Errno::EINVAL) => Ok(true),
                res => res.died_if_esrch(pid).map(|_| false),
            }
        },
        // Only the four stopping signals can cause a group-stop.
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_type_parse() {
        assert_eq!(ExitType::parse(0).unwrap(), ExitType::Exit(0));
        assert_eq!(ExitType::parse(3 << 8).unwrap(), ExitType::Exit(3));
        assert_eq!(ExitType::parse(0xff << 8).unwrap(), ExitType::Exit(255));
        assert_eq!(ExitType::parse(9).unwrap(), ExitType::Signaled(Signal::SIGKILL, false));
        assert_eq!(ExitType::parse(0x80 | 5).unwrap(), ExitType::Signaled(Signal::SIGTRAP, true));
    }

    #[test]
    fn test_exit_type_rejects_bad_signal() {
        assert!(ExitType::parse(0x7f).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.follow_forks);
        assert!(config.effective_options().contains(REQUIRED_OPTIONS | FORK_OPTIONS));
    }

    #[test]
    fn test_options_without_forks() {
        let config = Config { options: Options::all(), follow_forks: false };
        let options = config.effective_options();

        assert!(options.contains(REQUIRED_OPTIONS));
        assert!(!options.intersects(FORK_OPTIONS));
    }

    #[test]
    fn test_set_options_keeps_required() {
        let mut tracer = Tracer::with_arch(Arch::X86_64, Config::default());
        tracer.set_options(Options::PTRACE_O_TRACESECCOMP);

        assert!(tracer.config().options.contains(REQUIRED_OPTIONS));
        assert!(tracer.config().options.contains(Options::PTRACE_O_TRACESECCOMP));
    }

    #[test]
    fn test_new_tracer_is_native() {
        for arch in [Arch::X86_64, Arch::Aarch64] {
            let tracer = Tracer::with_arch(arch, Config::default());

            assert_eq!(tracer.active().index(), 0);
            assert!(tracer.registry().is_empty());
            assert!(tracer.children().is_empty());
        }
    }

    #[test]
    fn test_follow_forks_is_decided_by_live_tracees() {
        let mut tracer = Tracer::with_arch(Arch::X86_64, Config::default());
        assert!(!tracer.follows_forks());

        let handle = tracer.registry.create(Pid::from_raw(i32::MAX)).unwrap();
        tracer.registry.get_mut(handle).unwrap().flags = TcbFlags::FOLLOW_FORKS;

        // Tracees that already have fork options keep them.
        tracer.set_follow_forks(false);
        assert!(tracer.follows_forks());
        assert!(!tracer.config().effective_options().intersects(FORK_OPTIONS));

        tracer.registry.destroy(handle);
        assert!(!tracer.follows_forks());
    }

    #[test]
    fn test_attach_twice_is_duplicate() {
        let mut tracer = Tracer::with_arch(Arch::X86_64, Config::default());
        let pid = Pid::from_raw(i32::MAX);
        tracer.registry.create(pid).unwrap();

        let err = tracer.attach(pid).unwrap_err();
        assert!(matches!(err, Error::DuplicateTracee { .. }));
    }
}
