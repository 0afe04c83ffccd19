//! Trace control blocks: per-tracee state, and the registry that owns them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use bitflags::bitflags;
use tracing::debug;

use crate::error::{Error, Result};
use crate::personality::MAX_ARGS;
use crate::ptrace::Pid;
use crate::resolve::RestartKind;

bitflags! {
    /// Lifecycle state of one tracee.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct TcbFlags: u32 {
        /// Between a syscall-entry-stop and its syscall-exit-stop.
        const IN_SYSCALL = 1 << 0;

        /// The current syscall is not reported.
        const FILTERED = 1 << 1;

        /// An `execve()` is in flight and its post-exec `SIGTRAP` has not been seen.
        const AWAIT_EXEC_STOP = 1 << 2;

        /// The tracee's options make the kernel auto-attach its new children.
        const FOLLOW_FORKS = 1 << 3;

        /// Waiting for the `SIGSTOP` that completes `PTRACE_ATTACH`.
        const ATTACHING = 1 << 4;

        /// Tracing options have not been applied yet.
        const STARTUP = 1 << 5;

        /// Nothing is reported until the first `execve()` completes.
        const HIDE_LOG = 1 << 6;
    }
}

struct PrivateData {
    data: Box<dyn Any>,
    release: Box<dyn FnOnce(Box<dyn Any>)>,
}

impl fmt::Debug for PrivateData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateData").finish_non_exhaustive()
    }
}

/// Trace control block of one traced thread.
#[derive(Debug)]
pub struct Tcb {
    pid: Pid,
    pub flags: TcbFlags,

    /// Index of the personality the current syscall was made under.
    pub personality: usize,

    /// Syscall number. Only meaningful while `IN_SYSCALL` is set.
    pub scno: u64,
    pub args: [u64; MAX_ARGS],
    pub nargs: usize,

    /// Successful return value of the last finished syscall.
    pub raw_result: Option<u64>,

    /// Errno of the last finished syscall, if it failed.
    pub error: Option<i32>,

    /// Set instead of `error` when the kernel will restart the syscall.
    pub restart: Option<RestartKind>,

    /// Wall-clock time of the last syscall-entry-stop.
    pub entry_time: Option<Instant>,

    /// System time the tracee had consumed at its last syscall-entry-stop.
    pub entry_stime: Duration,

    /// System time spent in the last finished syscall.
    pub delta_stime: Duration,

    private: Option<PrivateData>,
}

impl Tcb {
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            flags: TcbFlags::empty(),
            personality: 0,
            scno: 0,
            args: [0; MAX_ARGS],
            nargs: 0,
            raw_result: None,
            error: None,
            restart: None,
            entry_time: None,
            entry_stime: Duration::ZERO,
            delta_stime: Duration::ZERO,
            private: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn in_syscall(&self) -> bool {
        self.flags.contains(TcbFlags::IN_SYSCALL)
    }

    /// Arguments of the current syscall, as many as its table entry declares.
    pub fn args(&self) -> &[u64] {
        &self.args[..self.nargs.min(MAX_ARGS)]
    }

    /// Attach decoder state, releasing any previous state first.
    ///
    /// `release` runs exactly once: when the state is replaced, cleared, or the TCB
    /// is dropped.
    pub fn set_private<T: Any>(&mut self, data: T, release: impl FnOnce(T) + 'static) {
        self.clear_private();

        let release = Box::new(move |data: Box<dyn Any>| {
            if let Ok(data) = data.downcast::<T>() {
                release(*data);
            }
        });

        self.private = Some(PrivateData { data: Box::new(data), release });
    }

    pub fn private<T: Any>(&self) -> Option<&T> {
        self.private.as_ref()?.data.downcast_ref()
    }

    pub fn private_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.private.as_mut()?.data.downcast_mut()
    }

    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    pub fn clear_private(&mut self) {
        if let Some(PrivateData { data, release }) = self.private.take() {
            release(data);
        }
    }

    /// Forget the in-flight syscall, as after its exit has been reported.
    pub(crate) fn end_syscall(&mut self) {
        self.flags.remove(TcbFlags::IN_SYSCALL | TcbFlags::FILTERED);
        self.entry_time = None;
    }
}

impl Drop for Tcb {
    fn drop(&mut self) {
        self.clear_private();
    }
}

/// Names one live TCB in a [`Registry`].
///
/// A handle whose TCB was destroyed never resolves again, even if its slot is reused
/// for the same pid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TcbHandle {
    slot: usize,
    generation: u64,
    pid: Pid,
}

impl TcbHandle {
    pub fn pid(&self) -> Pid {
        self.pid
    }
}

#[derive(Debug, Default)]
struct Slot {
    /// Bumped every time the slot's TCB is destroyed.
    generation: u64,
    tcb: Option<Tcb>,
}

impl Slot {
    fn handle(&self, slot: usize) -> Option<TcbHandle> {
        let pid = self.tcb.as_ref()?.pid;

        Some(TcbHandle { slot, generation: self.generation, pid })
    }
}

/// Owner of every live TCB, indexed by pid.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    free: Vec<usize>,
    by_pid: HashMap<Pid, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the TCB of a newly-seen tracee.
    ///
    /// Fails if `pid` already has a live TCB.
    pub fn create(&mut self, pid: Pid) -> Result<TcbHandle> {
        if self.by_pid.contains_key(&pid) {
            return Err(Error::DuplicateTracee { pid });
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            },
        };

        let entry = &mut self.slots[slot];
        entry.tcb = Some(Tcb::new(pid));

        self.by_pid.insert(pid, slot);
        debug!(pid = pid.as_raw(), slot, generation = entry.generation, "created tcb");

        Ok(TcbHandle { slot, generation: entry.generation, pid })
    }

    pub fn lookup(&self, pid: Pid) -> Option<TcbHandle> {
        let slot = *self.by_pid.get(&pid)?;

        self.slots[slot].handle(slot)
    }

    pub fn get(&self, handle: TcbHandle) -> Option<&Tcb> {
        let slot = self.slots.get(handle.slot)?;

        if slot.generation != handle.generation {
            return None;
        }

        slot.tcb.as_ref()
    }

    pub fn get_mut(&mut self, handle: TcbHandle) -> Option<&mut Tcb> {
        let slot = self.slots.get_mut(handle.slot)?;

        if slot.generation != handle.generation {
            return None;
        }

        slot.tcb.as_mut()
    }

    /// Destroy a TCB, releasing its private decoder state, and free its slot.
    ///
    /// Returns `false` for stale handles.
    pub fn destroy(&mut self, handle: TcbHandle) -> bool {
        if self.get(handle).is_none() {
            return false;
        }

        // Dropping the TCB runs the private state's release callback.
        let slot = &mut self.slots[handle.slot];
        slot.tcb = None;
        slot.generation += 1;

        self.by_pid.remove(&handle.pid);
        self.free.push(handle.slot);

        debug!(pid = handle.pid.as_raw(), slot = handle.slot, "destroyed tcb");

        true
    }

    /// Start a walk over the live TCBs.
    pub fn cursor(&self) -> Cursor {
        Cursor { next: 0 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tcb> {
        self.slots.iter().filter_map(|slot| slot.tcb.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tcb> {
        self.slots.iter_mut().filter_map(|slot| slot.tcb.as_mut())
    }

    pub fn len(&self) -> usize {
        self.by_pid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pid.is_empty()
    }
}

/// Position in a walk over a [`Registry`].
///
/// The cursor does not borrow the registry, so the element it last returned may be
/// destroyed before asking for the next one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    next: usize,
}

impl Cursor {
    pub fn next(&mut self, registry: &Registry) -> Option<TcbHandle> {
        while self.next < registry.slots.len() {
            let slot = self.next;
            self.next += 1;

            if let Some(handle) = registry.slots[slot].handle(slot) {
                return Some(handle);
            }
        }

        None
    }
}
