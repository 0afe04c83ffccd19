//! Syscall-stop resolution: what was called on entry, and how it ended on exit.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::arch::{SyscallAbi, SyscallContext};
use crate::error::Result;
use crate::personality::{ActivePersonality, Personality, Syscall, MAX_ARGS};
use crate::ptrace::Task;
use crate::tcb::{Tcb, TcbFlags};

/// Kernel-internal errnos meaning the syscall will be restarted, not failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RestartKind {
    /// `ERESTARTSYS`: restarted unless a handler without `SA_RESTART` runs.
    Sys,

    /// `ERESTARTNOINTR`: always restarted.
    NoIntr,

    /// `ERESTARTNOHAND`: restarted only if no handler runs.
    NoHand,

    /// `ERESTART_RESTARTBLOCK`: resumed through `restart_syscall(2)`.
    RestartBlock,
}

impl RestartKind {
    pub const ERESTARTSYS: i32 = 512;
    pub const ERESTARTNOINTR: i32 = 513;
    pub const ERESTARTNOHAND: i32 = 514;
    pub const ERESTART_RESTARTBLOCK: i32 = 516;

    pub fn from_errno(errno: i32) -> Option<Self> {
        match errno {
            Self::ERESTARTSYS => Some(RestartKind::Sys),
            Self::ERESTARTNOINTR => Some(RestartKind::NoIntr),
            Self::ERESTARTNOHAND => Some(RestartKind::NoHand),
            Self::ERESTART_RESTARTBLOCK => Some(RestartKind::RestartBlock),
            _ => None,
        }
    }

    pub fn errno(self) -> i32 {
        match self {
            RestartKind::Sys => Self::ERESTARTSYS,
            RestartKind::NoIntr => Self::ERESTARTNOINTR,
            RestartKind::NoHand => Self::ERESTARTNOHAND,
            RestartKind::RestartBlock => Self::ERESTART_RESTARTBLOCK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RestartKind::Sys => "ERESTARTSYS",
            RestartKind::NoIntr => "ERESTARTNOINTR",
            RestartKind::NoHand => "ERESTARTNOHAND",
            RestartKind::RestartBlock => "ERESTART_RESTARTBLOCK",
        }
    }
}

impl fmt::Display for RestartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a syscall ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Return value, truncated to the personality's `long`.
    Success(u64),

    /// Positive errno.
    Error(i32),

    /// Interrupted; the kernel will restart it and no return value exists yet.
    Restart(RestartKind),
}

/// Syscall identity captured at a syscall-entry-stop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntrySnapshot {
    pub personality: usize,
    pub scno: u64,
    pub args: [u64; MAX_ARGS],
    pub nargs: usize,
    pub entry_time: Instant,

    /// The tracee switched personality since its last syscall.
    pub personality_changed: bool,
}

impl EntrySnapshot {
    pub fn args(&self) -> &[u64] {
        &self.args[..self.nargs]
    }
}

/// Syscall result captured at a syscall-exit-stop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExitSnapshot {
    pub outcome: Outcome,

    /// System time the tracee spent between entry and exit.
    pub delta_stime: Duration,
}

/// Resolve a syscall-entry-stop of `task` into `tcb`.
///
/// Returns `None` if the registers show the stop was not really a syscall entry. In
/// that case neither `tcb` nor `active` is touched.
///
/// `stime` is the tracee's system time as of this stop.
pub fn resolve_entry(
    abi: &dyn SyscallAbi,
    task: &dyn Task,
    tcb: &mut Tcb,
    active: &mut ActivePersonality,
    stime: Duration,
) -> Result<Option<EntrySnapshot>> {
    let regs = task.registers()?;
    let personalities = abi.personalities();

    let personality = abi.detect_personality(&regs, tcb.personality);
    if personality >= personalities.len() {
        internal_error!(format!("personality {personality} out of range"));
    }

    if !abi.is_syscall_entry(&regs, personality)? {
        debug!(pid = task.pid().as_raw(), personality, "stop is not a syscall entry");
        return Ok(None);
    }

    let mut ctx = SyscallContext {
        personality,
        scno: abi.syscall_number(&regs, personality)?,
        args: abi.arguments(&regs, personality)?,
        nargs: MAX_ARGS,
    };

    abi.decode_subcall(task, &mut ctx)?;

    let syscall = personalities[personality].syscall(ctx.scno);
    ctx.nargs = syscall.nargs();

    for arg in &mut ctx.args[ctx.nargs..] {
        *arg = 0;
    }

    // Every value is known; commit them together.
    let personality_changed = tcb.personality != personality;
    let entry_time = Instant::now();

    tcb.personality = personality;
    tcb.scno = ctx.scno;
    tcb.args = ctx.args;
    tcb.nargs = ctx.nargs;
    tcb.raw_result = None;
    tcb.error = None;
    tcb.restart = None;
    tcb.entry_time = Some(entry_time);
    tcb.entry_stime = stime;
    tcb.flags.insert(TcbFlags::IN_SYSCALL);

    if active.commit(personality) {
        debug!(pid = task.pid().as_raw(), personality = active.personality().name, "switched personality");
    }

    trace!(pid = task.pid().as_raw(), %syscall, args = ?&ctx.args[..ctx.nargs], "syscall entry");

    Ok(Some(EntrySnapshot {
        personality,
        scno: ctx.scno,
        args: ctx.args,
        nargs: ctx.nargs,
        entry_time,
        personality_changed,
    }))
}

/// Resolve the syscall-exit-stop of the syscall recorded in `tcb`.
///
/// `stime` is the tracee's system time as of this stop.
pub fn resolve_exit(
    abi: &dyn SyscallAbi,
    task: &dyn Task,
    tcb: &mut Tcb,
    active: &mut ActivePersonality,
    stime: Duration,
) -> Result<ExitSnapshot> {
    let regs = task.registers()?;

    // Other tracees may have switched the active personality since this entry.
    active.commit(tcb.personality);

    let personality = active.personality();
    let syscall = personality.syscall(tcb.scno);
    let raw = abi.result(&regs, active.index())?;
    let outcome = classify(personality, &syscall, raw);

    match outcome {
        Outcome::Success(value) => {
            tcb.raw_result = Some(value);
            tcb.error = None;
            tcb.restart = None;
        },
        Outcome::Error(errno) => {
            tcb.raw_result = None;
            tcb.error = Some(errno);
            tcb.restart = None;
        },
        Outcome::Restart(kind) => {
            tcb.raw_result = None;
            tcb.error = None;
            tcb.restart = Some(kind);
        },
    }

    let delta_stime = stime.saturating_sub(tcb.entry_stime);
    tcb.delta_stime = delta_stime;

    trace!(pid = task.pid().as_raw(), %syscall, ?outcome, "syscall exit");

    Ok(ExitSnapshot { outcome, delta_stime })
}

/// Classify the raw return register of `syscall` under `personality`.
pub fn classify(personality: &Personality, syscall: &Syscall, raw: u64) -> Outcome {
    if syscall.never_fails() || !personality.is_negated_errno(raw) {
        return Outcome::Success(personality.truncate(raw));
    }

    let errno = -personality.sign_extend(raw) as i32;

    match RestartKind::from_errno(errno) {
        Some(kind) => Outcome::Restart(kind),
        None => Outcome::Error(errno),
    }
}

#[cfg(test)]
mod tests {
    use crate::arch::aarch64::{self, Aarch64, ArmRegs};
    use crate::arch::x86_64::{self, Regs};
    use crate::arch::{Arch, RegisterSet};
    use crate::error::Error;
    use crate::ptrace::{Errno, Pid};

    use super::*;

    struct FakeTask {
        regs: Option<RegisterSet>,
    }

    impl Task for FakeTask {
        fn pid(&self) -> Pid {
            Pid::from_raw(77)
        }

        fn registers(&self) -> Result<RegisterSet> {
            self.regs.ok_or(Error::TraceeDied { pid: self.pid(), source: Errno::ESRCH })
        }

        fn read_memory(&self, _addr: u64, _data: &mut [u8]) -> Result<usize> {
            Err(Error::OS(Errno::EIO))
        }
    }

    fn task(regs: RegisterSet) -> FakeTask {
        FakeTask { regs: Some(regs) }
    }

    const ENOSYS: u64 = -(libc::ENOSYS as i64) as u64;

    fn x86_entry(cs: u64, orig_rax: u64) -> RegisterSet {
        RegisterSet::X86_64(Regs {
            cs,
            orig_rax,
            rax: ENOSYS,
            rdi: 1,
            rsi: 2,
            rdx: 3,
            r10: 4,
            r8: 5,
            r9: 6,
            rbx: 11,
            rcx: 12,
            rbp: 16,
            ..Default::default()
        })
    }

    fn x86_exit(rax: u64) -> RegisterSet {
        RegisterSet::X86_64(Regs { cs: 0x33, rax, ..Default::default() })
    }

    fn arm_entry(r7: u32) -> RegisterSet {
        let mut regs = ArmRegs::default();
        regs.uregs[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        regs.uregs[7] = r7;
        RegisterSet::Arm(regs)
    }

    fn aarch64_entry(x8: u64) -> RegisterSet {
        let mut regs = aarch64::Regs::default();
        regs.regs[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        regs.regs[8] = x8;
        RegisterSet::Aarch64(regs)
    }

    fn assert_consistent(abi: &dyn SyscallAbi, tcb: &Tcb, active: &ActivePersonality, snap: &EntrySnapshot) {
        let table = &abi.personalities()[tcb.personality];
        let expected = table.syscall(tcb.scno).nargs();

        assert_eq!(snap.personality, tcb.personality);
        assert_eq!(active.index(), tcb.personality);
        assert_eq!(tcb.nargs, expected);
        assert_eq!(snap.nargs, expected);
        assert!(tcb.args[tcb.nargs..].iter().all(|&a| a == 0));
        assert!(tcb.in_syscall());
    }

    #[test]
    fn test_i386_entry_uses_compat_table() {
        let abi = Arch::X86_64.abi();
        let mut tcb = Tcb::new(Pid::from_raw(77));
        let mut active = ActivePersonality::new(abi.personalities());

        // 5 is `open` (3 args) for i386, but `fstat` (2 args) for x86_64.
        let snap = resolve_entry(abi, &task(x86_entry(0x23, 5)), &mut tcb, &mut active, Duration::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(tcb.personality, x86_64::I386);
        assert_eq!(active.personality().name, "i386");
        assert_eq!(active.personality().syscall(tcb.scno).name(), "open");
        assert_eq!(tcb.args(), &[11, 12, 3]);
        assert!(snap.personality_changed);
        assert_consistent(abi, &tcb, &active, &snap);
    }

    #[test]
    fn test_native_and_x32_entries() {
        let abi = Arch::X86_64.abi();
        let mut tcb = Tcb::new(Pid::from_raw(77));
        let mut active = ActivePersonality::new(abi.personalities());

        let snap = resolve_entry(abi, &task(x86_entry(0x33, 5)), &mut tcb, &mut active, Duration::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(tcb.personality, x86_64::NATIVE);
        assert_eq!(tcb.args(), &[1, 2]);
        assert!(!snap.personality_changed);
        assert_consistent(abi, &tcb, &active, &snap);

        tcb.end_syscall();

        let orig_rax = x86_64::X32_SYSCALL_BIT | 257;
        let snap = resolve_entry(abi, &task(x86_entry(0x33, orig_rax)), &mut tcb, &mut active, Duration::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(tcb.personality, x86_64::X32);
        assert_eq!(tcb.scno, 257);
        assert_eq!(active.personality().syscall(tcb.scno).name(), "openat");
        assert_consistent(abi, &tcb, &active, &snap);
    }

    #[test]
    fn test_arm_entry_uses_compat_table() {
        let abi = Arch::Aarch64.abi();
        let mut tcb = Tcb::new(Pid::from_raw(77));
        let mut active = ActivePersonality::new(abi.personalities());

        // 5 is `open` (3 args) for arm, but `setxattr` (5 args) for aarch64.
        let snap = resolve_entry(abi, &task(arm_entry(5)), &mut tcb, &mut active, Duration::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(tcb.personality, aarch64::ARM);
        assert_eq!(active.personality().word_size, 4);
        assert_eq!(tcb.args(), &[1, 2, 3]);
        assert_consistent(abi, &tcb, &active, &snap);

        tcb.end_syscall();

        let snap = resolve_entry(&Aarch64, &task(aarch64_entry(5)), &mut tcb, &mut active, Duration::ZERO)
            .unwrap()
            .unwrap();

        assert_eq!(tcb.personality, aarch64::NATIVE);
        assert_eq!(tcb.args(), &[1, 2, 3, 4, 5]);
        assert!(snap.personality_changed);
        assert_consistent(&Aarch64, &tcb, &active, &snap);
    }

    #[test]
    fn test_every_personality_commits_consistently() {
        let cases = [
            (Arch::X86_64, x86_entry(0x33, 0)),
            (Arch::X86_64, x86_entry(0x23, 0)),
            (Arch::X86_64, x86_entry(0x33, x86_64::X32_SYSCALL_BIT)),
            (Arch::Aarch64, aarch64_entry(0)),
            (Arch::Aarch64, arm_entry(0)),
        ];

        for (arch, regs) in cases {
            let abi = arch.abi();

            for scno in [0, 1, 3, 11, 59, 102, 117, 221, 0x0f_0005, 0xffff] {
                let regs = match regs {
                    RegisterSet::X86_64(mut r) => {
                        r.orig_rax = (r.orig_rax & x86_64::X32_SYSCALL_BIT) | scno;
                        RegisterSet::X86_64(r)
                    },
                    RegisterSet::Aarch64(mut r) => {
                        r.regs[8] = scno;
                        RegisterSet::Aarch64(r)
                    },
                    RegisterSet::Arm(mut r) => {
                        r.uregs[7] = scno as u32;
                        RegisterSet::Arm(r)
                    },
                };

                let mut tcb = Tcb::new(Pid::from_raw(77));
                let mut active = ActivePersonality::new(abi.personalities());
                let snap = resolve_entry(abi, &task(regs), &mut tcb, &mut active, Duration::ZERO)
                    .unwrap()
                    .unwrap();

                assert_consistent(abi, &tcb, &active, &snap);
            }
        }
    }

    #[test]
    fn test_spurious_entry_leaves_tcb_untouched() {
        let abi = Arch::X86_64.abi();
        let mut tcb = Tcb::new(Pid::from_raw(77));
        let mut active = ActivePersonality::new(abi.personalities());

        let mut regs = x86_entry(0x23, 5);
        if let RegisterSet::X86_64(r) = &mut regs {
            r.rax = 0;
        }

        let snap = resolve_entry(abi, &task(regs), &mut tcb, &mut active, Duration::ZERO).unwrap();

        assert!(snap.is_none());
        assert!(!tcb.in_syscall());
        assert_eq!(tcb.personality, x86_64::NATIVE);
        assert_eq!(active.index(), x86_64::NATIVE);

        let snap = resolve_entry(&Aarch64, &task({
            let mut r = ArmRegs::default();
            r.uregs[12] = 1;
            RegisterSet::Arm(r)
        }), &mut tcb, &mut active, Duration::ZERO).unwrap();

        assert!(snap.is_none());
    }

    #[test]
    fn test_vanished_tracee_is_recoverable() {
        let abi = Arch::X86_64.abi();
        let mut tcb = Tcb::new(Pid::from_raw(77));
        let mut active = ActivePersonality::new(abi.personalities());
        let gone = FakeTask { regs: None };

        let err = resolve_entry(abi, &gone, &mut tcb, &mut active, Duration::ZERO).unwrap_err();
        assert!(err.tracee_died());
        assert!(!tcb.in_syscall());

        let err = resolve_exit(abi, &gone, &mut tcb, &mut active, Duration::ZERO).unwrap_err();
        assert!(err.tracee_died());
    }

    #[test]
    fn test_restart_codes_are_not_errors() {
        let abi = Arch::X86_64.abi();
        let mut active = ActivePersonality::new(abi.personalities());

        for (errno, kind) in [
            (512, RestartKind::Sys),
            (513, RestartKind::NoIntr),
            (514, RestartKind::NoHand),
            (516, RestartKind::RestartBlock),
        ] {
            let mut tcb = Tcb::new(Pid::from_raw(77));
            tcb.scno = 0;

            let snap = resolve_exit(abi, &task(x86_exit(-(errno as i64) as u64)), &mut tcb, &mut active, Duration::ZERO)
                .unwrap();

            assert_eq!(snap.outcome, Outcome::Restart(kind));
            assert_eq!(tcb.restart, Some(kind));
            assert_eq!(tcb.error, None);
            assert_eq!(tcb.raw_result, None);
            assert_eq!(kind.errno(), errno);
        }
    }

    #[test]
    fn test_errors_and_successes() {
        let abi = Arch::X86_64.abi();
        let mut active = ActivePersonality::new(abi.personalities());
        let mut tcb = Tcb::new(Pid::from_raw(77));

        for errno in [1i64, 2, 515, 4095] {
            resolve_exit(abi, &task(x86_exit(-errno as u64)), &mut tcb, &mut active, Duration::ZERO).unwrap();

            assert_eq!(tcb.error, Some(errno as i32));
            assert_eq!(tcb.raw_result, None);
            assert_eq!(tcb.restart, None);
        }

        for raw in [0u64, 3, -4096i64 as u64, 0xffff_fffe] {
            resolve_exit(abi, &task(x86_exit(raw)), &mut tcb, &mut active, Duration::ZERO).unwrap();

            assert_eq!(tcb.raw_result, Some(raw));
            assert_eq!(tcb.error, None);
        }
    }

    #[test]
    fn test_errno_test_uses_tracee_width() {
        let abi = Arch::X86_64.abi();
        let mut active = ActivePersonality::new(abi.personalities());
        let mut tcb = Tcb::new(Pid::from_raw(77));
        tcb.personality = x86_64::I386;

        let snap = resolve_exit(abi, &task(x86_exit(0xffff_fffe)), &mut tcb, &mut active, Duration::ZERO).unwrap();

        assert_eq!(snap.outcome, Outcome::Error(2));
        assert_eq!(active.index(), x86_64::I386);
    }

    #[test]
    fn test_never_fails_is_always_success() {
        let abi = Arch::X86_64.abi();
        let mut active = ActivePersonality::new(abi.personalities());
        let mut tcb = Tcb::new(Pid::from_raw(77));
        tcb.scno = abi.personalities()[0].syscall_nr("getpid").unwrap();

        let raw = -2i64 as u64;
        let snap = resolve_exit(abi, &task(x86_exit(raw)), &mut tcb, &mut active, Duration::ZERO).unwrap();

        assert_eq!(snap.outcome, Outcome::Success(raw));
    }

    #[test]
    fn test_delta_stime() {
        let abi = Arch::X86_64.abi();
        let mut active = ActivePersonality::new(abi.personalities());
        let mut tcb = Tcb::new(Pid::from_raw(77));

        resolve_entry(abi, &task(x86_entry(0x33, 0)), &mut tcb, &mut active, Duration::from_millis(5))
            .unwrap()
            .unwrap();
        let snap = resolve_exit(abi, &task(x86_exit(0)), &mut tcb, &mut active, Duration::from_millis(8)).unwrap();

        assert_eq!(snap.delta_stime, Duration::from_millis(3));
        assert_eq!(tcb.delta_stime, Duration::from_millis(3));
    }
}
