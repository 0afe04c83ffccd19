//! x86_64 hosts: native x86_64, i386 compat and x32 tracees.

use tracing::{debug, warn};

use crate::error::Result;
use crate::personality::*;
use crate::ptrace::Task;

use super::{Arch, RegisterMap, RegisterSet, SyscallAbi, SyscallContext, UNIFIED};

mod tables;

use tables::*;

pub const NATIVE: usize = 0;
pub const I386: usize = 1;
pub const X32: usize = 2;

/// Code segment selector of 64-bit user mode, shared by x86_64 and x32 tasks.
const USER_CS: u64 = 0x33;

/// Code segment selector of 32-bit user mode.
const USER32_CS: u64 = 0x23;

/// Set in `orig_rax` by the x32 syscall entry path.
pub const X32_SYSCALL_BIT: u64 = 0x4000_0000;

/// General-purpose registers, laid out as the kernel's `user_regs_struct`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Regs {
    pub r15: u64,
    pub r14: u64,
    pub r13: u64,
    pub r12: u64,
    pub rbp: u64,
    pub rbx: u64,
    pub r11: u64,
    pub r10: u64,
    pub r9: u64,
    pub r8: u64,
    pub rax: u64,
    pub rcx: u64,
    pub rdx: u64,
    pub rsi: u64,
    pub rdi: u64,
    pub orig_rax: u64,
    pub rip: u64,
    pub cs: u64,
    pub eflags: u64,
    pub rsp: u64,
    pub ss: u64,
    pub fs_base: u64,
    pub gs_base: u64,
    pub ds: u64,
    pub es: u64,
    pub fs: u64,
    pub gs: u64,
}

#[cfg(target_arch = "x86_64")]
impl From<libc::user_regs_struct> for Regs {
    fn from(r: libc::user_regs_struct) -> Self {
        Self {
            r15: r.r15,
            r14: r.r14,
            r13: r.r13,
            r12: r.r12,
            rbp: r.rbp,
            rbx: r.rbx,
            r11: r.r11,
            r10: r.r10,
            r9: r.r9,
            r8: r.r8,
            rax: r.rax,
            rcx: r.rcx,
            rdx: r.rdx,
            rsi: r.rsi,
            rdi: r.rdi,
            orig_rax: r.orig_rax,
            rip: r.rip,
            cs: r.cs,
            eflags: r.eflags,
            rsp: r.rsp,
            ss: r.ss,
            fs_base: r.fs_base,
            gs_base: r.gs_base,
            ds: r.ds,
            es: r.es,
            fs: r.fs,
            gs: r.gs,
        }
    }
}

/// Registers that carry syscall values in some x86 personality.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    R8,
    R9,
    R10,
    OrigRax,
}

impl Regs {
    pub fn get(&self, reg: Reg) -> u64 {
        match reg {
            Reg::Rax => self.rax,
            Reg::Rbx => self.rbx,
            Reg::Rcx => self.rcx,
            Reg::Rdx => self.rdx,
            Reg::Rsi => self.rsi,
            Reg::Rdi => self.rdi,
            Reg::Rbp => self.rbp,
            Reg::R8 => self.r8,
            Reg::R9 => self.r9,
            Reg::R10 => self.r10,
            Reg::OrigRax => self.orig_rax,
        }
    }
}

const NATIVE_MAP: RegisterMap<Reg> = RegisterMap {
    scno: Reg::OrigRax,
    args: [Reg::Rdi, Reg::Rsi, Reg::Rdx, Reg::R10, Reg::R8, Reg::R9],
    result: Reg::Rax,
};

// i386 tasks see `ebx`..`ebp`; the kernel zero-extends them into the 64-bit set.
const I386_MAP: RegisterMap<Reg> = RegisterMap {
    scno: Reg::OrigRax,
    args: [Reg::Rbx, Reg::Rcx, Reg::Rdx, Reg::Rsi, Reg::Rdi, Reg::Rbp],
    result: Reg::Rax,
};

/// Register maps, indexed by personality.
pub static REGISTER_MAPS: [RegisterMap<Reg>; 3] = [NATIVE_MAP, I386_MAP, NATIVE_MAP];

pub(super) static PERSONALITIES: &[Personality] = &[
    Personality {
        name: "x86_64",
        word_size: 8,
        long_size: 8,
        max_args: MAX_ARGS,
        syscalls: &[COMMON, NATIVE_ONLY, UNIFIED],
        errnos: GENERIC_ERRNOS,
        signals: GENERIC_SIGNALS,
        ioctls: IOCTLS_64,
    },
    Personality {
        name: "i386",
        word_size: 4,
        long_size: 4,
        max_args: MAX_ARGS,
        syscalls: &[tables::I386, UNIFIED, I386_SOCKET_SUBCALLS, I386_IPC_SUBCALLS],
        errnos: GENERIC_ERRNOS,
        signals: GENERIC_SIGNALS,
        ioctls: IOCTLS_32,
    },
    Personality {
        name: "x32",
        word_size: 4,
        long_size: 8,
        max_args: MAX_ARGS,
        syscalls: &[COMMON, X32_ONLY, UNIFIED],
        errnos: GENERIC_ERRNOS,
        signals: GENERIC_SIGNALS,
        ioctls: IOCTLS_32,
    },
];

/// Syscall ABI of x86_64 hosts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct X86_64;

fn regs(set: &RegisterSet) -> Result<&Regs> {
    match set {
        RegisterSet::X86_64(regs) => Ok(regs),
        _ => internal_error!("non-x86 register set on an x86_64 host"),
    }
}

fn map(personality: usize) -> &'static RegisterMap<Reg> {
    REGISTER_MAPS.get(personality).unwrap_or(&NATIVE_MAP)
}

impl SyscallAbi for X86_64 {
    fn arch(&self) -> Arch {
        Arch::X86_64
    }

    fn personalities(&self) -> &'static [Personality] {
        PERSONALITIES
    }

    fn detect_personality(&self, set: &RegisterSet, current: usize) -> usize {
        let regs = match set {
            RegisterSet::X86_64(regs) => regs,
            _ => return current,
        };

        match regs.cs {
            USER32_CS => I386,
            USER_CS if regs.orig_rax & X32_SYSCALL_BIT != 0 => X32,
            USER_CS => NATIVE,
            cs => {
                warn!(cs, "unknown code segment, keeping personality {current}");
                current
            },
        }
    }

    fn syscall_number(&self, set: &RegisterSet, personality: usize) -> Result<u64> {
        let raw = regs(set)?.get(map(personality).scno);

        let scno = match personality {
            I386 => raw & 0xffff_ffff,
            X32 => raw & !X32_SYSCALL_BIT,
            _ => raw,
        };

        Ok(scno)
    }

    fn is_syscall_entry(&self, set: &RegisterSet, personality: usize) -> Result<bool> {
        // The kernel preloads the return register with `-ENOSYS` before every
        // syscall-entry-stop. Anything else is a stray trap.
        let result = regs(set)?.get(map(personality).result);
        let enosys = -(libc::ENOSYS as i64);

        let is_entry = match personality {
            I386 => result as u32 == enosys as u32,
            _ => result == enosys as u64,
        };

        Ok(is_entry)
    }

    fn arguments(&self, set: &RegisterSet, personality: usize) -> Result<[u64; MAX_ARGS]> {
        let regs = regs(set)?;
        let mut args = map(personality).args.map(|r| regs.get(r));

        if personality == I386 {
            for arg in args.iter_mut() {
                *arg &= 0xffff_ffff;
            }
        }

        Ok(args)
    }

    fn result(&self, set: &RegisterSet, personality: usize) -> Result<u64> {
        Ok(regs(set)?.get(map(personality).result))
    }

    fn decode_subcall(&self, task: &dyn Task, ctx: &mut SyscallContext) -> Result<()> {
        if ctx.personality != I386 {
            return Ok(());
        }

        match ctx.scno {
            SYS_SOCKETCALL => decode_socketcall(task, ctx),
            SYS_IPC => {
                decode_ipc(ctx);
                Ok(())
            },
            _ => Ok(()),
        }
    }
}

// `socketcall(call, args)`: `args` points to an array of 32-bit words in the tracee.
fn decode_socketcall(task: &dyn Task, ctx: &mut SyscallContext) -> Result<()> {
    let call = ctx.args[0];

    if !(1..SOCKET_NSUBCALLS).contains(&call) {
        debug!(pid = task.pid().as_raw(), call, "socketcall selector out of range");
        return Ok(());
    }

    let scno = SOCKET_SUBCALL_BASE + call;
    let nargs = PERSONALITIES[I386].syscall(scno).nargs();
    let addr = ctx.args[1];

    let mut buf = [0u8; 4 * MAX_ARGS];
    let want = 4 * nargs;

    let read = match task.read_memory(addr, &mut buf[..want]) {
        Ok(read) => read,
        Err(err) if err.tracee_died() => return Err(err),
        Err(err) => {
            debug!(pid = task.pid().as_raw(), addr, %err, "could not read socketcall arguments");
            return Ok(());
        },
    };

    if read < want {
        debug!(pid = task.pid().as_raw(), addr, read, "short read of socketcall arguments");
        return Ok(());
    }

    let mut args = [0u64; MAX_ARGS];

    for (arg, word) in args.iter_mut().zip(buf[..want].chunks_exact(4)) {
        *arg = u32::from_le_bytes([word[0], word[1], word[2], word[3]]) as u64;
    }

    ctx.scno = scno;
    ctx.args = args;

    Ok(())
}

// `ipc(call, first, second, third, ptr, fifth)`: the version lives in the high 16 bits
// of `call`, and the subcall's arguments follow it.
fn decode_ipc(ctx: &mut SyscallContext) {
    let call = ctx.args[0] & 0xffff;

    if call > IPC_LAST_SUBCALL {
        return;
    }

    let scno = IPC_SUBCALL_BASE + call;

    if !PERSONALITIES[I386].syscall(scno).is_known() {
        return;
    }

    ctx.scno = scno;
    ctx.args.copy_within(1.., 0);
    ctx.args[MAX_ARGS - 1] = 0;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::error::Error;
    use crate::ptrace::{Errno, Pid};

    use super::*;

    struct FakeTask {
        mem_base: u64,
        mem: Vec<u8>,
        dead: bool,
        reads: Cell<usize>,
    }

    impl FakeTask {
        fn new(mem_base: u64, mem: Vec<u8>) -> Self {
            Self { mem_base, mem, dead: false, reads: Cell::new(0) }
        }
    }

    impl Task for FakeTask {
        fn pid(&self) -> Pid {
            Pid::from_raw(1234)
        }

        fn registers(&self) -> Result<RegisterSet> {
            internal_error!("not used")
        }

        fn read_memory(&self, addr: u64, data: &mut [u8]) -> Result<usize> {
            self.reads.set(self.reads.get() + 1);

            if self.dead {
                return Err(Error::TraceeDied { pid: self.pid(), source: Errno::ESRCH });
            }

            let off = match addr.checked_sub(self.mem_base) {
                Some(off) if (off as usize) < self.mem.len() => off as usize,
                _ => return Err(Error::OS(Errno::EIO)),
            };

            let avail = &self.mem[off..];
            let len = avail.len().min(data.len());
            data[..len].copy_from_slice(&avail[..len]);

            Ok(len)
        }
    }

    fn set(regs: Regs) -> RegisterSet {
        RegisterSet::X86_64(regs)
    }

    fn ctx(scno: u64, args: [u64; MAX_ARGS]) -> SyscallContext {
        SyscallContext { personality: I386, scno, args, nargs: MAX_ARGS }
    }

    #[test]
    fn test_detect_personality_from_cs() {
        let abi = X86_64;

        let native = Regs { cs: USER_CS, orig_rax: 1, ..Default::default() };
        let compat = Regs { cs: USER32_CS, orig_rax: 4, ..Default::default() };
        let x32 = Regs { cs: USER_CS, orig_rax: X32_SYSCALL_BIT | 1, ..Default::default() };
        let weird = Regs { cs: 0x2b, ..Default::default() };

        assert_eq!(abi.detect_personality(&set(native), I386), NATIVE);
        assert_eq!(abi.detect_personality(&set(compat), NATIVE), I386);
        assert_eq!(abi.detect_personality(&set(x32), NATIVE), X32);
        assert_eq!(abi.detect_personality(&set(weird), I386), I386);
    }

    #[test]
    fn test_x32_number_drops_marker_bit() {
        let regs = set(Regs { cs: USER_CS, orig_rax: X32_SYSCALL_BIT | 520, ..Default::default() });
        let nr = X86_64.syscall_number(&regs, X32).unwrap();

        assert_eq!(nr, 520);
        assert_eq!(PERSONALITIES[X32].syscall(nr).name(), "execve");
        assert!(PERSONALITIES[X32].syscall(nr).is_exec());
        assert!(!PERSONALITIES[X32].syscall(59).is_known());
    }

    #[test]
    fn test_entry_requires_enosys() {
        let abi = X86_64;
        let enosys = -(libc::ENOSYS as i64) as u64;

        let entry = set(Regs { rax: enosys, ..Default::default() });
        let stray = set(Regs { rax: 0, ..Default::default() });
        let entry32 = set(Regs { rax: enosys & 0xffff_ffff, ..Default::default() });

        assert!(abi.is_syscall_entry(&entry, NATIVE).unwrap());
        assert!(!abi.is_syscall_entry(&stray, NATIVE).unwrap());
        assert!(abi.is_syscall_entry(&entry32, I386).unwrap());
        assert!(!abi.is_syscall_entry(&entry32, NATIVE).unwrap());
    }

    #[test]
    fn test_argument_registers_per_personality() {
        let regs = set(Regs {
            rdi: 1,
            rsi: 2,
            rdx: 3,
            r10: 4,
            r8: 5,
            r9: 6,
            rbx: 0xdead_0000_0000_0011,
            rcx: 12,
            rbp: 16,
            ..Default::default()
        });

        assert_eq!(X86_64.arguments(&regs, NATIVE).unwrap(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(X86_64.arguments(&regs, I386).unwrap(), [0x11, 12, 3, 2, 1, 16]);
    }

    #[test]
    fn test_socketcall_reads_arguments_from_memory() {
        // connect(3, 0x1000, 16)
        let mut mem = vec![];
        for word in [3u32, 0x1000, 16] {
            mem.extend_from_slice(&word.to_le_bytes());
        }
        let task = FakeTask::new(0x8000, mem);

        let mut c = ctx(SYS_SOCKETCALL, [3, 0x8000, 0, 0, 0, 0]);
        X86_64.decode_subcall(&task, &mut c).unwrap();

        assert_eq!(c.scno, SOCKET_SUBCALL_BASE + 3);
        assert_eq!(PERSONALITIES[I386].syscall(c.scno).name(), "connect");
        assert_eq!(c.args, [3, 0x1000, 16, 0, 0, 0]);
    }

    #[test]
    fn test_socketcall_selector_out_of_range() {
        let task = FakeTask::new(0x8000, vec![0; 64]);

        for call in [0, 21, 0xffff_ffff] {
            let mut c = ctx(SYS_SOCKETCALL, [call, 0x8000, 0, 0, 0, 0]);
            X86_64.decode_subcall(&task, &mut c).unwrap();

            assert_eq!(c.scno, SYS_SOCKETCALL);
        }

        assert_eq!(task.reads.get(), 0);
    }

    #[test]
    fn test_socketcall_unreadable_memory_leaves_call_undecoded() {
        let task = FakeTask::new(0x8000, vec![0; 4]);

        let mut c = ctx(SYS_SOCKETCALL, [1, 0x8000, 0, 0, 0, 0]);
        X86_64.decode_subcall(&task, &mut c).unwrap();
        assert_eq!(c.scno, SYS_SOCKETCALL);

        let mut c = ctx(SYS_SOCKETCALL, [1, 0x10, 0, 0, 0, 0]);
        X86_64.decode_subcall(&task, &mut c).unwrap();
        assert_eq!(c.scno, SYS_SOCKETCALL);
    }

    #[test]
    fn test_socketcall_on_dead_tracee_is_tracee_died() {
        let mut task = FakeTask::new(0x8000, vec![0; 64]);
        task.dead = true;

        let mut c = ctx(SYS_SOCKETCALL, [1, 0x8000, 0, 0, 0, 0]);
        let err = X86_64.decode_subcall(&task, &mut c).unwrap_err();

        assert!(err.tracee_died());
    }

    #[test]
    fn test_ipc_shifts_arguments() {
        let task = FakeTask::new(0, vec![]);

        // semget(key, nsems, semflg) with ipc version 1 in the high bits.
        let mut c = ctx(SYS_IPC, [(1 << 16) | 2, 0x1234, 4, 0o600, 0, 0]);
        X86_64.decode_subcall(&task, &mut c).unwrap();

        assert_eq!(c.scno, IPC_SUBCALL_BASE + 2);
        assert_eq!(PERSONALITIES[I386].syscall(c.scno).name(), "semget");
        assert_eq!(c.args, [0x1234, 4, 0o600, 0, 0, 0]);
    }

    #[test]
    fn test_ipc_invalid_selectors() {
        let task = FakeTask::new(0, vec![]);

        for call in [0, 5, 10, 15, 20, 25, 0xffff] {
            let mut c = ctx(SYS_IPC, [call, 1, 2, 3, 4, 5]);
            X86_64.decode_subcall(&task, &mut c).unwrap();

            assert_eq!(c.scno, SYS_IPC, "selector {call}");
            assert_eq!(c.args, [call, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_subcalls_only_for_i386() {
        let task = FakeTask::new(0, vec![]);

        let mut c = SyscallContext { personality: NATIVE, scno: SYS_IPC, args: [2, 0, 0, 0, 0, 0], nargs: 6 };
        X86_64.decode_subcall(&task, &mut c).unwrap();

        assert_eq!(c.scno, SYS_IPC);
    }
}
