//! Per-architecture syscall ABIs.
//!
//! Each supported host architecture has one [`SyscallAbi`] implementation, which knows
//! the personalities its tracees may run under and where each personality keeps the
//! syscall number, arguments and result. The implementation is chosen once, by
//! [`Arch`], and never by conditional compilation at the call site.

use crate::error::Result;
use crate::personality::*;
use crate::ptrace::Task;

pub mod aarch64;
pub mod x86_64;

/// Supported tracer architectures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    /// The architecture this crate was built for, if supported.
    pub fn host() -> Option<Self> {
        if cfg!(target_arch = "x86_64") {
            Some(Arch::X86_64)
        } else if cfg!(target_arch = "aarch64") {
            Some(Arch::Aarch64)
        } else {
            None
        }
    }

    pub fn abi(self) -> &'static dyn SyscallAbi {
        match self {
            Arch::X86_64 => &x86_64::X86_64,
            Arch::Aarch64 => &aarch64::Aarch64,
        }
    }

    pub fn personalities(self) -> &'static [Personality] {
        self.abi().personalities()
    }
}

/// General-purpose register state of a stopped tracee, as returned by the kernel.
///
/// The variant records which register layout the kernel handed back, which on some
/// architectures is itself what tells the personalities apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterSet {
    X86_64(x86_64::Regs),
    Aarch64(aarch64::Regs),

    /// Compat register set of a 32-bit ARM task on an aarch64 kernel.
    Arm(aarch64::ArmRegs),
}

/// Where one personality keeps its syscall values, as register names of the architecture.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterMap<R: 'static> {
    pub scno: R,
    pub args: [R; MAX_ARGS],
    pub result: R,
}

/// Raw syscall values recovered from a stopped tracee, before they are committed to
/// its TCB.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyscallContext {
    pub personality: usize,
    pub scno: u64,
    pub args: [u64; MAX_ARGS],
    pub nargs: usize,
}

/// Syscall calling convention of one host architecture.
pub trait SyscallAbi {
    fn arch(&self) -> Arch;

    /// Personalities of this architecture. Index 0 is the native one.
    fn personalities(&self) -> &'static [Personality];

    /// Personality `regs` were captured under.
    ///
    /// Returns `current` when the registers do not tell.
    fn detect_personality(&self, regs: &RegisterSet, current: usize) -> usize;

    /// Syscall number, normalized for table lookup in `personality`.
    fn syscall_number(&self, regs: &RegisterSet, personality: usize) -> Result<u64>;

    /// False if the stop cannot be a syscall-entry-stop, whatever the kernel reported.
    fn is_syscall_entry(&self, regs: &RegisterSet, personality: usize) -> Result<bool>;

    /// Every argument register of `personality`, untruncated.
    fn arguments(&self, regs: &RegisterSet, personality: usize) -> Result<[u64; MAX_ARGS]>;

    /// Raw return register of `personality`.
    fn result(&self, regs: &RegisterSet, personality: usize) -> Result<u64>;

    /// Re-derive multiplexed calls, like `socketcall(2)`, into their logical subcall.
    fn decode_subcall(&self, _task: &dyn Task, _ctx: &mut SyscallContext) -> Result<()> {
        Ok(())
    }
}

/// Syscalls numbered identically on every architecture since Linux 5.1.
pub(crate) const UNIFIED: &[SyscallEntry] = syscall_table! {
    424 => "pidfd_send_signal", 4, TD | TS;
    425 => "io_uring_setup", 2, TD;
    426 => "io_uring_enter", 6, TD;
    427 => "io_uring_register", 4, TD;
    428 => "open_tree", 3, TD | TF;
    429 => "move_mount", 5, TD | TF;
    430 => "fsopen", 2, TD;
    431 => "fsconfig", 5, TD;
    432 => "fsmount", 3, TD;
    433 => "fspick", 3, TD | TF;
    434 => "pidfd_open", 2, TD;
    435 => "clone3", 2, TP;
    436 => "close_range", 3, TD;
    437 => "openat2", 4, TD | TF;
    438 => "pidfd_getfd", 3, TD;
    439 => "faccessat2", 4, TD | TF;
    440 => "process_madvise", 5, TD;
    441 => "epoll_pwait2", 6, TD;
    442 => "mount_setattr", 5, TD | TF;
    443 => "quotactl_fd", 4, TD;
    444 => "landlock_create_ruleset", 3, TD;
    445 => "landlock_add_rule", 4, TD;
    446 => "landlock_restrict_self", 2, TD;
    447 => "memfd_secret", 1, TD;
    448 => "process_mrelease", 2, TD;
    449 => "futex_waitv", 5, 0;
    450 => "set_mempolicy_home_node", 4, TM;
    451 => "cachestat", 4, TD;
    452 => "fchmodat2", 4, TD | TF;
    453 => "map_shadow_stack", 3, TM | SE;
    454 => "futex_wake", 4, 0;
    455 => "futex_wait", 6, 0;
    456 => "futex_requeue", 4, 0;
    457 => "statmount", 4, 0;
    458 => "listmount", 4, 0;
    459 => "lsm_get_self_attr", 4, 0;
    460 => "lsm_set_self_attr", 4, 0;
    461 => "lsm_list_modules", 3, 0;
    462 => "mseal", 3, TM;
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_host_arch_has_abi() {
        if let Some(arch) = Arch::host() {
            assert_eq!(arch.abi().arch(), arch);
            assert!(!arch.personalities().is_empty());
        }
    }

    #[test]
    fn test_tables_sorted_and_disjoint() {
        for arch in [Arch::X86_64, Arch::Aarch64] {
            for p in arch.personalities() {
                let mut seen = HashSet::new();

                for segment in p.syscalls {
                    assert!(
                        segment.windows(2).all(|w| w[0].nr < w[1].nr),
                        "{} table segment not strictly sorted",
                        p.name,
                    );

                    for entry in segment.iter() {
                        assert!(seen.insert(entry.nr), "{}: duplicate nr {}", p.name, entry.nr);
                        assert!(entry.nargs <= p.max_args, "{}: {} has too many args", p.name, entry.name);
                    }
                }

                assert!(p.max_args <= MAX_ARGS);
                assert!(p.word_size == 4 || p.word_size == 8);
            }
        }
    }
}
