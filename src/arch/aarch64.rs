//! arm64 hosts: native aarch64 and 32-bit ARM EABI tracees.

use std::mem;

use crate::error::Result;
use crate::personality::*;

use super::{Arch, RegisterMap, RegisterSet, SyscallAbi, UNIFIED};

mod tables;

use tables::*;

pub const NATIVE: usize = 0;
pub const ARM: usize = 1;

#[cfg(all(target_arch = "aarch64", target_os = "android"))]
pub(crate) const PTRACE_GETREGSET: i32 = 0x4204;

#[cfg(all(target_arch = "aarch64", not(target_os = "android")))]
pub(crate) const PTRACE_GETREGSET: u32 = 0x4204;

/// Defined in `include/uapi/linux/elf.h`.
#[cfg(target_arch = "aarch64")]
pub(crate) const NT_PRSTATUS: i32 = 0x1;

/// Base of the ARM private syscall numbers, `__ARM_NR_BASE`.
pub const ARM_NR_BASE: u64 = 0x0f_0000;

/// Highest ARM private syscall, `__ARM_NR_get_tls`.
pub const ARM_LAST_PRIVATE: u64 = 6;

/// Table slot that private syscall 0 would occupy: one past the last ordinary syscall.
pub const ARM_FIRST_SHUFFLED: u64 = 463;

/// Native register set, laid out as `user_pt_regs` in `arch/arm64/include/uapi/asm/ptrace.h`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Regs {
    pub regs: [u64; 31],
    pub sp: u64,
    pub pc: u64,
    pub pstate: u64,
}

impl Regs {
    /// `x7`, which the kernel sets to 0 at syscall-entry-stops and 1 at
    /// syscall-exit-stops.
    pub fn direction(&self) -> u64 {
        self.regs[7]
    }
}

impl Default for Regs {
    fn default() -> Self {
        Self { regs: [0; 31], sp: 0, pc: 0, pstate: 0 }
    }
}

/// Compat register set of an AArch32 task, `struct pt_regs` of `arch/arm`.
///
/// `uregs[0..=15]` are `r0`..`pc`, then `cpsr` and `orig_r0`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArmRegs {
    pub uregs: [u32; 18],
}

impl ArmRegs {
    /// Intra-procedure scratch register `r12`, which the kernel sets to 0 at
    /// syscall-entry-stops and 1 at syscall-exit-stops.
    pub fn ip(&self) -> u32 {
        self.uregs[12]
    }
}

/// Size of the regset that `PTRACE_GETREGSET` fills for a native task.
pub const REGS_SIZE: usize = mem::size_of::<Regs>();

/// Size of the regset that `PTRACE_GETREGSET` fills for a compat task.
pub const ARM_REGS_SIZE: usize = mem::size_of::<ArmRegs>();

/// Register maps, as indices into `Regs::regs` and `ArmRegs::uregs`.
pub static REGISTER_MAPS: [RegisterMap<usize>; 2] = [
    RegisterMap { scno: 8, args: [0, 1, 2, 3, 4, 5], result: 0 },
    RegisterMap { scno: 7, args: [0, 1, 2, 3, 4, 5], result: 0 },
];

pub(super) static PERSONALITIES: &[Personality] = &[
    Personality {
        name: "aarch64",
        word_size: 8,
        long_size: 8,
        max_args: MAX_ARGS,
        syscalls: &[AARCH64, UNIFIED],
        errnos: GENERIC_ERRNOS,
        signals: GENERIC_SIGNALS,
        ioctls: IOCTLS_64,
    },
    Personality {
        name: "arm",
        word_size: 4,
        long_size: 4,
        max_args: MAX_ARGS,
        syscalls: &[tables::ARM, UNIFIED, ARM_PRIVATE],
        errnos: GENERIC_ERRNOS,
        signals: GENERIC_SIGNALS,
        ioctls: IOCTLS_32,
    },
];

/// Syscall ABI of arm64 hosts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Aarch64;

/// Rebuild a register set from the bytes `PTRACE_GETREGSET` wrote and their length.
///
/// The kernel shrinks `iov_len` to the size of the set it copied out, which is the
/// only way to tell a compat task from a native one.
pub fn register_set_from_regset(buf: &[u8]) -> Result<RegisterSet> {
    let set = match buf.len() {
        REGS_SIZE => {
            let mut regs = Regs::default();
            for (reg, word) in regs
                .regs
                .iter_mut()
                .chain([&mut regs.sp, &mut regs.pc, &mut regs.pstate])
                .zip(buf.chunks_exact(8))
            {
                *reg = u64::from_ne_bytes(word.try_into().unwrap_or_default());
            }
            RegisterSet::Aarch64(regs)
        },
        ARM_REGS_SIZE => {
            let mut regs = ArmRegs::default();
            for (reg, word) in regs.uregs.iter_mut().zip(buf.chunks_exact(4)) {
                *reg = u32::from_ne_bytes(word.try_into().unwrap_or_default());
            }
            RegisterSet::Arm(regs)
        },
        len => internal_error!(format!("unexpected regset size {len}")),
    };

    Ok(set)
}

impl SyscallAbi for Aarch64 {
    fn arch(&self) -> Arch {
        Arch::Aarch64
    }

    fn personalities(&self) -> &'static [Personality] {
        PERSONALITIES
    }

    fn detect_personality(&self, set: &RegisterSet, current: usize) -> usize {
        match set {
            RegisterSet::Aarch64(_) => NATIVE,
            RegisterSet::Arm(_) => ARM,
            _ => current,
        }
    }

    fn syscall_number(&self, set: &RegisterSet, _personality: usize) -> Result<u64> {
        let scno = match set {
            RegisterSet::Aarch64(regs) => regs.regs[REGISTER_MAPS[NATIVE].scno],
            RegisterSet::Arm(regs) => shuffle_private(regs.uregs[REGISTER_MAPS[ARM].scno] as u64),
            _ => internal_error!("non-arm64 register set on an arm64 host"),
        };

        Ok(scno)
    }

    fn is_syscall_entry(&self, set: &RegisterSet, _personality: usize) -> Result<bool> {
        match set {
            RegisterSet::Aarch64(regs) => Ok(regs.direction() == 0),
            RegisterSet::Arm(regs) => Ok(regs.ip() == 0),
            _ => internal_error!("non-arm64 register set on an arm64 host"),
        }
    }

    fn arguments(&self, set: &RegisterSet, _personality: usize) -> Result<[u64; MAX_ARGS]> {
        let args = match set {
            RegisterSet::Aarch64(regs) => REGISTER_MAPS[NATIVE].args.map(|r| regs.regs[r]),
            RegisterSet::Arm(regs) => REGISTER_MAPS[ARM].args.map(|r| regs.uregs[r] as u64),
            _ => internal_error!("non-arm64 register set on an arm64 host"),
        };

        Ok(args)
    }

    fn result(&self, set: &RegisterSet, _personality: usize) -> Result<u64> {
        let result = match set {
            RegisterSet::Aarch64(regs) => regs.regs[REGISTER_MAPS[NATIVE].result],
            RegisterSet::Arm(regs) => regs.uregs[REGISTER_MAPS[ARM].result] as u64,
            _ => internal_error!("non-arm64 register set on an arm64 host"),
        };

        Ok(result)
    }
}

// Private syscalls live far above the table; move them to the slots after it.
fn shuffle_private(scno: u64) -> u64 {
    match scno.checked_sub(ARM_NR_BASE) {
        Some(n @ 1..=ARM_LAST_PRIVATE) => ARM_FIRST_SHUFFLED + n,
        _ => scno,
    }
}
