//! Personalities: the word size and syscall ABI a tracee runs under at a given moment.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

/// Largest argument count of any supported personality.
pub const MAX_ARGS: usize = 6;

/// Largest errno the kernel encodes in a syscall return value.
pub const MAX_ERRNO: u64 = 4095;

bitflags! {
    /// Classification of a syscall, as used by filters and decoders.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct SyscallFlags: u32 {
        /// Takes a file name argument.
        const FILE = 1 << 0;
        /// System V IPC.
        const IPC = 1 << 1;
        const NETWORK = 1 << 2;
        const PROCESS = 1 << 3;
        const SIGNAL = 1 << 4;
        /// Takes or returns a file descriptor.
        const DESC = 1 << 5;
        const MEMORY = 1 << 6;
        const STAT_LIKE = 1 << 7;
        const CREDS = 1 << 8;
        const CLOCK = 1 << 9;
        /// The return value is never an error code.
        const NEVER_FAILS = 1 << 10;
        /// A compat syscall using narrower types than its native namesake.
        const COMPAT = 1 << 11;
        /// Capture a stack trace of the tracee on entry.
        const STACKTRACE = 1 << 12;
        /// Replaces the process image; a post-exec stop follows success.
        const EXEC = 1 << 13;
    }
}

pub(crate) const TF: u32 = SyscallFlags::FILE.bits();
pub(crate) const TI: u32 = SyscallFlags::IPC.bits();
pub(crate) const TN: u32 = SyscallFlags::NETWORK.bits();
pub(crate) const TP: u32 = SyscallFlags::PROCESS.bits();
pub(crate) const TS: u32 = SyscallFlags::SIGNAL.bits();
pub(crate) const TD: u32 = SyscallFlags::DESC.bits();
pub(crate) const TM: u32 = SyscallFlags::MEMORY.bits();
pub(crate) const TST: u32 = SyscallFlags::STAT_LIKE.bits();
pub(crate) const TC: u32 = SyscallFlags::CREDS.bits();
pub(crate) const TCL: u32 = SyscallFlags::CLOCK.bits();
pub(crate) const NF: u32 = SyscallFlags::NEVER_FAILS.bits();
pub(crate) const CST: u32 = SyscallFlags::COMPAT.bits();
pub(crate) const SE: u32 = SyscallFlags::STACKTRACE.bits();
pub(crate) const TE: u32 = SyscallFlags::EXEC.bits() | SyscallFlags::FILE.bits() | SyscallFlags::PROCESS.bits();

/// One row of a personality's syscall table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyscallEntry {
    pub nr: u64,
    pub name: &'static str,
    pub nargs: usize,
    pub flags: SyscallFlags,
}

/// Build a sorted, sparse syscall table from `nr => name, nargs, flags` rows.
macro_rules! syscall_table {
    ($($nr: expr => $name: literal, $nargs: expr, $flags: expr;)*) => {
        &[
            $(
                $crate::personality::SyscallEntry {
                    nr: $nr,
                    name: $name,
                    nargs: $nargs,
                    flags: $crate::personality::SyscallFlags::from_bits_retain($flags),
                },
            )*
        ]
    };
}

/// A numbered name, as used for errno, signal and ioctl tables.
pub type Named = (u64, &'static str);

/// Immutable description of one architecture mode.
#[derive(Debug)]
pub struct Personality {
    pub name: &'static str,

    /// Size of a pointer and of an argument word, in bytes.
    pub word_size: usize,

    /// Size of the kernel `long` carrying the syscall return value, in bytes.
    ///
    /// Differs from `word_size` for ILP32 ABIs on 64-bit kernels, like x32.
    pub long_size: usize,

    /// Argument count for numbers missing from `syscalls`.
    pub max_args: usize,

    /// Table segments, each sorted by `nr`. A number appears in at most one segment.
    pub syscalls: &'static [&'static [SyscallEntry]],
    pub errnos: &'static [Named],
    pub signals: &'static [Named],
    pub ioctls: &'static [Named],
}

impl Personality {
    /// Look up the table entry for `nr`, degrading to an unknown-syscall entry.
    pub fn syscall(&self, nr: u64) -> Syscall {
        let segments: &'static [&'static [SyscallEntry]] = self.syscalls;
        let entry = segments.iter().find_map(|&segment| {
            segment
                .binary_search_by_key(&nr, |e| e.nr)
                .ok()
                .map(|i| &segment[i])
        });

        Syscall { nr, entry, max_args: self.max_args }
    }

    /// Find the number of the syscall named `name`, if this personality has one.
    pub fn syscall_nr(&self, name: &str) -> Option<u64> {
        self.entries().find(|e| e.name == name).map(|e| e.nr)
    }

    /// Every table entry, segment by segment.
    pub fn entries(&self) -> impl Iterator<Item = &'static SyscallEntry> {
        let segments: &'static [&'static [SyscallEntry]] = self.syscalls;
        segments.iter().flat_map(|&segment| segment.iter())
    }

    pub fn errno_name(&self, errno: i32) -> Option<&'static str> {
        lookup_name(self.errnos, errno as u64)
    }

    pub fn signal_name(&self, signo: i32) -> Option<&'static str> {
        lookup_name(self.signals, signo as u64)
    }

    pub fn ioctl_name(&self, code: u64) -> Option<&'static str> {
        lookup_name(self.ioctls, code)
    }

    /// Mask selecting the bits of an argument word.
    pub fn word_mask(&self) -> u64 {
        mask(self.word_size)
    }

    /// Truncate a raw register value to a kernel `long` of this personality.
    pub fn truncate(&self, value: u64) -> u64 {
        value & mask(self.long_size)
    }

    /// Interpret `value` as a signed kernel `long` of this personality.
    pub fn sign_extend(&self, value: u64) -> i64 {
        match self.long_size {
            4 => value as u32 as i32 as i64,
            _ => value as i64,
        }
    }

    /// True if `value` is a negated errno at this personality's `long` width.
    ///
    /// The test must use the tracee's width: `0xffff_fffe` is `-ENOENT` for a 32-bit
    /// tracee, but a valid (huge) result for a 64-bit one.
    pub fn is_negated_errno(&self, value: u64) -> bool {
        let value = value & mask(self.long_size);
        let min = mask(self.long_size).wrapping_sub(MAX_ERRNO - 1) & mask(self.long_size);

        value >= min
    }
}

fn mask(size: usize) -> u64 {
    if size >= 8 {
        u64::MAX
    } else {
        (1u64 << (size * 8)) - 1
    }
}

fn lookup_name(table: &'static [Named], key: u64) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, name)| *name)
}

/// A syscall number resolved against a personality's table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Syscall {
    pub nr: u64,
    entry: Option<&'static SyscallEntry>,
    max_args: usize,
}

impl Syscall {
    pub fn is_known(&self) -> bool {
        self.entry.is_some()
    }

    pub fn entry(&self) -> Option<&'static SyscallEntry> {
        self.entry
    }

    /// Table name, or a generated `syscall_0x..` placeholder for unknown numbers.
    pub fn name(&self) -> Cow<'static, str> {
        match self.entry {
            Some(entry) => Cow::Borrowed(entry.name),
            None => Cow::Owned(format!("syscall_{:#x}", self.nr)),
        }
    }

    pub fn nargs(&self) -> usize {
        self.entry.map(|e| e.nargs).unwrap_or(self.max_args).min(self.max_args)
    }

    pub fn flags(&self) -> SyscallFlags {
        self.entry.map(|e| e.flags).unwrap_or_default()
    }

    pub fn never_fails(&self) -> bool {
        self.flags().contains(SyscallFlags::NEVER_FAILS)
    }

    pub fn is_exec(&self) -> bool {
        self.flags().contains(SyscallFlags::EXEC)
    }
}

impl fmt::Display for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The personality consulted by decoders for the tracee currently being handled.
///
/// The index and the descriptor always change together, through [`commit()`], so no
/// reader can see a table that does not match the index.
///
/// [`commit()`]: ActivePersonality::commit
#[derive(Clone, Copy, Debug)]
pub struct ActivePersonality {
    table: &'static [Personality],
    index: usize,
}

impl ActivePersonality {
    /// Start with the first (native) personality of `table`.
    pub fn new(table: &'static [Personality]) -> Self {
        Self { table, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn personality(&self) -> &'static Personality {
        &self.table[self.index]
    }

    pub fn table(&self) -> &'static [Personality] {
        self.table
    }

    /// Switch to personality `index`. Returns `true` if it changed.
    ///
    /// Out-of-range indices are rejected and leave the current personality in place.
    pub fn commit(&mut self, index: usize) -> bool {
        if index >= self.table.len() || index == self.index {
            return false;
        }

        *self = Self { table: self.table, index };

        true
    }
}

impl PartialEq for ActivePersonality {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.index == other.index
    }
}

impl Eq for ActivePersonality {}

/// Error names shared by every supported personality (`asm-generic/errno*.h`).
pub(crate) const GENERIC_ERRNOS: &[Named] = &[
    (1, "EPERM"), (2, "ENOENT"), (3, "ESRCH"), (4, "EINTR"), (5, "EIO"),
    (6, "ENXIO"), (7, "E2BIG"), (8, "ENOEXEC"), (9, "EBADF"), (10, "ECHILD"),
    (11, "EAGAIN"), (12, "ENOMEM"), (13, "EACCES"), (14, "EFAULT"), (15, "ENOTBLK"),
    (16, "EBUSY"), (17, "EEXIST"), (18, "EXDEV"), (19, "ENODEV"), (20, "ENOTDIR"),
    (21, "EISDIR"), (22, "EINVAL"), (23, "ENFILE"), (24, "EMFILE"), (25, "ENOTTY"),
    (26, "ETXTBSY"), (27, "EFBIG"), (28, "ENOSPC"), (29, "ESPIPE"), (30, "EROFS"),
    (31, "EMLINK"), (32, "EPIPE"), (33, "EDOM"), (34, "ERANGE"), (35, "EDEADLK"),
    (36, "ENAMETOOLONG"), (37, "ENOLCK"), (38, "ENOSYS"), (39, "ENOTEMPTY"), (40, "ELOOP"),
    (42, "ENOMSG"), (43, "EIDRM"), (61, "ENODATA"), (62, "ETIME"), (71, "EPROTO"),
    (74, "EBADMSG"), (75, "EOVERFLOW"), (84, "EILSEQ"), (88, "ENOTSOCK"),
    (89, "EDESTADDRREQ"), (90, "EMSGSIZE"), (91, "EPROTOTYPE"), (92, "ENOPROTOOPT"),
    (93, "EPROTONOSUPPORT"), (95, "EOPNOTSUPP"), (97, "EAFNOSUPPORT"), (98, "EADDRINUSE"),
    (99, "EADDRNOTAVAIL"), (100, "ENETDOWN"), (101, "ENETUNREACH"), (103, "ECONNABORTED"),
    (104, "ECONNRESET"), (105, "ENOBUFS"), (106, "EISCONN"), (107, "ENOTCONN"),
    (110, "ETIMEDOUT"), (111, "ECONNREFUSED"), (113, "EHOSTUNREACH"), (114, "EALREADY"),
    (115, "EINPROGRESS"), (116, "ESTALE"), (122, "EDQUOT"), (125, "ECANCELED"),
    (130, "EOWNERDEAD"), (131, "ENOTRECOVERABLE"),
    (512, "ERESTARTSYS"), (513, "ERESTARTNOINTR"), (514, "ERESTARTNOHAND"),
    (515, "ENOIOCTLCMD"), (516, "ERESTART_RESTARTBLOCK"),
];

/// Signal names shared by x86 and arm (`asm/signal.h`).
pub(crate) const GENERIC_SIGNALS: &[Named] = &[
    (1, "SIGHUP"), (2, "SIGINT"), (3, "SIGQUIT"), (4, "SIGILL"), (5, "SIGTRAP"),
    (6, "SIGABRT"), (7, "SIGBUS"), (8, "SIGFPE"), (9, "SIGKILL"), (10, "SIGUSR1"),
    (11, "SIGSEGV"), (12, "SIGUSR2"), (13, "SIGPIPE"), (14, "SIGALRM"), (15, "SIGTERM"),
    (16, "SIGSTKFLT"), (17, "SIGCHLD"), (18, "SIGCONT"), (19, "SIGSTOP"), (20, "SIGTSTP"),
    (21, "SIGTTIN"), (22, "SIGTTOU"), (23, "SIGURG"), (24, "SIGXCPU"), (25, "SIGXFSZ"),
    (26, "SIGVTALRM"), (27, "SIGPROF"), (28, "SIGWINCH"), (29, "SIGIO"), (30, "SIGPWR"),
    (31, "SIGSYS"),
];

/// 64-bit encodings of size-carrying ioctls.
pub(crate) const IOCTLS_64: &[Named] = &[
    (0x5401, "TCGETS"), (0x5402, "TCSETS"), (0x5403, "TCSETSW"), (0x5404, "TCSETSF"),
    (0x540b, "TCFLSH"), (0x540e, "TIOCSCTTY"), (0x540f, "TIOCGPGRP"), (0x5410, "TIOCSPGRP"),
    (0x5413, "TIOCGWINSZ"), (0x5414, "TIOCSWINSZ"), (0x541b, "FIONREAD"), (0x5421, "FIONBIO"),
    (0x5450, "FIONCLEX"), (0x5451, "FIOCLEX"), (0x5452, "FIOASYNC"),
    (0x8008_6601, "FS_IOC_GETFLAGS"), (0x4008_6602, "FS_IOC_SETFLAGS"),
    (0x8004_5430, "TIOCGPTN"), (0x4004_5431, "TIOCSPTLCK"),
];

/// 32-bit encodings of size-carrying ioctls.
pub(crate) const IOCTLS_32: &[Named] = &[
    (0x5401, "TCGETS"), (0x5402, "TCSETS"), (0x5403, "TCSETSW"), (0x5404, "TCSETSF"),
    (0x540b, "TCFLSH"), (0x540e, "TIOCSCTTY"), (0x540f, "TIOCGPGRP"), (0x5410, "TIOCSPGRP"),
    (0x5413, "TIOCGWINSZ"), (0x5414, "TIOCSWINSZ"), (0x541b, "FIONREAD"), (0x5421, "FIONBIO"),
    (0x5450, "FIONCLEX"), (0x5451, "FIOCLEX"), (0x5452, "FIOASYNC"),
    (0x8004_6601, "FS_IOC32_GETFLAGS"), (0x4004_6602, "FS_IOC32_SETFLAGS"),
    (0x8004_5430, "TIOCGPTN"), (0x4004_5431, "TIOCSPTLCK"),
];

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[SyscallEntry] = syscall_table! {
        0 => "read", 3, TD;
        3 => "close", 1, TD;
        39 => "getpid", 0, NF;
    };

    static PERSONALITIES: &[Personality] = &[
        Personality {
            name: "wide",
            word_size: 8,
            long_size: 8,
            max_args: MAX_ARGS,
            syscalls: &[TABLE],
            errnos: GENERIC_ERRNOS,
            signals: GENERIC_SIGNALS,
            ioctls: IOCTLS_64,
        },
        Personality {
            name: "narrow",
            word_size: 4,
            long_size: 4,
            max_args: MAX_ARGS,
            syscalls: &[TABLE],
            errnos: GENERIC_ERRNOS,
            signals: GENERIC_SIGNALS,
            ioctls: IOCTLS_32,
        },
    ];

    #[test]
    fn test_known_syscall() {
        let sc = PERSONALITIES[0].syscall(3);

        assert!(sc.is_known());
        assert_eq!(sc.name(), "close");
        assert_eq!(sc.nargs(), 1);
        assert!(sc.flags().contains(SyscallFlags::DESC));
        assert!(!sc.never_fails());
    }

    #[test]
    fn test_unknown_syscall_is_degraded_not_error() {
        let sc = PERSONALITIES[0].syscall(0x1234);

        assert!(!sc.is_known());
        assert_eq!(sc.name(), "syscall_0x1234");
        assert_eq!(sc.nargs(), MAX_ARGS);
        assert_eq!(sc.flags(), SyscallFlags::empty());
    }

    #[test]
    fn test_name_tables() {
        let p = &PERSONALITIES[1];

        assert_eq!(p.errno_name(2), Some("ENOENT"));
        assert_eq!(p.errno_name(516), Some("ERESTART_RESTARTBLOCK"));
        assert_eq!(p.signal_name(17), Some("SIGCHLD"));
        assert_eq!(p.ioctl_name(0x8004_6601), Some("FS_IOC32_GETFLAGS"));
        assert_eq!(p.ioctl_name(0x8008_6601), None);
        assert_eq!(p.syscall_nr("getpid"), Some(39));
    }

    #[test]
    fn test_negated_errno_uses_personality_width() {
        let wide = &PERSONALITIES[0];
        let narrow = &PERSONALITIES[1];

        assert!(wide.is_negated_errno(-2i64 as u64));
        assert!(wide.is_negated_errno(-4095i64 as u64));
        assert!(!wide.is_negated_errno(-4096i64 as u64));
        assert!(!wide.is_negated_errno(0xffff_fffe));

        assert!(narrow.is_negated_errno(0xffff_fffe));
        assert!(narrow.is_negated_errno(-2i64 as u64));
        assert!(narrow.is_negated_errno(0xffff_f001));
        assert!(!narrow.is_negated_errno(0xffff_f000));
        assert!(!narrow.is_negated_errno(7));
    }

    #[test]
    fn test_truncate_and_sign_extend() {
        let narrow = &PERSONALITIES[1];

        assert_eq!(narrow.truncate(0xdead_beef_0000_0001), 1);
        assert_eq!(narrow.sign_extend(0xffff_fffe), -2);
        assert_eq!(PERSONALITIES[0].sign_extend(0xffff_fffe), 0xffff_fffe);
    }

    #[test]
    fn test_commit_switches_index_and_table_together() {
        let mut active = ActivePersonality::new(PERSONALITIES);
        assert_eq!(active.index(), 0);
        assert_eq!(active.personality().name, "wide");

        assert!(active.commit(1));
        assert_eq!(active.index(), 1);
        assert_eq!(active.personality().name, "narrow");

        assert!(!active.commit(1));
        assert!(!active.commit(2));
        assert_eq!(active.personality().name, "narrow");
    }
}
