//! Syscall tables of the x86 personalities, from `arch/x86/entry/syscalls/syscall_{64,32}.tbl`.

use crate::personality::*;

/// Rows of `syscall_64.tbl` with the `common` ABI, shared by x86_64 and x32.
pub(super) const COMMON: &[SyscallEntry] = syscall_table! {
    0 => "read", 3, TD;
    1 => "write", 3, TD;
    2 => "open", 3, TD | TF;
    3 => "close", 1, TD;
    4 => "stat", 2, TF | TST;
    5 => "fstat", 2, TD | TST;
    6 => "lstat", 2, TF | TST;
    7 => "poll", 3, TD;
    8 => "lseek", 3, TD;
    9 => "mmap", 6, TD | TM | SE;
    10 => "mprotect", 3, TM | SE;
    11 => "munmap", 2, TM | SE;
    12 => "brk", 1, TM | SE;
    14 => "rt_sigprocmask", 4, TS;
    17 => "pread64", 4, TD;
    18 => "pwrite64", 4, TD;
    21 => "access", 2, TF;
    22 => "pipe", 1, TD;
    23 => "select", 5, TD;
    24 => "sched_yield", 0, 0;
    25 => "mremap", 5, TM | SE;
    26 => "msync", 3, TM;
    27 => "mincore", 3, TM;
    28 => "madvise", 3, TM;
    29 => "shmget", 3, TI;
    30 => "shmat", 3, TI | TM;
    31 => "shmctl", 3, TI;
    32 => "dup", 1, TD;
    33 => "dup2", 2, TD;
    34 => "pause", 0, TS;
    35 => "nanosleep", 2, 0;
    36 => "getitimer", 2, 0;
    37 => "alarm", 1, 0;
    38 => "setitimer", 3, 0;
    39 => "getpid", 0, NF;
    40 => "sendfile", 4, TD | TN;
    41 => "socket", 3, TN;
    42 => "connect", 3, TN;
    43 => "accept", 3, TN;
    44 => "sendto", 6, TN;
    48 => "shutdown", 2, TN;
    49 => "bind", 3, TN;
    50 => "listen", 2, TN;
    51 => "getsockname", 3, TN;
    52 => "getpeername", 3, TN;
    53 => "socketpair", 4, TN;
    54 => "setsockopt", 5, TN;
    55 => "getsockopt", 5, TN;
    56 => "clone", 5, TP;
    57 => "fork", 0, TP;
    58 => "vfork", 0, TP;
    60 => "exit", 1, TP | SE;
    61 => "wait4", 4, TP;
    62 => "kill", 2, TS;
    63 => "uname", 1, 0;
    64 => "semget", 3, TI;
    65 => "semop", 3, TI;
    66 => "semctl", 4, TI;
    67 => "shmdt", 1, TI | TM;
    68 => "msgget", 2, TI;
    69 => "msgsnd", 4, TI;
    70 => "msgrcv", 5, TI;
    71 => "msgctl", 3, TI;
    72 => "fcntl", 3, TD;
    73 => "flock", 2, TD;
    74 => "fsync", 1, TD;
    75 => "fdatasync", 1, TD;
    76 => "truncate", 2, TF;
    77 => "ftruncate", 2, TD;
    78 => "getdents", 3, TD;
    79 => "getcwd", 2, TF;
    80 => "chdir", 1, TF;
    81 => "fchdir", 1, TD;
    82 => "rename", 2, TF;
    83 => "mkdir", 2, TF;
    84 => "rmdir", 1, TF;
    85 => "creat", 2, TD | TF;
    86 => "link", 2, TF;
    87 => "unlink", 1, TF;
    88 => "symlink", 2, TF;
    89 => "readlink", 3, TF;
    90 => "chmod", 2, TF;
    91 => "fchmod", 2, TD;
    92 => "chown", 3, TF;
    93 => "fchown", 3, TD;
    94 => "lchown", 3, TF;
    95 => "umask", 1, NF;
    96 => "gettimeofday", 2, TCL;
    97 => "getrlimit", 2, 0;
    98 => "getrusage", 2, 0;
    99 => "sysinfo", 1, 0;
    100 => "times", 1, 0;
    102 => "getuid", 0, TC | NF;
    103 => "syslog", 3, 0;
    104 => "getgid", 0, TC | NF;
    105 => "setuid", 1, TC;
    106 => "setgid", 1, TC;
    107 => "geteuid", 0, TC | NF;
    108 => "getegid", 0, TC | NF;
    109 => "setpgid", 2, 0;
    110 => "getppid", 0, NF;
    111 => "getpgrp", 0, NF;
    112 => "setsid", 0, 0;
    113 => "setreuid", 2, TC;
    114 => "setregid", 2, TC;
    115 => "getgroups", 2, TC;
    116 => "setgroups", 2, TC;
    117 => "setresuid", 3, TC;
    118 => "getresuid", 3, TC;
    119 => "setresgid", 3, TC;
    120 => "getresgid", 3, TC;
    121 => "getpgid", 1, 0;
    122 => "setfsuid", 1, TC | NF;
    123 => "setfsgid", 1, TC | NF;
    124 => "getsid", 1, 0;
    125 => "capget", 2, TC;
    126 => "capset", 2, TC;
    130 => "rt_sigsuspend", 2, TS;
    132 => "utime", 2, TF;
    133 => "mknod", 3, TF;
    135 => "personality", 1, 0;
    136 => "ustat", 2, TST;
    137 => "statfs", 2, TF;
    138 => "fstatfs", 2, TD;
    139 => "sysfs", 3, 0;
    140 => "getpriority", 2, 0;
    141 => "setpriority", 3, 0;
    142 => "sched_setparam", 2, 0;
    143 => "sched_getparam", 2, 0;
    144 => "sched_setscheduler", 3, 0;
    145 => "sched_getscheduler", 1, 0;
    146 => "sched_get_priority_max", 1, 0;
    147 => "sched_get_priority_min", 1, 0;
    148 => "sched_rr_get_interval", 2, 0;
    149 => "mlock", 2, TM;
    150 => "munlock", 2, TM;
    151 => "mlockall", 1, TM;
    152 => "munlockall", 0, TM;
    153 => "vhangup", 0, 0;
    154 => "modify_ldt", 3, 0;
    155 => "pivot_root", 2, TF;
    157 => "prctl", 5, 0;
    158 => "arch_prctl", 2, 0;
    159 => "adjtimex", 1, TCL;
    160 => "setrlimit", 2, 0;
    161 => "chroot", 1, TF;
    162 => "sync", 0, 0;
    163 => "acct", 1, TF;
    164 => "settimeofday", 2, TCL;
    165 => "mount", 5, TF;
    166 => "umount2", 2, TF;
    167 => "swapon", 2, TF;
    168 => "swapoff", 1, TF;
    169 => "reboot", 4, 0;
    170 => "sethostname", 2, 0;
    171 => "setdomainname", 2, 0;
    172 => "iopl", 1, 0;
    173 => "ioperm", 3, 0;
    175 => "init_module", 3, 0;
    176 => "delete_module", 2, 0;
    179 => "quotactl", 4, TF;
    181 => "getpmsg", 5, TN;
    182 => "putpmsg", 5, TN;
    183 => "afs_syscall", 5, 0;
    184 => "tuxcall", 3, 0;
    185 => "security", 3, 0;
    186 => "gettid", 0, NF;
    187 => "readahead", 3, TD;
    188 => "setxattr", 5, TF;
    189 => "lsetxattr", 5, TF;
    190 => "fsetxattr", 5, TD;
    191 => "getxattr", 4, TF;
    192 => "lgetxattr", 4, TF;
    193 => "fgetxattr", 4, TD;
    194 => "listxattr", 3, TF;
    195 => "llistxattr", 3, TF;
    196 => "flistxattr", 3, TD;
    197 => "removexattr", 2, TF;
    198 => "lremovexattr", 2, TF;
    199 => "fremovexattr", 2, TD;
    200 => "tkill", 2, TS;
    201 => "time", 1, TCL;
    202 => "futex", 6, 0;
    203 => "sched_setaffinity", 3, 0;
    204 => "sched_getaffinity", 3, 0;
    207 => "io_destroy", 1, TM;
    208 => "io_getevents", 5, 0;
    210 => "io_cancel", 3, 0;
    212 => "lookup_dcookie", 3, 0;
    213 => "epoll_create", 1, TD;
    216 => "remap_file_pages", 5, TM | SE;
    217 => "getdents64", 3, TD;
    218 => "set_tid_address", 1, 0;
    219 => "restart_syscall", 0, 0;
    220 => "semtimedop", 4, TI;
    221 => "fadvise64", 4, TD;
    223 => "timer_settime", 4, 0;
    224 => "timer_gettime", 2, 0;
    225 => "timer_getoverrun", 1, 0;
    226 => "timer_delete", 1, 0;
    227 => "clock_settime", 2, TCL;
    228 => "clock_gettime", 2, TCL;
    229 => "clock_getres", 2, TCL;
    230 => "clock_nanosleep", 4, TCL;
    231 => "exit_group", 1, TP | SE;
    232 => "epoll_wait", 4, TD;
    233 => "epoll_ctl", 4, TD;
    234 => "tgkill", 3, TS;
    235 => "utimes", 2, TF;
    237 => "mbind", 6, TM;
    238 => "set_mempolicy", 3, TM;
    239 => "get_mempolicy", 5, TM;
    240 => "mq_open", 4, TD;
    241 => "mq_unlink", 1, 0;
    242 => "mq_timedsend", 5, TD;
    243 => "mq_timedreceive", 5, TD;
    245 => "mq_getsetattr", 3, TD;
    248 => "add_key", 5, 0;
    249 => "request_key", 4, 0;
    250 => "keyctl", 5, 0;
    251 => "ioprio_set", 3, 0;
    252 => "ioprio_get", 2, 0;
    253 => "inotify_init", 0, TD;
    254 => "inotify_add_watch", 3, TD | TF;
    255 => "inotify_rm_watch", 2, TD;
    256 => "migrate_pages", 4, TM;
    257 => "openat", 4, TD | TF;
    258 => "mkdirat", 3, TD | TF;
    259 => "mknodat", 4, TD | TF;
    260 => "fchownat", 5, TD | TF;
    261 => "futimesat", 3, TD | TF;
    262 => "newfstatat", 4, TD | TF | TST;
    263 => "unlinkat", 3, TD | TF;
    264 => "renameat", 4, TD | TF;
    265 => "linkat", 5, TD | TF;
    266 => "symlinkat", 3, TD | TF;
    267 => "readlinkat", 4, TD | TF;
    268 => "fchmodat", 3, TD | TF;
    269 => "faccessat", 3, TD | TF;
    270 => "pselect6", 6, TD;
    271 => "ppoll", 5, TD;
    272 => "unshare", 1, TP;
    275 => "splice", 6, TD;
    276 => "tee", 4, TD;
    277 => "sync_file_range", 4, TD;
    280 => "utimensat", 4, TD | TF;
    281 => "epoll_pwait", 6, TD;
    282 => "signalfd", 3, TD | TS;
    283 => "timerfd_create", 2, TD;
    284 => "eventfd", 1, TD;
    285 => "fallocate", 4, TD;
    286 => "timerfd_settime", 4, TD;
    287 => "timerfd_gettime", 2, TD;
    288 => "accept4", 4, TN;
    289 => "signalfd4", 4, TD | TS;
    290 => "eventfd2", 2, TD;
    291 => "epoll_create1", 1, TD;
    292 => "dup3", 3, TD;
    293 => "pipe2", 2, TD;
    294 => "inotify_init1", 1, TD;
    298 => "perf_event_open", 5, TD;
    300 => "fanotify_init", 2, TD;
    301 => "fanotify_mark", 5, TD | TF;
    302 => "prlimit64", 4, 0;
    303 => "name_to_handle_at", 5, TD | TF;
    304 => "open_by_handle_at", 3, TD;
    305 => "clock_adjtime", 2, TCL;
    306 => "syncfs", 1, TD;
    308 => "setns", 2, TD;
    309 => "getcpu", 3, 0;
    312 => "kcmp", 5, 0;
    313 => "finit_module", 3, TD;
    314 => "sched_setattr", 3, 0;
    315 => "sched_getattr", 4, 0;
    316 => "renameat2", 5, TD | TF;
    317 => "seccomp", 3, 0;
    318 => "getrandom", 3, 0;
    319 => "memfd_create", 2, TD;
    320 => "kexec_file_load", 5, TD;
    321 => "bpf", 3, TD;
    323 => "userfaultfd", 1, TD;
    324 => "membarrier", 2, 0;
    325 => "mlock2", 3, TM;
    326 => "copy_file_range", 6, TD;
    329 => "pkey_mprotect", 4, TM | SE;
    330 => "pkey_alloc", 2, 0;
    331 => "pkey_free", 1, 0;
    332 => "statx", 5, TD | TF | TST;
    333 => "io_pgetevents", 6, 0;
    334 => "rseq", 4, 0;
};

/// Rows of `syscall_64.tbl` with the `64` ABI: x86_64 only, invalid for x32.
pub(super) const NATIVE_ONLY: &[SyscallEntry] = syscall_table! {
    13 => "rt_sigaction", 4, TS;
    15 => "rt_sigreturn", 0, TS;
    16 => "ioctl", 3, TD;
    19 => "readv", 3, TD;
    20 => "writev", 3, TD;
    45 => "recvfrom", 6, TN;
    46 => "sendmsg", 3, TN;
    47 => "recvmsg", 3, TN;
    59 => "execve", 3, TE | SE;
    101 => "ptrace", 4, 0;
    127 => "rt_sigpending", 2, TS;
    128 => "rt_sigtimedwait", 4, TS;
    129 => "rt_sigqueueinfo", 3, TS | TP;
    131 => "sigaltstack", 2, TS;
    134 => "uselib", 1, TF;
    156 => "_sysctl", 1, 0;
    174 => "create_module", 2, 0;
    177 => "get_kernel_syms", 1, 0;
    178 => "query_module", 5, 0;
    180 => "nfsservctl", 3, 0;
    205 => "set_thread_area", 1, 0;
    206 => "io_setup", 2, TM;
    209 => "io_submit", 3, 0;
    211 => "get_thread_area", 1, 0;
    214 => "epoll_ctl_old", 4, TD;
    215 => "epoll_wait_old", 4, TD;
    222 => "timer_create", 3, 0;
    236 => "vserver", 5, 0;
    244 => "mq_notify", 2, TD;
    246 => "kexec_load", 4, 0;
    247 => "waitid", 5, TP;
    273 => "set_robust_list", 2, 0;
    274 => "get_robust_list", 3, 0;
    278 => "vmsplice", 4, TD;
    279 => "move_pages", 6, TM;
    295 => "preadv", 5, TD;
    296 => "pwritev", 5, TD;
    297 => "rt_tgsigqueueinfo", 4, TP | TS;
    299 => "recvmmsg", 5, TN;
    307 => "sendmmsg", 4, TN;
    310 => "process_vm_readv", 6, 0;
    311 => "process_vm_writev", 6, 0;
    322 => "execveat", 5, TD | TE | SE;
    327 => "preadv2", 6, TD;
    328 => "pwritev2", 6, TD;
};

/// Rows of `syscall_64.tbl` with the `x32` ABI, numbered after clearing `__X32_SYSCALL_BIT`.
pub(super) const X32_ONLY: &[SyscallEntry] = syscall_table! {
    512 => "rt_sigaction", 4, TS | CST;
    513 => "rt_sigreturn", 0, TS | CST;
    514 => "ioctl", 3, TD | CST;
    515 => "readv", 3, TD | CST;
    516 => "writev", 3, TD | CST;
    517 => "recvfrom", 6, TN | CST;
    518 => "sendmsg", 3, TN | CST;
    519 => "recvmsg", 3, TN | CST;
    520 => "execve", 3, TE | SE | CST;
    521 => "ptrace", 4, CST;
    522 => "rt_sigpending", 2, TS | CST;
    523 => "rt_sigtimedwait", 4, TS | CST;
    524 => "rt_sigqueueinfo", 3, TS | TP | CST;
    525 => "sigaltstack", 2, TS | CST;
    526 => "timer_create", 3, CST;
    527 => "mq_notify", 2, TD | CST;
    528 => "kexec_load", 4, CST;
    529 => "waitid", 5, TP | CST;
    530 => "set_robust_list", 2, CST;
    531 => "get_robust_list", 3, CST;
    532 => "vmsplice", 4, TD | CST;
    533 => "move_pages", 6, TM | CST;
    534 => "preadv", 5, TD | CST;
    535 => "pwritev", 5, TD | CST;
    536 => "rt_tgsigqueueinfo", 4, TP | TS | CST;
    537 => "recvmmsg", 5, TN | CST;
    538 => "sendmmsg", 4, TN | CST;
    539 => "process_vm_readv", 6, CST;
    540 => "process_vm_writev", 6, CST;
    543 => "io_setup", 2, TM | CST;
    544 => "io_submit", 3, CST;
    545 => "execveat", 5, TD | TE | SE | CST;
    546 => "preadv2", 6, TD | CST;
    547 => "pwritev2", 6, TD | CST;
};

/// `socketcall(2)` multiplexer number in the i386 table.
pub(super) const SYS_SOCKETCALL: u64 = 102;

/// `ipc(2)` multiplexer number in the i386 table.
pub(super) const SYS_IPC: u64 = 117;

/// First table slot of the synthetic `socketcall(2)` subcalls.
///
/// Subcall `n` lives at `SOCKET_SUBCALL_BASE + n`, past every real i386 syscall number.
pub(super) const SOCKET_SUBCALL_BASE: u64 = 1000;

/// Number of `socketcall(2)` selectors, including the unused 0. `SYS_SENDMMSG` is 20.
pub(super) const SOCKET_NSUBCALLS: u64 = 21;

/// First table slot of the synthetic `ipc(2)` subcalls.
pub(super) const IPC_SUBCALL_BASE: u64 = SOCKET_SUBCALL_BASE + SOCKET_NSUBCALLS;

/// Largest `ipc(2)` selector, `SHMCTL`.
pub(super) const IPC_LAST_SUBCALL: u64 = 24;

/// `syscall_32.tbl`.
pub(super) const I386: &[SyscallEntry] = syscall_table! {
    0 => "restart_syscall", 0, 0;
    1 => "exit", 1, TP | SE;
    2 => "fork", 0, TP;
    3 => "read", 3, TD;
    4 => "write", 3, TD;
    5 => "open", 3, TD | TF;
    6 => "close", 1, TD;
    7 => "waitpid", 3, TP;
    8 => "creat", 2, TD | TF;
    9 => "link", 2, TF;
    10 => "unlink", 1, TF;
    11 => "execve", 3, TE | SE;
    12 => "chdir", 1, TF;
    13 => "time", 1, TCL;
    14 => "mknod", 3, TF;
    15 => "chmod", 2, TF;
    16 => "lchown", 3, TF;
    17 => "break", 0, 0;
    18 => "oldstat", 2, TF | TST;
    19 => "lseek", 3, TD;
    20 => "getpid", 0, NF;
    21 => "mount", 5, TF;
    22 => "umount", 1, TF;
    23 => "setuid", 1, TC;
    24 => "getuid", 0, TC | NF;
    25 => "stime", 1, TCL;
    26 => "ptrace", 4, 0;
    27 => "alarm", 1, 0;
    28 => "oldfstat", 2, TD | TST;
    29 => "pause", 0, TS;
    30 => "utime", 2, TF;
    31 => "stty", 0, 0;
    32 => "gtty", 0, 0;
    33 => "access", 2, TF;
    34 => "nice", 1, 0;
    35 => "ftime", 0, 0;
    36 => "sync", 0, 0;
    37 => "kill", 2, TS;
    38 => "rename", 2, TF;
    39 => "mkdir", 2, TF;
    40 => "rmdir", 1, TF;
    41 => "dup", 1, TD;
    42 => "pipe", 1, TD;
    43 => "times", 1, 0;
    44 => "prof", 0, 0;
    45 => "brk", 1, TM | SE;
    46 => "setgid", 1, TC;
    47 => "getgid", 0, TC | NF;
    48 => "signal", 2, TS;
    49 => "geteuid", 0, TC | NF;
    50 => "getegid", 0, TC | NF;
    51 => "acct", 1, TF;
    52 => "umount2", 2, TF;
    53 => "lock", 0, 0;
    54 => "ioctl", 3, TD;
    55 => "fcntl", 3, TD;
    56 => "mpx", 0, 0;
    57 => "setpgid", 2, 0;
    58 => "ulimit", 0, 0;
    59 => "oldolduname", 1, 0;
    60 => "umask", 1, NF;
    61 => "chroot", 1, TF;
    62 => "ustat", 2, TST;
    63 => "dup2", 2, TD;
    64 => "getppid", 0, NF;
    65 => "getpgrp", 0, NF;
    66 => "setsid", 0, 0;
    67 => "sigaction", 3, TS;
    68 => "sgetmask", 0, TS;
    69 => "ssetmask", 1, TS;
    70 => "setreuid", 2, TC;
    71 => "setregid", 2, TC;
    72 => "sigsuspend", 3, TS;
    73 => "sigpending", 1, TS;
    74 => "sethostname", 2, 0;
    75 => "setrlimit", 2, 0;
    76 => "getrlimit", 2, 0;
    77 => "getrusage", 2, 0;
    78 => "gettimeofday", 2, TCL;
    79 => "settimeofday", 2, TCL;
    80 => "getgroups", 2, TC;
    81 => "setgroups", 2, TC;
    82 => "select", 1, TD;
    83 => "symlink", 2, TF;
    84 => "oldlstat", 2, TF | TST;
    85 => "readlink", 3, TF;
    86 => "uselib", 1, TF;
    87 => "swapon", 2, TF;
    88 => "reboot", 4, 0;
    89 => "readdir", 3, TD;
    90 => "mmap", 1, TD | TM | SE;
    91 => "munmap", 2, TM | SE;
    92 => "truncate", 2, TF;
    93 => "ftruncate", 2, TD;
    94 => "fchmod", 2, TD;
    95 => "fchown", 3, TD;
    96 => "getpriority", 2, 0;
    97 => "setpriority", 3, 0;
    98 => "profil", 0, 0;
    99 => "statfs", 2, TF;
    100 => "fstatfs", 2, TD;
    101 => "ioperm", 3, 0;
    102 => "socketcall", 2, TD;
    103 => "syslog", 3, 0;
    104 => "setitimer", 3, 0;
    105 => "getitimer", 2, 0;
    106 => "stat", 2, TF | TST;
    107 => "lstat", 2, TF | TST;
    108 => "fstat", 2, TD | TST;
    109 => "olduname", 1, 0;
    110 => "iopl", 1, 0;
    111 => "vhangup", 0, 0;
    112 => "idle", 0, 0;
    113 => "vm86old", 1, 0;
    114 => "wait4", 4, TP;
    115 => "swapoff", 1, TF;
    116 => "sysinfo", 1, 0;
    117 => "ipc", 6, TI;
    118 => "fsync", 1, TD;
    119 => "sigreturn", 0, TS;
    120 => "clone", 5, TP;
    121 => "setdomainname", 2, 0;
    122 => "uname", 1, 0;
    123 => "modify_ldt", 3, 0;
    124 => "adjtimex", 1, TCL;
    125 => "mprotect", 3, TM | SE;
    126 => "sigprocmask", 3, TS;
    127 => "create_module", 2, 0;
    128 => "init_module", 3, 0;
    129 => "delete_module", 2, 0;
    130 => "get_kernel_syms", 1, 0;
    131 => "quotactl", 4, TF;
    132 => "getpgid", 1, 0;
    133 => "fchdir", 1, TD;
    134 => "bdflush", 2, 0;
    135 => "sysfs", 3, 0;
    136 => "personality", 1, 0;
    137 => "afs_syscall", 5, 0;
    138 => "setfsuid", 1, TC | NF;
    139 => "setfsgid", 1, TC | NF;
    140 => "_llseek", 5, TD;
    141 => "getdents", 3, TD;
    142 => "_newselect", 5, TD;
    143 => "flock", 2, TD;
    144 => "msync", 3, TM;
    145 => "readv", 3, TD;
    146 => "writev", 3, TD;
    147 => "getsid", 1, 0;
    148 => "fdatasync", 1, TD;
    149 => "_sysctl", 1, 0;
    150 => "mlock", 2, TM;
    151 => "munlock", 2, TM;
    152 => "mlockall", 1, TM;
    153 => "munlockall", 0, TM;
    154 => "sched_setparam", 2, 0;
    155 => "sched_getparam", 2, 0;
    156 => "sched_setscheduler", 3, 0;
    157 => "sched_getscheduler", 1, 0;
    158 => "sched_yield", 0, 0;
    159 => "sched_get_priority_max", 1, 0;
    160 => "sched_get_priority_min", 1, 0;
    161 => "sched_rr_get_interval", 2, 0;
    162 => "nanosleep", 2, 0;
    163 => "mremap", 5, TM | SE;
    164 => "setresuid", 3, TC;
    165 => "getresuid", 3, TC;
    166 => "vm86", 2, 0;
    167 => "query_module", 5, 0;
    168 => "poll", 3, TD;
    169 => "nfsservctl", 3, 0;
    170 => "setresgid", 3, TC;
    171 => "getresgid", 3, TC;
    172 => "prctl", 5, 0;
    173 => "rt_sigreturn", 0, TS;
    174 => "rt_sigaction", 4, TS;
    175 => "rt_sigprocmask", 4, TS;
    176 => "rt_sigpending", 2, TS;
    177 => "rt_sigtimedwait", 4, TS;
    178 => "rt_sigqueueinfo", 3, TS | TP;
    179 => "rt_sigsuspend", 2, TS;
    180 => "pread64", 5, TD;
    181 => "pwrite64", 5, TD;
    182 => "chown", 3, TF;
    183 => "getcwd", 2, TF;
    184 => "capget", 2, TC;
    185 => "capset", 2, TC;
    186 => "sigaltstack", 2, TS;
    187 => "sendfile", 4, TD | TN;
    188 => "getpmsg", 5, TN;
    189 => "putpmsg", 5, TN;
    190 => "vfork", 0, TP;
    191 => "ugetrlimit", 2, 0;
    192 => "mmap2", 6, TD | TM | SE;
    193 => "truncate64", 3, TF;
    194 => "ftruncate64", 3, TD;
    195 => "stat64", 2, TF | TST;
    196 => "lstat64", 2, TF | TST;
    197 => "fstat64", 2, TD | TST;
    198 => "lchown32", 3, TF;
    199 => "getuid32", 0, TC | NF;
    200 => "getgid32", 0, TC | NF;
    201 => "geteuid32", 0, TC | NF;
    202 => "getegid32", 0, TC | NF;
    203 => "setreuid32", 2, TC;
    204 => "setregid32", 2, TC;
    205 => "getgroups32", 2, TC;
    206 => "setgroups32", 2, TC;
    207 => "fchown32", 3, TD;
    208 => "setresuid32", 3, TC;
    209 => "getresuid32", 3, TC;
    210 => "setresgid32", 3, TC;
    211 => "getresgid32", 3, TC;
    212 => "chown32", 3, TF;
    213 => "setuid32", 1, TC;
    214 => "setgid32", 1, TC;
    215 => "setfsuid32", 1, TC | NF;
    216 => "setfsgid32", 1, TC | NF;
    217 => "pivot_root", 2, TF;
    218 => "mincore", 3, TM;
    219 => "madvise", 3, TM;
    220 => "getdents64", 3, TD;
    221 => "fcntl64", 3, TD;
    224 => "gettid", 0, NF;
    225 => "readahead", 4, TD;
    226 => "setxattr", 5, TF;
    227 => "lsetxattr", 5, TF;
    228 => "fsetxattr", 5, TD;
    229 => "getxattr", 4, TF;
    230 => "lgetxattr", 4, TF;
    231 => "fgetxattr", 4, TD;
    232 => "listxattr", 3, TF;
    233 => "llistxattr", 3, TF;
    234 => "flistxattr", 3, TD;
    235 => "removexattr", 2, TF;
    236 => "lremovexattr", 2, TF;
    237 => "fremovexattr", 2, TD;
    238 => "tkill", 2, TS;
    239 => "sendfile64", 4, TD | TN;
    240 => "futex", 6, 0;
    241 => "sched_setaffinity", 3, 0;
    242 => "sched_getaffinity", 3, 0;
    243 => "set_thread_area", 1, 0;
    244 => "get_thread_area", 1, 0;
    245 => "io_setup", 2, TM;
    246 => "io_destroy", 1, TM;
    247 => "io_getevents", 5, 0;
    248 => "io_submit", 3, 0;
    249 => "io_cancel", 3, 0;
    250 => "fadvise64", 5, TD;
    252 => "exit_group", 1, TP | SE;
    253 => "lookup_dcookie", 4, 0;
    254 => "epoll_create", 1, TD;
    255 => "epoll_ctl", 4, TD;
    256 => "epoll_wait", 4, TD;
    257 => "remap_file_pages", 5, TM | SE;
    258 => "set_tid_address", 1, 0;
    259 => "timer_create", 3, 0;
    260 => "timer_settime", 4, 0;
    261 => "timer_gettime", 2, 0;
    262 => "timer_getoverrun", 1, 0;
    263 => "timer_delete", 1, 0;
    264 => "clock_settime", 2, TCL;
    265 => "clock_gettime", 2, TCL;
    266 => "clock_getres", 2, TCL;
    267 => "clock_nanosleep", 4, TCL;
    268 => "statfs64", 3, TF;
    269 => "fstatfs64", 3, TD;
    270 => "tgkill", 3, TS;
    271 => "utimes", 2, TF;
    272 => "fadvise64_64", 6, TD;
    273 => "vserver", 5, 0;
    274 => "mbind", 6, TM;
    275 => "get_mempolicy", 5, TM;
    276 => "set_mempolicy", 3, TM;
    277 => "mq_open", 4, TD;
    278 => "mq_unlink", 1, 0;
    279 => "mq_timedsend", 5, TD;
    280 => "mq_timedreceive", 5, TD;
    281 => "mq_notify", 2, TD;
    282 => "mq_getsetattr", 3, TD;
    283 => "kexec_load", 4, 0;
    284 => "waitid", 5, TP;
    286 => "add_key", 5, 0;
    287 => "request_key", 4, 0;
    288 => "keyctl", 5, 0;
    289 => "ioprio_set", 3, 0;
    290 => "ioprio_get", 2, 0;
    291 => "inotify_init", 0, TD;
    292 => "inotify_add_watch", 3, TD | TF;
    293 => "inotify_rm_watch", 2, TD;
    294 => "migrate_pages", 4, TM;
    295 => "openat", 4, TD | TF;
    296 => "mkdirat", 3, TD | TF;
    297 => "mknodat", 4, TD | TF;
    298 => "fchownat", 5, TD | TF;
    299 => "futimesat", 3, TD | TF;
    300 => "fstatat64", 4, TD | TF | TST;
    301 => "unlinkat", 3, TD | TF;
    302 => "renameat", 4, TD | TF;
    303 => "linkat", 5, TD | TF;
    304 => "symlinkat", 3, TD | TF;
    305 => "readlinkat", 4, TD | TF;
    306 => "fchmodat", 3, TD | TF;
    307 => "faccessat", 3, TD | TF;
    308 => "pselect6", 6, TD;
    309 => "ppoll", 5, TD;
    310 => "unshare", 1, TP;
    311 => "set_robust_list", 2, 0;
    312 => "get_robust_list", 3, 0;
    313 => "splice", 6, TD;
    314 => "sync_file_range", 6, TD;
    315 => "tee", 4, TD;
    316 => "vmsplice", 4, TD;
    317 => "move_pages", 6, TM;
    318 => "getcpu", 3, 0;
    319 => "epoll_pwait", 6, TD;
    320 => "utimensat", 4, TD | TF;
    321 => "signalfd", 3, TD | TS;
    322 => "timerfd_create", 2, TD;
    323 => "eventfd", 1, TD;
    324 => "fallocate", 6, TD;
    325 => "timerfd_settime", 4, TD;
    326 => "timerfd_gettime", 2, TD;
    327 => "signalfd4", 4, TD | TS;
    328 => "eventfd2", 2, TD;
    329 => "epoll_create1", 1, TD;
    330 => "dup3", 3, TD;
    331 => "pipe2", 2, TD;
    332 => "inotify_init1", 1, TD;
    333 => "preadv", 5, TD;
    334 => "pwritev", 5, TD;
    335 => "rt_tgsigqueueinfo", 4, TP | TS;
    336 => "perf_event_open", 5, TD;
    337 => "recvmmsg", 5, TN;
    338 => "fanotify_init", 2, TD;
    339 => "fanotify_mark", 6, TD | TF;
    340 => "prlimit64", 4, 0;
    341 => "name_to_handle_at", 5, TD | TF;
    342 => "open_by_handle_at", 3, TD;
    343 => "clock_adjtime", 2, TCL;
    344 => "syncfs", 1, TD;
    345 => "sendmmsg", 4, TN;
    346 => "setns", 2, TD;
    347 => "process_vm_readv", 6, 0;
    348 => "process_vm_writev", 6, 0;
    349 => "kcmp", 5, 0;
    350 => "finit_module", 3, TD;
    351 => "sched_setattr", 3, 0;
    352 => "sched_getattr", 4, 0;
    353 => "renameat2", 5, TD | TF;
    354 => "seccomp", 3, 0;
    355 => "getrandom", 3, 0;
    356 => "memfd_create", 2, TD;
    357 => "bpf", 3, TD;
    358 => "execveat", 5, TD | TE | SE;
    359 => "socket", 3, TN;
    360 => "socketpair", 4, TN;
    361 => "bind", 3, TN;
    362 => "connect", 3, TN;
    363 => "listen", 2, TN;
    364 => "accept4", 4, TN;
    365 => "getsockopt", 5, TN;
    366 => "setsockopt", 5, TN;
    367 => "getsockname", 3, TN;
    368 => "getpeername", 3, TN;
    369 => "sendto", 6, TN;
    370 => "sendmsg", 3, TN;
    371 => "recvfrom", 6, TN;
    372 => "recvmsg", 3, TN;
    373 => "shutdown", 2, TN;
    374 => "userfaultfd", 1, TD;
    375 => "membarrier", 2, 0;
    376 => "mlock2", 3, TM;
    377 => "copy_file_range", 6, TD;
    378 => "preadv2", 6, TD;
    379 => "pwritev2", 6, TD;
    380 => "pkey_mprotect", 4, TM | SE;
    381 => "pkey_alloc", 2, 0;
    382 => "pkey_free", 1, 0;
    383 => "statx", 5, TD | TF | TST;
    384 => "arch_prctl", 2, 0;
    385 => "io_pgetevents", 6, 0;
    386 => "rseq", 4, 0;
    393 => "semget", 3, TI;
    394 => "semctl", 4, TI;
    395 => "shmget", 3, TI;
    396 => "shmctl", 3, TI;
    397 => "shmat", 3, TI | TM;
    398 => "shmdt", 1, TI | TM;
    399 => "msgget", 2, TI;
    400 => "msgsnd", 4, TI;
    401 => "msgrcv", 5, TI;
    402 => "msgctl", 3, TI;
    403 => "clock_gettime64", 2, TCL;
    404 => "clock_settime64", 2, TCL;
    405 => "clock_adjtime64", 2, TCL;
    406 => "clock_getres_time64", 2, TCL;
    407 => "clock_nanosleep_time64", 4, TCL;
    408 => "timer_gettime64", 2, 0;
    409 => "timer_settime64", 4, 0;
    410 => "timerfd_gettime64", 2, TD;
    411 => "timerfd_settime64", 4, TD;
    412 => "utimensat_time64", 4, TD | TF;
    413 => "pselect6_time64", 6, TD;
    414 => "ppoll_time64", 5, TD;
    416 => "io_pgetevents_time64", 6, 0;
    417 => "recvmmsg_time64", 5, TN;
    418 => "mq_timedsend_time64", 5, TD;
    419 => "mq_timedreceive_time64", 5, TD;
    420 => "semtimedop_time64", 4, TI;
    421 => "rt_sigtimedwait_time64", 4, TS;
    422 => "futex_time64", 6, 0;
    423 => "sched_rr_get_interval_time64", 2, 0;
};

/// `socketcall(2)` subcalls, at `SOCKET_SUBCALL_BASE + SYS_*` from `linux/net.h`.
pub(super) const I386_SOCKET_SUBCALLS: &[SyscallEntry] = syscall_table! {
    1001 => "socket", 3, TN;
    1002 => "bind", 3, TN;
    1003 => "connect", 3, TN;
    1004 => "listen", 2, TN;
    1005 => "accept", 3, TN;
    1006 => "getsockname", 3, TN;
    1007 => "getpeername", 3, TN;
    1008 => "socketpair", 4, TN;
    1009 => "send", 4, TN;
    1010 => "recv", 4, TN;
    1011 => "sendto", 6, TN;
    1012 => "recvfrom", 6, TN;
    1013 => "shutdown", 2, TN;
    1014 => "setsockopt", 5, TN;
    1015 => "getsockopt", 5, TN;
    1016 => "sendmsg", 3, TN;
    1017 => "recvmsg", 3, TN;
    1018 => "accept4", 4, TN;
    1019 => "recvmmsg", 5, TN;
    1020 => "sendmmsg", 4, TN;
};

/// `ipc(2)` subcalls, at `IPC_SUBCALL_BASE + call` from `linux/ipc.h`.
///
/// The selector numbering has gaps; the missing slots are invalid selectors.
pub(super) const I386_IPC_SUBCALLS: &[SyscallEntry] = syscall_table! {
    1022 => "semop", 4, TI;
    1023 => "semget", 4, TI;
    1024 => "semctl", 4, TI;
    1025 => "semtimedop", 5, TI;
    1032 => "msgsnd", 4, TI;
    1033 => "msgrcv", 5, TI;
    1034 => "msgget", 4, TI;
    1035 => "msgctl", 4, TI;
    1042 => "shmat", 4, TI | TM;
    1043 => "shmdt", 4, TI | TM;
    1044 => "shmget", 4, TI;
    1045 => "shmctl", 4, TI;
};
