//! Syscall tables of the arm64 personalities, from `asm-generic/unistd.h` and
//! `arch/arm/tools/syscall.tbl`.

use crate::personality::*;

pub(super) const AARCH64: &[SyscallEntry] = syscall_table! {
    0 => "io_setup", 2, TM;
    1 => "io_destroy", 1, TM;
    2 => "io_submit", 3, 0;
    3 => "io_cancel", 3, 0;
    4 => "io_getevents", 5, 0;
    5 => "setxattr", 5, TF;
    6 => "lsetxattr", 5, TF;
    7 => "fsetxattr", 5, TD;
    8 => "getxattr", 4, TF;
    9 => "lgetxattr", 4, TF;
    10 => "fgetxattr", 4, TD;
    11 => "listxattr", 3, TF;
    12 => "llistxattr", 3, TF;
    13 => "flistxattr", 3, TD;
    14 => "removexattr", 2, TF;
    15 => "lremovexattr", 2, TF;
    16 => "fremovexattr", 2, TD;
    17 => "getcwd", 2, TF;
    18 => "lookup_dcookie", 3, 0;
    19 => "eventfd2", 2, TD;
    20 => "epoll_create1", 1, TD;
    21 => "epoll_ctl", 4, TD;
    22 => "epoll_pwait", 6, TD;
    23 => "dup", 1, TD;
    24 => "dup3", 3, TD;
    25 => "fcntl", 3, TD;
    26 => "inotify_init1", 1, TD;
    27 => "inotify_add_watch", 3, TD | TF;
    28 => "inotify_rm_watch", 2, TD;
    29 => "ioctl", 3, TD;
    30 => "ioprio_set", 3, 0;
    31 => "ioprio_get", 2, 0;
    32 => "flock", 2, TD;
    33 => "mknodat", 4, TD | TF;
    34 => "mkdirat", 3, TD | TF;
    35 => "unlinkat", 3, TD | TF;
    36 => "symlinkat", 3, TD | TF;
    37 => "linkat", 5, TD | TF;
    38 => "renameat", 4, TD | TF;
    39 => "umount2", 2, TF;
    40 => "mount", 5, TF;
    41 => "pivot_root", 2, TF;
    42 => "nfsservctl", 3, 0;
    43 => "statfs", 2, TF;
    44 => "fstatfs", 2, TD;
    45 => "truncate", 2, TF;
    46 => "ftruncate", 2, TD;
    47 => "fallocate", 4, TD;
    48 => "faccessat", 3, TD | TF;
    49 => "chdir", 1, TF;
    50 => "fchdir", 1, TD;
    51 => "chroot", 1, TF;
    52 => "fchmod", 2, TD;
    53 => "fchmodat", 3, TD | TF;
    54 => "fchownat", 5, TD | TF;
    55 => "fchown", 3, TD;
    56 => "openat", 4, TD | TF;
    57 => "close", 1, TD;
    58 => "vhangup", 0, 0;
    59 => "pipe2", 2, TD;
    60 => "quotactl", 4, TF;
    61 => "getdents64", 3, TD;
    62 => "lseek", 3, TD;
    63 => "read", 3, TD;
    64 => "write", 3, TD;
    65 => "readv", 3, TD;
    66 => "writev", 3, TD;
    67 => "pread64", 4, TD;
    68 => "pwrite64", 4, TD;
    69 => "preadv", 5, TD;
    70 => "pwritev", 5, TD;
    71 => "sendfile", 4, TD | TN;
    72 => "pselect6", 6, TD;
    73 => "ppoll", 5, TD;
    74 => "signalfd4", 4, TD | TS;
    75 => "vmsplice", 4, TD;
    76 => "splice", 6, TD;
    77 => "tee", 4, TD;
    78 => "readlinkat", 4, TD | TF;
    79 => "newfstatat", 4, TD | TF | TST;
    80 => "fstat", 2, TD | TST;
    81 => "sync", 0, 0;
    82 => "fsync", 1, TD;
    83 => "fdatasync", 1, TD;
    84 => "sync_file_range", 4, TD;
    85 => "timerfd_create", 2, TD;
    86 => "timerfd_settime", 4, TD;
    87 => "timerfd_gettime", 2, TD;
    88 => "utimensat", 4, TD | TF;
    89 => "acct", 1, TF;
    90 => "capget", 2, TC;
    91 => "capset", 2, TC;
    92 => "personality", 1, 0;
    93 => "exit", 1, TP | SE;
    94 => "exit_group", 1, TP | SE;
    95 => "waitid", 5, TP;
    96 => "set_tid_address", 1, 0;
    97 => "unshare", 1, TP;
    98 => "futex", 6, 0;
    99 => "set_robust_list", 2, 0;
    100 => "get_robust_list", 3, 0;
    101 => "nanosleep", 2, 0;
    102 => "getitimer", 2, 0;
    103 => "setitimer", 3, 0;
    104 => "kexec_load", 4, 0;
    105 => "init_module", 3, 0;
    106 => "delete_module", 2, 0;
    107 => "timer_create", 3, 0;
    108 => "timer_gettime", 2, 0;
    109 => "timer_getoverrun", 1, 0;
    110 => "timer_settime", 4, 0;
    111 => "timer_delete", 1, 0;
    112 => "clock_settime", 2, TCL;
    113 => "clock_gettime", 2, TCL;
    114 => "clock_getres", 2, TCL;
    115 => "clock_nanosleep", 4, TCL;
    116 => "syslog", 3, 0;
    117 => "ptrace", 4, 0;
    118 => "sched_setparam", 2, 0;
    119 => "sched_setscheduler", 3, 0;
    120 => "sched_getscheduler", 1, 0;
    121 => "sched_getparam", 2, 0;
    122 => "sched_setaffinity", 3, 0;
    123 => "sched_getaffinity", 3, 0;
    124 => "sched_yield", 0, 0;
    125 => "sched_get_priority_max", 1, 0;
    126 => "sched_get_priority_min", 1, 0;
    127 => "sched_rr_get_interval", 2, 0;
    128 => "restart_syscall", 0, 0;
    129 => "kill", 2, TS;
    130 => "tkill", 2, TS;
    131 => "tgkill", 3, TS;
    132 => "sigaltstack", 2, TS;
    133 => "rt_sigsuspend", 2, TS;
    134 => "rt_sigaction", 4, TS;
    135 => "rt_sigprocmask", 4, TS;
    136 => "rt_sigpending", 2, TS;
    137 => "rt_sigtimedwait", 4, TS;
    138 => "rt_sigqueueinfo", 3, TS | TP;
    139 => "rt_sigreturn", 0, TS;
    140 => "setpriority", 3, 0;
    141 => "getpriority", 2, 0;
    142 => "reboot", 4, 0;
    143 => "setregid", 2, TC;
    144 => "setgid", 1, TC;
    145 => "setreuid", 2, TC;
    146 => "setuid", 1, TC;
    147 => "setresuid", 3, TC;
    148 => "getresuid", 3, TC;
    149 => "setresgid", 3, TC;
    150 => "getresgid", 3, TC;
    151 => "setfsuid", 1, TC | NF;
    152 => "setfsgid", 1, TC | NF;
    153 => "times", 1, 0;
    154 => "setpgid", 2, 0;
    155 => "getpgid", 1, 0;
    156 => "getsid", 1, 0;
    157 => "setsid", 0, 0;
    158 => "getgroups", 2, TC;
    159 => "setgroups", 2, TC;
    160 => "uname", 1, 0;
    161 => "sethostname", 2, 0;
    162 => "setdomainname", 2, 0;
    163 => "getrlimit", 2, 0;
    164 => "setrlimit", 2, 0;
    165 => "getrusage", 2, 0;
    166 => "umask", 1, NF;
    167 => "prctl", 5, 0;
    168 => "getcpu", 3, 0;
    169 => "gettimeofday", 2, TCL;
    170 => "settimeofday", 2, TCL;
    171 => "adjtimex", 1, TCL;
    172 => "getpid", 0, NF;
    173 => "getppid", 0, NF;
    174 => "getuid", 0, TC | NF;
    175 => "geteuid", 0, TC | NF;
    176 => "getgid", 0, TC | NF;
    177 => "getegid", 0, TC | NF;
    178 => "gettid", 0, NF;
    179 => "sysinfo", 1, 0;
    180 => "mq_open", 4, TD;
    181 => "mq_unlink", 1, 0;
    182 => "mq_timedsend", 5, TD;
    183 => "mq_timedreceive", 5, TD;
    184 => "mq_notify", 2, TD;
    185 => "mq_getsetattr", 3, TD;
    186 => "msgget", 2, TI;
    187 => "msgctl", 3, TI;
    188 => "msgrcv", 5, TI;
    189 => "msgsnd", 4, TI;
    190 => "semget", 3, TI;
    191 => "semctl", 4, TI;
    192 => "semtimedop", 4, TI;
    193 => "semop", 3, TI;
    194 => "shmget", 3, TI;
    195 => "shmctl", 3, TI;
    196 => "shmat", 3, TI | TM;
    197 => "shmdt", 1, TI | TM;
    198 => "socket", 3, TN;
    199 => "socketpair", 4, TN;
    200 => "bind", 3, TN;
    201 => "listen", 2, TN;
    202 => "accept", 3, TN;
    203 => "connect", 3, TN;
    204 => "getsockname", 3, TN;
    205 => "getpeername", 3, TN;
    206 => "sendto", 6, TN;
    207 => "recvfrom", 6, TN;
    208 => "setsockopt", 5, TN;
    209 => "getsockopt", 5, TN;
    210 => "shutdown", 2, TN;
    211 => "sendmsg", 3, TN;
    212 => "recvmsg", 3, TN;
    213 => "readahead", 3, TD;
    214 => "brk", 1, TM | SE;
    215 => "munmap", 2, TM | SE;
    216 => "mremap", 5, TM | SE;
    217 => "add_key", 5, 0;
    218 => "request_key", 4, 0;
    219 => "keyctl", 5, 0;
    220 => "clone", 5, TP;
    221 => "execve", 3, TE | SE;
    222 => "mmap", 6, TD | TM | SE;
    223 => "fadvise64", 4, TD;
    224 => "swapon", 2, TF;
    225 => "swapoff", 1, TF;
    226 => "mprotect", 3, TM | SE;
    227 => "msync", 3, TM;
    228 => "mlock", 2, TM;
    229 => "munlock", 2, TM;
    230 => "mlockall", 1, TM;
    231 => "munlockall", 0, TM;
    232 => "mincore", 3, TM;
    233 => "madvise", 3, TM;
    234 => "remap_file_pages", 5, TM | SE;
    235 => "mbind", 6, TM;
    236 => "get_mempolicy", 5, TM;
    237 => "set_mempolicy", 3, TM;
    238 => "migrate_pages", 4, TM;
    239 => "move_pages", 6, TM;
    240 => "rt_tgsigqueueinfo", 4, TP | TS;
    241 => "perf_event_open", 5, TD;
    242 => "accept4", 4, TN;
    243 => "recvmmsg", 5, TN;
    260 => "wait4", 4, TP;
    261 => "prlimit64", 4, 0;
    262 => "fanotify_init", 2, TD;
    263 => "fanotify_mark", 5, TD | TF;
    264 => "name_to_handle_at", 5, TD | TF;
    265 => "open_by_handle_at", 3, TD;
    266 => "clock_adjtime", 2, TCL;
    267 => "syncfs", 1, TD;
    268 => "setns", 2, TD;
    269 => "sendmmsg", 4, TN;
    270 => "process_vm_readv", 6, 0;
    271 => "process_vm_writev", 6, 0;
    272 => "kcmp", 5, 0;
    273 => "finit_module", 3, TD;
    274 => "sched_setattr", 3, 0;
    275 => "sched_getattr", 4, 0;
    276 => "renameat2", 5, TD | TF;
    277 => "seccomp", 3, 0;
    278 => "getrandom", 3, 0;
    279 => "memfd_create", 2, TD;
    280 => "bpf", 3, TD;
    281 => "execveat", 5, TD | TE | SE;
    282 => "userfaultfd", 1, TD;
    283 => "membarrier", 2, 0;
    284 => "mlock2", 3, TM;
    285 => "copy_file_range", 6, TD;
    286 => "preadv2", 6, TD;
    287 => "pwritev2", 6, TD;
    288 => "pkey_mprotect", 4, TM | SE;
    289 => "pkey_alloc", 2, 0;
    290 => "pkey_free", 1, 0;
    291 => "statx", 5, TD | TF | TST;
    292 => "io_pgetevents", 6, 0;
    293 => "rseq", 4, 0;
    294 => "kexec_file_load", 5, TD;
};

/// EABI rows of the 32-bit ARM table. OABI-only numbers are absent.
pub(super) const ARM: &[SyscallEntry] = syscall_table! {
    0 => "restart_syscall", 0, 0;
    1 => "exit", 1, TP | SE;
    2 => "fork", 0, TP;
    3 => "read", 3, TD;
    4 => "write", 3, TD;
    5 => "open", 3, TD | TF;
    6 => "close", 1, TD;
    8 => "creat", 2, TD | TF;
    9 => "link", 2, TF;
    10 => "unlink", 1, TF;
    11 => "execve", 3, TE | SE;
    12 => "chdir", 1, TF;
    14 => "mknod", 3, TF;
    15 => "chmod", 2, TF;
    16 => "lchown", 3, TF;
    19 => "lseek", 3, TD;
    20 => "getpid", 0, NF;
    21 => "mount", 5, TF;
    23 => "setuid", 1, TC;
    24 => "getuid", 0, TC | NF;
    26 => "ptrace", 4, 0;
    29 => "pause", 0, TS;
    33 => "access", 2, TF;
    34 => "nice", 1, 0;
    36 => "sync", 0, 0;
    37 => "kill", 2, TS;
    38 => "rename", 2, TF;
    39 => "mkdir", 2, TF;
    40 => "rmdir", 1, TF;
    41 => "dup", 1, TD;
    42 => "pipe", 1, TD;
    43 => "times", 1, 0;
    45 => "brk", 1, TM | SE;
    46 => "setgid", 1, TC;
    47 => "getgid", 0, TC | NF;
    49 => "geteuid", 0, TC | NF;
    50 => "getegid", 0, TC | NF;
    51 => "acct", 1, TF;
    52 => "umount2", 2, TF;
    54 => "ioctl", 3, TD;
    55 => "fcntl", 3, TD;
    57 => "setpgid", 2, 0;
    60 => "umask", 1, NF;
    61 => "chroot", 1, TF;
    62 => "ustat", 2, TST;
    63 => "dup2", 2, TD;
    64 => "getppid", 0, NF;
    65 => "getpgrp", 0, NF;
    66 => "setsid", 0, 0;
    67 => "sigaction", 3, TS;
    70 => "setreuid", 2, TC;
    71 => "setregid", 2, TC;
    72 => "sigsuspend", 3, TS;
    73 => "sigpending", 1, TS;
    74 => "sethostname", 2, 0;
    75 => "setrlimit", 2, 0;
    77 => "getrusage", 2, 0;
    78 => "gettimeofday", 2, TCL;
    79 => "settimeofday", 2, TCL;
    80 => "getgroups", 2, TC;
    81 => "setgroups", 2, TC;
    83 => "symlink", 2, TF;
    85 => "readlink", 3, TF;
    86 => "uselib", 1, TF;
    87 => "swapon", 2, TF;
    88 => "reboot", 4, 0;
    91 => "munmap", 2, TM | SE;
    92 => "truncate", 2, TF;
    93 => "ftruncate", 2, TD;
    94 => "fchmod", 2, TD;
    95 => "fchown", 3, TD;
    96 => "getpriority", 2, 0;
    97 => "setpriority", 3, 0;
    99 => "statfs", 2, TF;
    100 => "fstatfs", 2, TD;
    103 => "syslog", 3, 0;
    104 => "setitimer", 3, 0;
    105 => "getitimer", 2, 0;
    106 => "stat", 2, TF | TST;
    107 => "lstat", 2, TF | TST;
    108 => "fstat", 2, TD | TST;
    111 => "vhangup", 0, 0;
    114 => "wait4", 4, TP;
    115 => "swapoff", 1, TF;
    116 => "sysinfo", 1, 0;
    118 => "fsync", 1, TD;
    119 => "sigreturn", 0, TS;
    120 => "clone", 5, TP;
    121 => "setdomainname", 2, 0;
    122 => "uname", 1, 0;
    124 => "adjtimex", 1, TCL;
    125 => "mprotect", 3, TM | SE;
    126 => "sigprocmask", 3, TS;
    128 => "init_module", 3, 0;
    129 => "delete_module", 2, 0;
    131 => "quotactl", 4, TF;
    132 => "getpgid", 1, 0;
    133 => "fchdir", 1, TD;
    134 => "bdflush", 2, 0;
    135 => "sysfs", 3, 0;
    136 => "personality", 1, 0;
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
    180 => "pread64", 6, TD;
    181 => "pwrite64", 6, TD;
    182 => "chown", 3, TF;
    183 => "getcwd", 2, TF;
    184 => "capget", 2, TC;
    185 => "capset", 2, TC;
    186 => "sigaltstack", 2, TS;
    187 => "sendfile", 4, TD | TN;
    190 => "vfork", 0, TP;
    191 => "ugetrlimit", 2, 0;
    192 => "mmap2", 6, TD | TM | SE;
    193 => "truncate64", 4, TF;
    194 => "ftruncate64", 4, TD;
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
    217 => "getdents64", 3, TD;
    218 => "pivot_root", 2, TF;
    219 => "mincore", 3, TM;
    220 => "madvise", 3, TM;
    221 => "fcntl64", 3, TD;
    224 => "gettid", 0, NF;
    225 => "readahead", 5, TD;
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
    243 => "io_setup", 2, TM;
    244 => "io_destroy", 1, TM;
    245 => "io_getevents", 5, 0;
    246 => "io_submit", 3, 0;
    247 => "io_cancel", 3, 0;
    248 => "exit_group", 1, TP | SE;
    249 => "lookup_dcookie", 4, 0;
    250 => "epoll_create", 1, TD;
    251 => "epoll_ctl", 4, TD;
    252 => "epoll_wait", 4, TD;
    253 => "remap_file_pages", 5, TM | SE;
    256 => "set_tid_address", 1, 0;
    257 => "timer_create", 3, 0;
    258 => "timer_settime", 4, 0;
    259 => "timer_gettime", 2, 0;
    260 => "timer_getoverrun", 1, 0;
    261 => "timer_delete", 1, 0;
    262 => "clock_settime", 2, TCL;
    263 => "clock_gettime", 2, TCL;
    264 => "clock_getres", 2, TCL;
    265 => "clock_nanosleep", 4, TCL;
    266 => "statfs64", 3, TF;
    267 => "fstatfs64", 3, TD;
    268 => "tgkill", 3, TS;
    269 => "utimes", 2, TF;
    270 => "arm_fadvise64_64", 6, TD;
    271 => "pciconfig_iobase", 3, 0;
    272 => "pciconfig_read", 5, 0;
    273 => "pciconfig_write", 5, 0;
    274 => "mq_open", 4, TD;
    275 => "mq_unlink", 1, 0;
    276 => "mq_timedsend", 5, TD;
    277 => "mq_timedreceive", 5, TD;
    278 => "mq_notify", 2, TD;
    279 => "mq_getsetattr", 3, TD;
    280 => "waitid", 5, TP;
    281 => "socket", 3, TN;
    282 => "bind", 3, TN;
    283 => "connect", 3, TN;
    284 => "listen", 2, TN;
    285 => "accept", 3, TN;
    286 => "getsockname", 3, TN;
    287 => "getpeername", 3, TN;
    288 => "socketpair", 4, TN;
    289 => "send", 4, TN;
    290 => "sendto", 6, TN;
    291 => "recv", 4, TN;
    292 => "recvfrom", 6, TN;
    293 => "shutdown", 2, TN;
    294 => "setsockopt", 5, TN;
    295 => "getsockopt", 5, TN;
    296 => "sendmsg", 3, TN;
    297 => "recvmsg", 3, TN;
    298 => "semop", 3, TI;
    299 => "semget", 3, TI;
    300 => "semctl", 4, TI;
    301 => "msgsnd", 4, TI;
    302 => "msgrcv", 5, TI;
    303 => "msgget", 2, TI;
    304 => "msgctl", 3, TI;
    305 => "shmat", 3, TI | TM;
    306 => "shmdt", 1, TI | TM;
    307 => "shmget", 3, TI;
    308 => "shmctl", 3, TI;
    309 => "add_key", 5, 0;
    310 => "request_key", 4, 0;
    311 => "keyctl", 5, 0;
    312 => "semtimedop", 4, TI;
    313 => "vserver", 5, 0;
    314 => "ioprio_set", 3, 0;
    315 => "ioprio_get", 2, 0;
    316 => "inotify_init", 0, TD;
    317 => "inotify_add_watch", 3, TD | TF;
    318 => "inotify_rm_watch", 2, TD;
    319 => "mbind", 6, TM;
    320 => "get_mempolicy", 5, TM;
    321 => "set_mempolicy", 3, TM;
    322 => "openat", 4, TD | TF;
    323 => "mkdirat", 3, TD | TF;
    324 => "mknodat", 4, TD | TF;
    325 => "fchownat", 5, TD | TF;
    326 => "futimesat", 3, TD | TF;
    327 => "fstatat64", 4, TD | TF | TST;
    328 => "unlinkat", 3, TD | TF;
    329 => "renameat", 4, TD | TF;
    330 => "linkat", 5, TD | TF;
    331 => "symlinkat", 3, TD | TF;
    332 => "readlinkat", 4, TD | TF;
    333 => "fchmodat", 3, TD | TF;
    334 => "faccessat", 3, TD | TF;
    335 => "pselect6", 6, TD;
    336 => "ppoll", 5, TD;
    337 => "unshare", 1, TP;
    338 => "set_robust_list", 2, 0;
    339 => "get_robust_list", 3, 0;
    340 => "splice", 6, TD;
    341 => "arm_sync_file_range", 6, TD;
    342 => "tee", 4, TD;
    343 => "vmsplice", 4, TD;
    344 => "move_pages", 6, TM;
    345 => "getcpu", 3, 0;
    346 => "epoll_pwait", 6, TD;
    347 => "kexec_load", 4, 0;
    348 => "utimensat", 4, TD | TF;
    349 => "signalfd", 3, TD | TS;
    350 => "timerfd_create", 2, TD;
    351 => "eventfd", 1, TD;
    352 => "fallocate", 6, TD;
    353 => "timerfd_settime", 4, TD;
    354 => "timerfd_gettime", 2, TD;
    355 => "signalfd4", 4, TD | TS;
    356 => "eventfd2", 2, TD;
    357 => "epoll_create1", 1, TD;
    358 => "dup3", 3, TD;
    359 => "pipe2", 2, TD;
    360 => "inotify_init1", 1, TD;
    361 => "preadv", 5, TD;
    362 => "pwritev", 5, TD;
    363 => "rt_tgsigqueueinfo", 4, TP | TS;
    364 => "perf_event_open", 5, TD;
    365 => "recvmmsg", 5, TN;
    366 => "accept4", 4, TN;
    367 => "fanotify_init", 2, TD;
    368 => "fanotify_mark", 6, TD | TF;
    369 => "prlimit64", 4, 0;
    370 => "name_to_handle_at", 5, TD | TF;
    371 => "open_by_handle_at", 3, TD;
    372 => "clock_adjtime", 2, TCL;
    373 => "syncfs", 1, TD;
    374 => "sendmmsg", 4, TN;
    375 => "setns", 2, TD;
    376 => "process_vm_readv", 6, 0;
    377 => "process_vm_writev", 6, 0;
    378 => "kcmp", 5, 0;
    379 => "finit_module", 3, TD;
    380 => "sched_setattr", 3, 0;
    381 => "sched_getattr", 4, 0;
    382 => "renameat2", 5, TD | TF;
    383 => "seccomp", 3, 0;
    384 => "getrandom", 3, 0;
    385 => "memfd_create", 2, TD;
    386 => "bpf", 3, TD;
    387 => "execveat", 5, TD | TE | SE;
    388 => "userfaultfd", 1, TD;
    389 => "membarrier", 2, 0;
    390 => "mlock2", 3, TM;
    391 => "copy_file_range", 6, TD;
    392 => "preadv2", 6, TD;
    393 => "pwritev2", 6, TD;
    394 => "pkey_mprotect", 4, TM | SE;
    395 => "pkey_alloc", 2, 0;
    396 => "pkey_free", 1, 0;
    397 => "statx", 5, TD | TF | TST;
    398 => "rseq", 4, 0;
    399 => "io_pgetevents", 6, 0;
    400 => "migrate_pages", 4, TM;
    401 => "kexec_file_load", 5, TD;
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

/// ARM private syscalls (`__ARM_NR_BASE + n`), shuffled to `ARM_FIRST_SHUFFLED + n`.
pub(super) const ARM_PRIVATE: &[SyscallEntry] = syscall_table! {
    464 => "breakpoint", 0, 0;
    465 => "cacheflush", 3, TM;
    466 => "usr26", 0, 0;
    467 => "usr32", 0, 0;
    468 => "set_tls", 1, 0;
    469 => "get_tls", 0, NF;
};
