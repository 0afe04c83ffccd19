#[macro_use]
pub mod error;

#[macro_use]
pub mod personality;

pub mod arch;
pub mod children;
pub mod ptrace;
pub mod resolve;
pub mod tcb;
pub mod tracer;

pub use arch::Arch;
pub use children::{ChildAction, ChildHandler, Children, DefaultHandler, SignalOutcome};
pub use error::Error;
pub use personality::{ActivePersonality, Personality, Syscall};
pub use ptrace::{Pid, Signal};
pub use resolve::{EntrySnapshot, ExitSnapshot, Outcome, RestartKind};
pub use tcb::{Registry, Tcb, TcbFlags, TcbHandle};
pub use tracer::{Config, Event, ExitType, Filter, Observer, Report, Restart, Silent, TraceAll, Tracer};
