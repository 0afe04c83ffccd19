use std::process::Command;

use anyhow::Result;
use nix::sys::wait::WaitStatus;
use ntest::timeout;
use sysvise::{Config, Event, Report, TraceAll, Tracer};

#[macro_use]
mod support;
use support::*;

#[test]
#[timeout(3000)]
fn test_shutdown_running() -> Result<()> {
    let mut cmd = Command::new("sleep");
    cmd.arg("0.3");

    let mut tracer = Tracer::new(Config::default())?;
    let child = tracer.spawn(cmd)?;
    let pid = pid!(child.id() as i32);

    let mut recorder = Recorder::default();

    // Resumed into the sleep, so not in a ptrace-stop when we let go.
    while !recorder.entries.iter().any(|(_, name)| name.ends_with("nanosleep")) {
        tracer.step(&mut recorder, &TraceAll)?.expect("tracee ended before sleeping");
    }

    assert_eq!(tracer.shutdown(0), 0);
    assert!(tracer.registry().is_empty());

    // The detached tracee finishes its sleep, and its exit is still ours to reap.
    let reports = trace_to_end(&mut tracer, &mut recorder, &TraceAll)?;

    assert_eq!(reports, vec![Report {
        pid,
        event: Event::Dropped { status: WaitStatus::Exited(pid, 0) },
    }]);

    Ok(())
}
