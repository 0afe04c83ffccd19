use std::process::Command;

use anyhow::Result;
use ntest::timeout;
use sysvise::{Config, Event, TraceAll, Tracer};

#[macro_use]
mod support;
use support::*;

#[test]
#[timeout(3000)]
fn test_attach_running() -> Result<()> {
    // Started untraced, so options are only applied at the attach-stop.
    let mut child = Command::new("sleep").arg("0.3").spawn()?;
    let pid = pid!(child.id() as i32);

    let mut tracer = Tracer::new(Config::default())?;
    tracer.attach(pid)?;
    assert!(tracer.attach(pid).is_err());

    let mut recorder = Recorder::default();
    let reports = trace_to_end(&mut tracer, &mut recorder, &TraceAll)?;

    assert_eq!(reports.first().map(|r| r.event), Some(Event::Attach));

    assert_equivalent(&lifecycle(&reports), &[
        event!(0, Attach),
        event!(0, Exiting(ExitType::Exit(0))),
        event!(0, Exited { exit_code: 0 }),
    ]);

    // Without `PTRACE_O_TRACESYSGOOD`, none of these would be syscall-stops.
    assert!(reports.iter().any(|r| matches!(r.event, Event::SyscallEnter(..))));
    assert_eq!(recorder.attached, vec![pid]);
    assert_eq!(recorder.unavailable, vec![(pid, "exit_group".to_owned())]);
    assert!(recorder.execs.is_empty());
    assert!(tracer.registry().is_empty());

    // Reaped by the tracer.
    assert!(child.try_wait().is_err());

    Ok(())
}
