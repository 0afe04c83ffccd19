use std::env;
use std::os::unix::process::CommandExt;
use std::process::Command;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use ntest::timeout;
use sysvise::{Config, Event, TraceAll, Tracer};

#[macro_use]
mod support;
use support::*;

const EXEC_FROM_THREAD: &str = "SYSVISE_EXEC_FROM_THREAD";

/// Run as the tracee: exec `true` from a thread that is not the group leader.
#[test]
#[ignore]
fn exec_from_thread() {
    if env::var_os(EXEC_FROM_THREAD).is_none() {
        return;
    }

    thread::spawn(|| thread::sleep(Duration::from_secs(60)));
    thread::sleep(Duration::from_millis(100));

    let err = thread::spawn(|| Command::new("true").exec()).join();
    panic!("exec failed: {err:?}");
}

#[test]
#[timeout(5000)]
fn test_exec_off_leader() -> Result<()> {
    let mut cmd = Command::new(env::current_exe()?);
    cmd.args(["--ignored", "--exact", "exec_from_thread", "--test-threads=1"]);
    cmd.env(EXEC_FROM_THREAD, "1");

    let mut tracer = Tracer::new(Config::default())?;
    let child = tracer.spawn(cmd)?;
    let leader = pid!(child.id() as i32);

    let mut recorder = Recorder::default();
    let reports = trace_to_end(&mut tracer, &mut recorder, &TraceAll)?;

    // The exec'ing thread took over the leader's pid.
    let (pid, old) = *recorder.execs.last().expect("no exec seen");
    assert_eq!(pid, leader);
    assert_ne!(old, leader);
    assert!(reports.contains(&event!(leader.as_raw(), Exec { old })));

    // Nothing is reported for its old tid after the exec.
    let exec_at = reports
        .iter()
        .position(|r| r.event == Event::Exec { old })
        .expect("exec report");
    assert!(reports[exec_at..].iter().all(|r| r.pid != old));

    // The execve() entry was made by the old tid, and it returns to the leader.
    let execve_exits: Vec<_> = recorder
        .exits
        .iter()
        .filter(|(_, name, _)| name == "execve")
        .map(|(pid, ..)| *pid)
        .collect();
    assert_eq!(execve_exits.last(), Some(&leader));

    assert_eq!(recorder.exited.last(), Some(&(leader, 0)));
    assert!(tracer.registry().is_empty());

    Ok(())
}
