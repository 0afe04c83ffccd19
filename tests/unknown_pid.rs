use std::process::Command;

use anyhow::Result;
use ntest::timeout;
use sysvise::{Config, Error, Silent, TraceAll, Tracer};

#[macro_use]
mod support;

#[test]
#[timeout(3000)]
fn test_unknown_pid_is_fatal() -> Result<()> {
    // Neither traced nor registered.
    let stray = Command::new("true").spawn()?;
    let stray_pid = pid!(stray.id() as i32);

    let mut traceme = Command::new("sleep");
    traceme.arg("0.3");

    let mut tracer = Tracer::new(Config::default())?;
    tracer.spawn(traceme)?;

    let mut errors = vec![];

    loop {
        match tracer.step(&mut Silent, &TraceAll) {
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(err) => errors.push(err),
        }
    }

    assert_eq!(errors.len(), 1);

    match &errors[0] {
        Error::UnknownPid { pid, .. } => assert_eq!(*pid, stray_pid),
        err => panic!("unexpected error: {err}"),
    }

    assert!(errors[0].is_fatal());
    assert!(errors[0].to_string().contains(&stray_pid.to_string()));

    Ok(())
}
