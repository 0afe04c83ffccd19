#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::TryInto;

use pretty_assertions::assert_eq;
use sysvise::{ActivePersonality, EntrySnapshot, Event, ExitSnapshot, Outcome, Pid, Report, Signal, Tcb};
use sysvise::{Filter, Observer, Tracer};

#[allow(unused)]
macro_rules! pid {
    ($raw: expr) => {
        sysvise::Pid::from_raw($raw)
    };
}

/// Construct a lifecycle report with a readable, integration test-friendly syntax.
#[allow(unused)]
macro_rules! event {
    ($raw_pid: expr, $event: expr) => {{
        #[allow(unused)]
        use sysvise::Event::*;
        #[allow(unused)]
        use sysvise::ExitType;
        #[allow(unused)]
        use sysvise::Signal::*;

        let pid = sysvise::Pid::from_raw($raw_pid);

        sysvise::Report { pid, event: $event }
    }};
}

/// Step `tracer` until no children are left, printing and collecting every report.
pub fn trace_to_end(tracer: &mut Tracer, observer: &mut dyn Observer, filter: &dyn Filter) -> anyhow::Result<Vec<Report>> {
    let mut reports = vec![];

    while let Some(report) = tracer.step(observer, filter)? {
        eprintln!("{}: {:?}", report.pid, report.event);
        reports.push(report);
    }

    Ok(reports)
}

/// Reports other than syscall-stops.
pub fn lifecycle(reports: &[Report]) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| !matches!(r.event, Event::SyscallEnter(..) | Event::SyscallExit(..) | Event::Spurious))
        .copied()
        .collect()
}

/// Reports of one (raw, unnormalized) pid.
pub fn of_pid(reports: &[Report], pid: Pid) -> Vec<Report> {
    reports.iter().filter(|r| r.pid == pid).copied().collect()
}

/// Assert that two report traces are equivalent modulo PID normalization.
pub fn assert_equivalent(left: &[Report], right: &[Report]) {
    let normed_left = Normalizer::normalize(left);
    let normed_right = Normalizer::normalize(right);
    assert_eq!(normed_left, normed_right)
}

/// Observer that remembers what it was told.
#[derive(Debug, Default)]
pub struct Recorder {
    pub entries: Vec<(Pid, String)>,
    pub exits: Vec<(Pid, String, Outcome)>,
    pub unavailable: Vec<(Pid, String)>,
    pub signals: Vec<(Pid, Signal, bool)>,
    pub execs: Vec<(Pid, Pid)>,
    pub attached: Vec<Pid>,
    pub exited: Vec<(Pid, i32)>,
    pub signaled: Vec<(Pid, Signal)>,
}

impl Observer for Recorder {
    fn syscall_entry(&mut self, tcb: &mut Tcb, entry: &EntrySnapshot, active: &ActivePersonality) {
        let name = active.personality().syscall(entry.scno).name().into_owned();
        self.entries.push((tcb.pid(), name));
    }

    fn syscall_exit(&mut self, tcb: &mut Tcb, exit: &ExitSnapshot, active: &ActivePersonality) {
        let name = active.personality().syscall(tcb.scno).name().into_owned();
        self.exits.push((tcb.pid(), name, exit.outcome));
    }

    fn syscall_unavailable(&mut self, tcb: &Tcb) {
        let name = tcb_syscall_name(tcb);
        self.unavailable.push((tcb.pid(), name));
    }

    fn signal(&mut self, tcb: &Tcb, signal: Signal, group: bool) {
        self.signals.push((tcb.pid(), signal, group));
    }

    fn exec(&mut self, tcb: &Tcb, old: Pid) {
        self.execs.push((tcb.pid(), old));
    }

    fn attached(&mut self, tcb: &Tcb) {
        self.attached.push(tcb.pid());
    }

    fn exited(&mut self, pid: Pid, exit_code: i32) {
        self.exited.push((pid, exit_code));
    }

    fn signaled(&mut self, pid: Pid, signal: Signal, _core_dumped: bool) {
        self.signaled.push((pid, signal));
    }
}

fn tcb_syscall_name(tcb: &Tcb) -> String {
    let arch = sysvise::Arch::host().expect("unsupported host");
    arch.personalities()[tcb.personality].syscall(tcb.scno).name().into_owned()
}

/// Normalizes a report trace by substituting each concrete raw PID value with one that
/// matches its ordinal of appearance in the trace.
#[derive(Default)]
struct Normalizer {
    map: HashMap<Pid, Pid>,
}

impl Normalizer {
    pub fn normalize(trace: &[Report]) -> Vec<Report> {
        Normalizer::default().normalize_trace(trace)
    }

    fn normalize_trace(&mut self, trace: &[Report]) -> Vec<Report> {
        trace.iter().map(|report| self.normalize_report(report)).collect()
    }

    fn normalize_report(&mut self, report: &Report) -> Report {
        let pid = self.normalize_pid(report.pid);
        let event = self.normalize_event(report.event);
        Report { pid, event }
    }

    fn normalize_event(&mut self, event: Event) -> Event {
        match event {
            Event::Clone { new } => Event::Clone { new: self.normalize_pid(new) },
            Event::Fork { new } => Event::Fork { new: self.normalize_pid(new) },
            Event::Vfork { new } => Event::Vfork { new: self.normalize_pid(new) },
            Event::VforkDone { new } => Event::VforkDone { new: self.normalize_pid(new) },
            Event::Exec { old } => Event::Exec { old: self.normalize_pid(old) },
            // Core dumps depend on the environment's resource limits.
            Event::Signaled { signal, .. } => Event::Signaled { signal, core_dumped: false },
            Event::Exiting(sysvise::ExitType::Signaled(signal, _)) => {
                Event::Exiting(sysvise::ExitType::Signaled(signal, false))
            },
            event => event,
        }
    }

    fn normalize_pid(&mut self, pid: Pid) -> Pid {
        // Avoid borrowck error in `default` fn.
        let next_free = self.map.len();

        let entry = self.map.entry(pid).or_insert_with(|| {
            let raw: i32 = next_free.try_into().expect("exhausted free test PIDs");
            Pid::from_raw(raw)
        });

        *entry
    }
}
