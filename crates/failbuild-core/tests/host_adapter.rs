//! Result step behaviour against a host build.

use failbuild_core::{policy_options, BuildHost, Configuration, Policy, ResultStep, StatusCode};

/// Host that records every call made by the step.
#[derive(Default)]
struct RecordingHost {
    ordinal: i64,
    status: Option<StatusCode>,
    set_calls: Vec<StatusCode>,
    lines: Vec<String>,
}

impl BuildHost for RecordingHost {
    fn ordinal(&self) -> i64 {
        self.ordinal
    }

    fn current_status(&self) -> Option<StatusCode> {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.set_calls.push(status);
        self.status = Some(status);
    }

    fn console(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

fn host(ordinal: i64, status: Option<StatusCode>) -> RecordingHost {
    RecordingHost {
        ordinal,
        status,
        ..Default::default()
    }
}

#[test]
fn fresh_build_gets_target() {
    let step = ResultStep::new(Configuration::new("FAILURE").with_unstable("2"));
    let mut build = host(2, None);
    assert!(step.perform(&mut build).unwrap());
    assert_eq!(build.set_calls, vec![StatusCode::Unstable]);
    assert_eq!(build.lines, vec!["Setting build result to Unstable"]);
}

#[test]
fn better_build_is_downgraded() {
    let step = ResultStep::new(Configuration::new("ABORTED"));
    let mut build = host(1, Some(StatusCode::Success));
    assert!(!step.perform(&mut build).unwrap());
    assert_eq!(build.status, Some(StatusCode::Aborted));
    assert_eq!(build.lines, vec!["Setting build result to Aborted"]);
}

#[test]
fn worse_build_is_not_touched() {
    let step = ResultStep::new(Configuration::new("UNSTABLE"));
    let mut build = host(1, Some(StatusCode::Aborted));
    assert!(!step.perform(&mut build).unwrap());
    assert!(build.set_calls.is_empty());
    assert_eq!(
        build.lines,
        vec!["Build result is already Aborted, which is worse than Unstable; keeping it"]
    );
}

#[test]
fn equal_severity_is_not_touched() {
    let step = ResultStep::new(Configuration::new("CYCLE"));
    let mut build = host(4, Some(StatusCode::Failure));
    assert!(!step.perform(&mut build).unwrap());
    assert!(build.set_calls.is_empty());
    assert_eq!(build.status, Some(StatusCode::Failure));
    assert_eq!(build.lines, vec!["Build result is already Aborted"]);
}

#[test]
fn step_reuses_index_across_builds() {
    let step = ResultStep::new(Configuration::new("SUCCESS").with_failure("2"));
    for n in 1..=3 {
        let mut build = host(n, None);
        step.perform(&mut build).unwrap();
    }
    assert!(step.engine().is_index_built());
}

#[test]
fn option_list_and_field_titles() {
    let options = policy_options();
    assert_eq!(options.len(), 5);
    assert_eq!(options[2].display_name, "Failed");
    assert_eq!(options[4].value, "CYCLE");

    let titles: Vec<&str> = Policy::FIXED.iter().map(Policy::display_name).collect();
    assert_eq!(titles, vec!["Success", "Unstable", "Failed", "Aborted"]);
}
