// Background job lifecycle: spawn without blocking, non-blocking reap
// sweeps, signal decoding, and the `exit` cleanup path.

use minish::executor::{run_background, run_foreground};
use minish::jobs::{FinishedJob, JobManager};
use minish::parser::{ExternalCommand, Redirection};
use minish::runtime::Runtime;
use minish::status::ExitStatus;
use std::thread;
use std::time::{Duration, Instant};

fn command(argv: &[&str], background: bool) -> ExternalCommand {
    ExternalCommand {
        argv: argv.iter().map(|s| s.to_string()).collect(),
        redirection: Redirection::default(),
        background,
    }
}

fn reap_until(jobs: &JobManager, count: usize) -> Vec<FinishedJob> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut finished = Vec::new();
    while finished.len() < count && Instant::now() < deadline {
        finished.extend(jobs.reap_finished());
        thread::sleep(Duration::from_millis(20));
    }
    finished
}

#[test]
fn test_background_launch_returns_before_the_child_exits() {
    let mut runtime = Runtime::new();
    let launched = Instant::now();

    run_background(&command(&["sleep", "5"], true), &mut runtime).unwrap();

    assert!(
        launched.elapsed() < Duration::from_secs(5),
        "background launch must not wait for the child"
    );
    assert_eq!(runtime.jobs().len(), 1);

    runtime.jobs().terminate_all();
    reap_until(runtime.jobs(), 1);
}

#[test]
fn test_completed_background_job_is_reported_with_exit_value() {
    let mut runtime = Runtime::new();
    run_background(&command(&["sleep", "0"], true), &mut runtime).unwrap();
    let pid = runtime.jobs().pids()[0];

    let finished = reap_until(runtime.jobs(), 1);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].pid, pid);
    assert_eq!(finished[0].status, ExitStatus::Exited(0));
    assert!(runtime.jobs().is_empty());
}

#[test]
fn test_killed_background_job_is_reported_with_its_signal() {
    let mut runtime = Runtime::new();
    run_background(&command(&["sleep", "600"], true), &mut runtime).unwrap();

    runtime.jobs().terminate_all();
    let finished = reap_until(runtime.jobs(), 1);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].status, ExitStatus::Signaled(15));
    assert_eq!(
        finished[0].status.to_string(),
        "terminated by signal 15"
    );
}

#[test]
fn test_background_outcome_never_touches_the_foreground_status() {
    let mut runtime = Runtime::new();
    run_foreground(&command(&["sh", "-c", "exit 4"], false), &mut runtime).unwrap();
    assert_eq!(runtime.last_status(), ExitStatus::Exited(4));

    // A background failure and its reap happen in between; the record
    // the `status` built-in reads must be untouched.
    run_background(&command(&["sh", "-c", "exit 9"], true), &mut runtime).unwrap();
    reap_until(runtime.jobs(), 1);

    assert_eq!(runtime.last_status(), ExitStatus::Exited(4));
}

#[test]
fn test_multiple_jobs_reap_in_completion_order() {
    let mut runtime = Runtime::new();
    run_background(&command(&["sleep", "600"], true), &mut runtime).unwrap();
    run_background(&command(&["sleep", "0"], true), &mut runtime).unwrap();
    let pids = runtime.jobs().pids();

    let finished = reap_until(runtime.jobs(), 1);
    assert_eq!(finished.len(), 1, "only the quick job should have finished");
    assert_eq!(finished[0].pid, pids[1]);
    assert_eq!(runtime.jobs().len(), 1);

    runtime.jobs().terminate_all();
    reap_until(runtime.jobs(), 1);
}

#[test]
fn test_command_string_is_kept_for_the_record() {
    let mut runtime = Runtime::new();
    run_background(&command(&["sleep", "0"], true), &mut runtime).unwrap();

    let finished = reap_until(runtime.jobs(), 1);
    assert_eq!(finished[0].command, "sleep 0");
}
