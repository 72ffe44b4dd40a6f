use chrono::{DateTime, Local};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::process::Child;
use std::sync::{Arc, Mutex};

use crate::status::ExitStatus;

/// One live background child.
#[derive(Debug)]
pub struct Job {
    pub pid: u32,
    pub command: String,
    pub started: DateTime<Local>,
    child: Child,
}

/// A background job that has terminated and is ready to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedJob {
    pub pid: u32,
    pub command: String,
    pub status: ExitStatus,
}

/// Tracks background children until they are reaped and reported.
///
/// The record set is shared behind a mutex in case a handle is ever held
/// across threads, but all mutation happens from the interpreter's main
/// cycle: jobs are added at spawn time and removed by the per-prompt
/// sweep. Background outcomes never feed into the last foreground status.
#[derive(Clone, Default)]
pub struct JobManager {
    jobs: Arc<Mutex<Vec<Job>>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a freshly spawned background child. Returns its pid.
    pub fn add(&self, child: Child, command: String) -> u32 {
        let pid = child.id();
        let mut jobs = self.jobs.lock().unwrap();
        jobs.push(Job {
            pid,
            command,
            started: Local::now(),
            child,
        });
        pid
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pids of all live records, in launch order.
    pub fn pids(&self) -> Vec<u32> {
        self.jobs.lock().unwrap().iter().map(|job| job.pid).collect()
    }

    /// Non-blocking sweep of every live record.
    ///
    /// Children that have terminated since the last sweep are removed and
    /// returned for reporting; the rest stay registered. A record whose
    /// child can no longer be queried is dropped without a report.
    pub fn reap_finished(&self) -> Vec<FinishedJob> {
        let mut jobs = self.jobs.lock().unwrap();
        let mut finished = Vec::new();

        let mut index = 0;
        while index < jobs.len() {
            match jobs[index].child.try_wait() {
                Ok(Some(wait_status)) => {
                    let job = jobs.remove(index);
                    finished.push(FinishedJob {
                        pid: job.pid,
                        command: job.command,
                        status: ExitStatus::from_wait(wait_status),
                    });
                }
                Ok(None) => index += 1,
                Err(_) => {
                    jobs.remove(index);
                }
            }
        }

        finished
    }

    /// Best-effort SIGTERM to every live job. Used by `exit`; does not
    /// wait for the children to die.
    pub fn terminate_all(&self) {
        let jobs = self.jobs.lock().unwrap();
        for job in jobs.iter() {
            let _ = kill(Pid::from_raw(job.pid as i32), Signal::SIGTERM);
        }
    }
}
