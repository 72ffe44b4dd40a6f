use crate::jobs::JobManager;
use crate::status::ExitStatus;

/// Single-owner interpreter state, passed by reference through the
/// dispatch chain.
///
/// Holds the last foreground status and the background job records;
/// nothing else in the interpreter keeps state between cycles.
pub struct Runtime {
    last_status: ExitStatus,
    jobs: JobManager,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            last_status: ExitStatus::default(),
            jobs: JobManager::new(),
        }
    }

    pub fn last_status(&self) -> ExitStatus {
        self.last_status
    }

    /// Record a foreground outcome. Only the foreground executor calls
    /// this.
    pub fn set_last_status(&mut self, status: ExitStatus) {
        self.last_status = status;
    }

    pub fn jobs(&self) -> &JobManager {
        &self.jobs
    }

    /// Sweep finished background jobs and print their completion notices.
    /// Runs once per cycle, before the prompt.
    pub fn report_finished_jobs(&mut self) {
        for job in self.jobs.reap_finished() {
            println!("background pid {} is done: {}", job.pid, job.status);
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
