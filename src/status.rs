use std::fmt;
use std::os::unix::process::ExitStatusExt;

/// Outcome of the most recent foreground command.
///
/// Written only by the foreground executor. Built-ins and background
/// children never touch it, so `status` always reflects the last external
/// command the interpreter actually waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal termination with an exit code.
    Exited(i32),
    /// Termination by an uncaught signal.
    Signaled(i32),
}

impl ExitStatus {
    /// Decode a wait status from the platform into the exit/signal split.
    pub fn from_wait(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitStatus::Exited(code),
            None => ExitStatus::Signaled(status.signal().unwrap_or(0)),
        }
    }
}

impl Default for ExitStatus {
    // A fresh interpreter reports `exit value 0` before any foreground
    // command has run.
    fn default() -> Self {
        ExitStatus::Exited(0)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exit value {}", code),
            ExitStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}
