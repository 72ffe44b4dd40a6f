use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::error::ShellError;
use crate::parser::{ExternalCommand, Redirection};
use crate::runtime::Runtime;
use crate::status::ExitStatus;

/// Where an unredirected background stream goes, so background children
/// never compete with the interpreter for the terminal.
const NULL_DEVICE: &str = "/dev/null";

/// Run an external command in the foreground: spawn one child, block
/// until that child terminates, and record its outcome as the last
/// foreground status.
///
/// Redirection and exec failures are contained: they are reported on
/// stderr and recorded as `exit value 1`, exactly as if the child had
/// exited 1. A child killed by a signal gets its notice printed here,
/// immediately, not deferred to the next `status`.
///
/// The only `Err` out of this function is fatal spawn resource
/// exhaustion.
pub fn run_foreground(command: &ExternalCommand, runtime: &mut Runtime) -> Result<(), ShellError> {
    let mut child = match spawn(command, false) {
        Ok(child) => child,
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => {
            eprintln!("{}", err);
            runtime.set_last_status(ExitStatus::Exited(1));
            return Ok(());
        }
    };

    // Child::wait retries on EINTR, so a SIGTSTP toggle delivered while
    // blocked here does not abandon the wait.
    let status = match child.wait() {
        Ok(wait_status) => ExitStatus::from_wait(wait_status),
        Err(err) => {
            eprintln!("{}: {}", command.argv[0], err);
            ExitStatus::Exited(1)
        }
    };

    if let ExitStatus::Signaled(_) = status {
        println!("{}", status);
    }
    runtime.set_last_status(status);
    Ok(())
}

/// Launch an external command in the background: spawn without blocking,
/// register the child with the job manager, and print the launch notice.
///
/// A contained failure is reported and no job is created; background
/// commands never touch the last foreground status.
pub fn run_background(command: &ExternalCommand, runtime: &mut Runtime) -> Result<(), ShellError> {
    let child = match spawn(command, true) {
        Ok(child) => child,
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => {
            eprintln!("{}", err);
            return Ok(());
        }
    };

    let pid = runtime.jobs().add(child, command.argv.join(" "));
    println!("background pid is {}", pid);
    Ok(())
}

/// Spawn one child with its streams and signal dispositions set up.
///
/// Files named by the redirection request are opened here and handed to the
/// child as stdio; descriptor duplication happens inside the platform
/// spawn. In the child, between fork and exec, the foreground case
/// restores the default SIGINT disposition (the interpreter ignores it)
/// and every child ignores SIGTSTP, which is an interpreter-only toggle.
fn spawn(command: &ExternalCommand, background: bool) -> Result<Child, ShellError> {
    let program = &command.argv[0];

    let mut cmd = Command::new(program);
    cmd.args(&command.argv[1..]);
    cmd.stdin(input_stream(&command.redirection, background)?);
    cmd.stdout(output_stream(&command.redirection, background)?);

    unsafe {
        cmd.pre_exec(move || {
            // Only async-signal-safe calls are allowed here.
            if !background {
                libc::signal(libc::SIGINT, libc::SIG_DFL);
            }
            libc::signal(libc::SIGTSTP, libc::SIG_IGN);
            Ok(())
        });
    }

    cmd.spawn().map_err(|err| match err.kind() {
        ErrorKind::OutOfMemory | ErrorKind::WouldBlock => ShellError::SpawnResources(err),
        _ => ShellError::Exec {
            command: program.clone(),
            source: err,
        },
    })
}

fn input_stream(redirection: &Redirection, background: bool) -> Result<Stdio, ShellError> {
    let path = match (&redirection.stdin, background) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(NULL_DEVICE),
        (None, false) => return Ok(Stdio::inherit()),
    };

    let file = File::open(&path).map_err(|source| ShellError::InputRedirect { path, source })?;
    Ok(Stdio::from(file))
}

fn output_stream(redirection: &Redirection, background: bool) -> Result<Stdio, ShellError> {
    let path = match (&redirection.stdout, background) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(NULL_DEVICE),
        (None, false) => return Ok(Stdio::inherit()),
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .map_err(|source| ShellError::OutputRedirect { path, source })?;
    Ok(Stdio::from(file))
}
