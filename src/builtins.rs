use std::env;
use std::path::PathBuf;

use crate::parser::Builtin;
use crate::runtime::Runtime;

/// What the main loop should do after a built-in runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue,
    /// `exit` ran: background jobs have been signaled, stop the loop.
    Exit,
}

/// Run a built-in entirely inside the interpreter process.
///
/// Built-ins never fork, never redirect, and never modify the last
/// foreground status; a failed `cd` is reported and otherwise ignored.
pub fn dispatch(builtin: &Builtin, runtime: &mut Runtime) -> BuiltinOutcome {
    match builtin {
        Builtin::Cd { target } => {
            builtin_cd(target.as_deref());
            BuiltinOutcome::Continue
        }
        Builtin::Status => {
            println!("{}", runtime.last_status());
            BuiltinOutcome::Continue
        }
        Builtin::Exit => {
            runtime.jobs().terminate_all();
            BuiltinOutcome::Exit
        }
    }
}

/// `cd` with no argument goes home; with an argument, to that path,
/// relative or absolute. Arguments past the first are ignored.
fn builtin_cd(target: Option<&str>) {
    let dir = match target {
        Some(path) => PathBuf::from(path),
        None => match home_dir() {
            Some(home) => home,
            None => {
                eprintln!("cd: HOME is not set");
                return;
            }
        },
    };

    if let Err(err) = env::set_current_dir(&dir) {
        eprintln!("cd: {}: {}", dir.display(), err);
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from).or_else(dirs::home_dir)
}
