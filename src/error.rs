use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the interpreter's parse and spawn layers.
///
/// Everything here is contained to the command that raised it, with one
/// exception: a spawn that fails for lack of process resources is fatal,
/// since the interpreter cannot do its job without the ability to create
/// children. `is_fatal` makes that distinction for the main loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input line exceeds {max} characters")]
    LineTooLong { max: usize },

    #[error("too many arguments (limit is {max})")]
    TooManyArgs { max: usize },

    #[error("redirection operator `{op}` is missing a file name")]
    MalformedRedirection { op: char },

    #[error("cannot open {} for input: {source}", path.display())]
    InputRedirect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {} for output: {source}", path.display())]
    OutputRedirect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{command}: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot spawn a new process: {0}")]
    SpawnResources(#[source] std::io::Error),
}

impl ShellError {
    /// True when the interpreter cannot safely continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::SpawnResources(_))
    }
}
