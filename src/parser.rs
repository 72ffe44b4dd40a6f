use std::path::PathBuf;

use crate::error::ShellError;

/// What a line turned out to be after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Blank line, or a line that stripped down to nothing.
    Empty,
    /// A command the interpreter runs without forking.
    Builtin(Builtin),
    /// An external program to spawn.
    External(ExternalCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Cd { target: Option<String> },
    Status,
    Exit,
}

/// Input/output files extracted from the argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Redirection {
    pub stdin: Option<PathBuf>,
    pub stdout: Option<PathBuf>,
}

impl Redirection {
    pub fn is_empty(&self) -> bool {
        self.stdin.is_none() && self.stdout.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    /// Program name followed by its arguments, redirection tokens and the
    /// trailing `&` already stripped.
    pub argv: Vec<String>,
    pub redirection: Redirection,
    pub background: bool,
}

/// True when the raw, pre-expansion line is a comment.
///
/// Only a first-column `#` comments a line; the marker is checked before
/// expansion so a comment never touches any interpreter state.
pub fn is_comment(raw_line: &str) -> bool {
    raw_line.starts_with('#')
}

/// Classify a token vector into a dispatchable command.
///
/// Built-ins are recognized first, by their leading token. For everything
/// else, redirection stripping and the background decision are two
/// separate passes: `<`/`>` consume the following token as a path wherever
/// they appear, and `&` is an operator only when it is the final remaining
/// token. Under foreground-only mode the trailing `&` is still consumed
/// but the command runs in the foreground.
pub fn classify(tokens: Vec<String>, foreground_only: bool) -> Result<CommandLine, ShellError> {
    if tokens.is_empty() {
        return Ok(CommandLine::Empty);
    }

    match tokens[0].as_str() {
        "cd" => {
            return Ok(CommandLine::Builtin(Builtin::Cd {
                target: tokens.get(1).cloned(),
            }))
        }
        "status" => return Ok(CommandLine::Builtin(Builtin::Status)),
        "exit" => return Ok(CommandLine::Builtin(Builtin::Exit)),
        _ => {}
    }

    let (mut argv, redirection) = strip_redirections(tokens)?;

    let mut background = false;
    if argv.last().map(String::as_str) == Some("&") {
        argv.pop();
        background = !foreground_only;
    }

    if argv.is_empty() {
        return Ok(CommandLine::Empty);
    }

    Ok(CommandLine::External(ExternalCommand {
        argv,
        redirection,
        background,
    }))
}

/// Remove `<`/`>` operator pairs from the token stream, recording the
/// paths they name. When an operator repeats, the last occurrence wins.
fn strip_redirections(tokens: Vec<String>) -> Result<(Vec<String>, Redirection), ShellError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut redirection = Redirection::default();

    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        match token.as_str() {
            "<" => {
                let path = tokens
                    .next()
                    .ok_or(ShellError::MalformedRedirection { op: '<' })?;
                redirection.stdin = Some(PathBuf::from(path));
            }
            ">" => {
                let path = tokens
                    .next()
                    .ok_or(ShellError::MalformedRedirection { op: '>' })?;
                redirection.stdout = Some(PathBuf::from(path));
            }
            _ => argv.push(token),
        }
    }

    Ok((argv, redirection))
}
