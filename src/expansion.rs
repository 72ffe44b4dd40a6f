use crate::error::ShellError;

/// Maximum length of a command line after expansion, in bytes.
pub const MAX_LINE_LEN: usize = 2048;

/// Marker rewritten to the interpreter's process id during expansion.
const PID_MARKER: &str = "$$";

/// Expand every `$$` in `line` to the decimal form of `pid`.
///
/// Matches are found left to right and never overlap, so `$$$` expands the
/// first two characters and leaves the trailing `$` alone. The result is
/// built into a fresh buffer rather than shifted in place, and a line that
/// ends up longer than [`MAX_LINE_LEN`] is rejected.
///
/// The pid is a parameter so the transform stays a pure function; the
/// interpreter passes its own `process::id()`.
pub fn expand_pid_marker(line: &str, pid: u32) -> Result<String, ShellError> {
    let pid_digits = pid.to_string();

    let mut expanded = String::with_capacity(line.len() + pid_digits.len());
    let mut rest = line;
    while let Some(at) = rest.find(PID_MARKER) {
        expanded.push_str(&rest[..at]);
        expanded.push_str(&pid_digits);
        rest = &rest[at + PID_MARKER.len()..];
    }
    expanded.push_str(rest);

    if expanded.len() > MAX_LINE_LEN {
        return Err(ShellError::LineTooLong { max: MAX_LINE_LEN });
    }
    Ok(expanded)
}
