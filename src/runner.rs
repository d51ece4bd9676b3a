use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::filter::normalize_newlines;

/// Everything captured from a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// `stdout` followed by `stderr`.
    pub combined: String,
}

/// Extract an exit code from a process status, mapping signals to 128+N on Unix.
fn exit_code_from_status(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .unwrap_or_else(|| status.signal().map_or(1, |s| 128 + s))
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}

/// Run `program` with `args` and block until it exits.
///
/// Stdout and stderr are captured rather than inherited; stdin is shared with
/// the wrapper. A non-zero exit is not an error; it is reported through
/// `exit_code`. Arguments are handed to the OS as-is, even when they are not
/// valid UTF-8. Captured text has `\r\n` and lone `\r` turned into `\n`, so
/// carriage-return progress frames become separate lines.
///
/// # Errors
///
/// Returns the spawn/wait `std::io::Error` (wrapped in `anyhow`) when the
/// process cannot be started, e.g. `ErrorKind::NotFound` when `program` is not
/// on `PATH`.
pub fn execute<S: AsRef<OsStr>>(program: &str, args: &[S]) -> anyhow::Result<CommandResult> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    let stdout = normalize_newlines(&String::from_utf8_lossy(&output.stdout));
    let stderr = normalize_newlines(&String::from_utf8_lossy(&output.stderr));
    let combined = format!("{stdout}{stderr}");

    Ok(CommandResult {
        stdout,
        stderr,
        exit_code: exit_code_from_status(output.status),
        combined,
    })
}

/// True when `err` came from the OS reporting that the executable does not exist.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}
