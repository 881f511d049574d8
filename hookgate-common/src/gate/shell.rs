//! Shell gate execution with a hard timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Exit code reported when a command exceeds its timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when a command could not be started or was killed by
/// a signal.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// What a shell gate produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    /// Process exit code, or one of the synthetic codes above.
    pub exit_code: i32,
    /// Standard output followed by standard error.
    pub output: String,
}

impl ShellOutput {
    /// Whether the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

enum CommandRunError {
    SpawnFailed(std::io::Error),
    TimedOut,
}

/// Run `command` with `sh -c` in `cwd`.
///
/// Never fails: spawn errors and timeouts become a non-zero [`ShellOutput`].
/// A timed-out process is killed.
pub async fn run_shell(command: &str, cwd: &Path, timeout: Duration) -> ShellOutput {
    tracing::debug!(command = %command, cwd = %cwd.display(), "Running shell gate");

    match run_command(command, cwd, timeout).await {
        Ok(output) => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            let exit_code = match output.status.code() {
                Some(code) => code,
                None => FAILURE_EXIT_CODE,
            };
            tracing::debug!(command = %command, exit_code, "Shell gate finished");
            ShellOutput {
                exit_code,
                output: combined,
            }
        }
        Err(CommandRunError::SpawnFailed(e)) => {
            tracing::warn!(command = %command, error = %e, "Shell gate failed to execute");
            ShellOutput {
                exit_code: FAILURE_EXIT_CODE,
                output: e.to_string(),
            }
        }
        Err(CommandRunError::TimedOut) => {
            tracing::warn!(command = %command, "Shell gate timed out");
            ShellOutput {
                exit_code: TIMEOUT_EXIT_CODE,
                output: format!("Command timed out after {}ms", timeout.as_millis()),
            }
        }
    }
}

async fn run_command(
    command: &str,
    cwd: &Path,
    timeout: Duration,
) -> Result<std::process::Output, CommandRunError> {
    let result = tokio::time::timeout(timeout, async {
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?
            .wait_with_output()
            .await
    })
    .await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(CommandRunError::SpawnFailed(e)),
        Err(_) => Err(CommandRunError::TimedOut),
    }
}
