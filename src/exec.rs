//! Shell command execution with pass-through output.
//!
//! Every external interaction in this crate goes through a single shell
//! string (`sh -c` on Unix, `cmd /C` on Windows) because the storage CLI
//! commands rely on the remote glob (`gs://bucket/*.pdf`) reaching the tool
//! unexpanded while still being written the way an operator would type them.
//!
//! Output handling is deliberately minimal: both stdout and stderr are
//! streamed to the console line-by-line as the child produces them. Nothing
//! is captured, parsed, or retried; the only result is the exit status.

use crate::error::SyncError;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, trace};

/// A single shell command with an optional console banner.
///
/// # Example
/// ```rust,no_run
/// use marker_sync::exec::ShellCommand;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), marker_sync::SyncError> {
/// ShellCommand::new("gcloud storage ls gs://corpus")
///     .banner("Listing bucket")
///     .run()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShellCommand {
    script: String,
    banner: Option<String>,
}

impl ShellCommand {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            banner: None,
        }
    }

    /// Print `=== <text> ===` before the command runs.
    pub fn banner(mut self, text: impl Into<String>) -> Self {
        self.banner = Some(text.into());
        self
    }

    /// The shell string this command will execute.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Run the command, streaming its output, and fail on non-zero exit.
    pub async fn run(&self) -> Result<(), SyncError> {
        if let Some(ref banner) = self.banner {
            println!("\n=== {banner} ===");
        }

        #[cfg(not(target_family = "windows"))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.script);
            cmd
        };
        #[cfg(target_family = "windows")]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.script);
            cmd
        };

        trace!(script = %self.script, "spawn");
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SyncError::Spawn {
                command: self.script.clone(),
                source: e,
            })?;

        // Drain both streams concurrently so neither pipe fills up and
        // stalls the child.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (out, err) = tokio::join!(pump(stdout), pump(stderr));
        out.map_err(|e| self.output_read(e))?;
        err.map_err(|e| self.output_read(e))?;

        let status = child.wait().await.map_err(|e| SyncError::Spawn {
            command: self.script.clone(),
            source: e,
        })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => {
                debug!(code, script = %self.script, "exit non-zero");
                Err(SyncError::CommandFailed {
                    command: self.script.clone(),
                    code,
                })
            }
            None => Err(SyncError::Terminated {
                command: self.script.clone(),
            }),
        }
    }

    fn output_read(&self, source: std::io::Error) -> SyncError {
        SyncError::OutputRead {
            command: self.script.clone(),
            source,
        }
    }
}

/// Print each line of `reader` to the console as it arrives.
async fn pump<R>(reader: Option<R>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(());
    };
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        println!("{line}");
    }
    Ok(())
}
