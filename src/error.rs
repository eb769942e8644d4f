//! Error types for the marker-sync library.
//!
//! Two failure kinds matter to callers, and the variants split along that
//! line:
//!
//! * [`SyncError::CommandFailed`] — an external command ran to completion
//!   but exited non-zero. The exit code is preserved so the CLI can report
//!   it verbatim.
//!
//! * Everything else — the command never produced an exit code (killed by a
//!   signal, failed to spawn) or the failure happened inside this process
//!   (directory creation, scanning, bad configuration). These carry a
//!   human-readable message instead of a code.
//!
//! There is no retry or partial-success tracking: the pipeline stops at the
//! first error and the binary exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the marker-sync library.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An external command exited with a non-zero status.
    #[error("command exited with code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    /// An external command was killed by a signal before producing an
    /// exit code.
    #[error("command terminated by a signal: {command}")]
    Terminated { command: String },

    /// The command could not be started at all.
    #[error("failed to spawn '{command}': {source}\nCheck that the tool is installed and on PATH.")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a child process's stdout/stderr stream failed mid-run.
    #[error("failed to read output of '{command}': {source}")]
    OutputRead {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A local filesystem operation failed (directory creation, scanning).
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// The child's exit code, when this error is [`SyncError::CommandFailed`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SyncError::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display_includes_code() {
        let e = SyncError::CommandFailed {
            command: "gcloud storage cp -n gs://in/*.pdf input_pdfs/".into(),
            code: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("code 2"), "got: {msg}");
        assert!(msg.contains("gcloud storage cp"));
    }

    #[test]
    fn exit_code_only_for_command_failed() {
        let failed = SyncError::CommandFailed {
            command: "marker input_pdfs".into(),
            code: 137,
        };
        assert_eq!(failed.exit_code(), Some(137));

        let other = SyncError::InvalidConfig("empty bucket".into());
        assert_eq!(other.exit_code(), None);
    }

    #[test]
    fn spawn_display_mentions_path_hint() {
        let e = SyncError::Spawn {
            command: "marker input_pdfs".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(e.to_string().contains("PATH"));
    }
}
