//! Error types for the supervisor domain.
//!
//! Adapters map these to their own presentation (the CLI maps them to
//! exit codes). "Already running" and friends are not errors; see
//! [`crate::outcome`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid supervisor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application name is empty.
    #[error("Application name cannot be empty")]
    EmptyAppName,

    /// The application name would escape the working directory.
    #[error("Invalid application name {0:?}: must not contain path separators")]
    InvalidAppName(String),

    /// No program to launch.
    #[error("Entry point program cannot be empty")]
    EmptyProgram,

    /// The working directory does not exist or is not a directory.
    #[error("Working directory {0} does not exist")]
    WorkDirNotFound(PathBuf),
}

/// Errors raised by [`crate::ProcessControl`] implementations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The entry point could not be launched.
    #[error("Failed to spawn {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    /// No process with this PID exists.
    #[error("No such process: {0}")]
    NoSuchProcess(u32),

    /// The process exists but belongs to someone else.
    #[error("Permission denied signalling process {0}")]
    PermissionDenied(u32),

    /// Signal delivery failed for another reason.
    #[error("Failed to send {signal} to process {pid}: {reason}")]
    SignalFailed {
        pid: u32,
        signal: String,
        reason: String,
    },

    /// Process did not exit after being killed.
    #[error("Process {0} did not exit after SIGKILL")]
    DidNotExit(u32),

    /// Operation not available on this platform.
    #[error("Unsupported on this platform: {0}")]
    Unsupported(&'static str),
}

/// Errors returned by supervisor operations.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A process operation failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Reading or writing the PID file failed.
    #[error("PID file {path}: {source}")]
    PidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the log file failed.
    #[error("Log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SupervisorError {
    /// Wrap an I/O error on the PID file.
    pub fn pid_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PidFile {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error on the log file.
    pub fn log_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogFile {
            path: path.into(),
            source,
        }
    }
}
