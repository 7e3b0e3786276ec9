//! CLI-specific error types and mappings.
//!
//! This module provides the error type for the CLI adapter and the mapping
//! from [`SupervisorError`] to exit codes and user-facing messages.

use srvctl_core::SupervisorError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error, such as a non-numeric `--delay`.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (PID file or log file unreadable, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
        }
    }
}

impl From<SupervisorError> for CliError {
    fn from(err: SupervisorError) -> Self {
        match err {
            SupervisorError::Config(config_err) => Self::Config(config_err.to_string()),
            SupervisorError::Process(proc_err) => Self::Process(proc_err.to_string()),
            err @ (SupervisorError::PidFile { .. } | SupervisorError::LogFile { .. }) => {
                Self::Io(err.to_string())
            }
        }
    }
}

impl From<clap::Error> for CliError {
    /// Keeps the first line of clap's message, without its `error:` prefix.
    fn from(err: clap::Error) -> Self {
        let rendered = err.render().to_string();
        let summary = rendered.lines().next().unwrap_or_default();
        Self::Arguments(summary.trim_start_matches("error: ").to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
