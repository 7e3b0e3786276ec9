//! What each lifecycle operation reports back.
//!
//! Outcomes cover every expected branch, including the precondition
//! failures ("already running", "not running"). Adapters decide how to
//! print them and which exit code to use.

use std::path::PathBuf;

/// Result of `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The server was spawned and its PID recorded.
    Started { pid: u32, log_file: PathBuf },
    /// A PID file already exists; nothing was spawned.
    ///
    /// `pid` is `None` when the existing file could not be parsed.
    AlreadyRunning { pid: Option<u32> },
    /// The child died within the startup grace period; its PID file was removed.
    ExitedEarly { pid: u32, log_file: PathBuf },
}

impl StartOutcome {
    /// Whether the server is running as a result of this call.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Result of `stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No PID file was present.
    NotRunning,
    /// The PID file was removed after signalling.
    ///
    /// `pid` is `None` if the file held no valid PID, in which case nothing
    /// was signalled. `forced` is true when SIGKILL had to be sent.
    Stopped { pid: Option<u32>, forced: bool },
}

impl StopOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }
}

/// Result of `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    /// No PID file.
    NotRunning,
    /// The recorded process is alive.
    Running { pid: u32 },
    /// The recorded process is gone; the PID file was removed.
    Stale { pid: u32 },
    /// The PID file held no valid PID; it was removed.
    InvalidPidFile,
    /// The process exists but could not be probed (permission denied).
    Unknown { pid: u32 },
}

/// Result of `restart`: both halves, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartOutcome {
    pub stop: StopOutcome,
    pub start: StartOutcome,
}

impl RestartOutcome {
    /// A restart succeeds if and only if its start did.
    pub const fn is_success(&self) -> bool {
        self.start.is_success()
    }
}
