//! Small value types shared by every layer.

use std::fmt;

/// Result of probing the OS process table for a PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// A process with this PID exists and has not exited.
    Alive,
    /// No such process, or it has exited and only awaits reaping.
    Dead,
    /// The process exists but we may not signal it, so its ownership is unknown.
    Unknown,
}

impl Liveness {
    /// Whether the probe positively confirmed the process is gone.
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Signals the supervisor knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// Graceful termination request (SIGTERM).
    Terminate,
    /// Forced kill (SIGKILL), only used after a stop timeout.
    Kill,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminate => f.write_str("SIGTERM"),
            Self::Kill => f.write_str("SIGKILL"),
        }
    }
}
