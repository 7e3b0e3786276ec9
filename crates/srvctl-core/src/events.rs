//! Progress reported while a lifecycle operation is still running.

use crate::outcome::StopOutcome;

/// A step of `start`, `stop` or `restart`, emitted as it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The PID file was claimed and the server is about to be spawned.
    Starting,
    /// About to send SIGTERM. `pid` is `None` for an unreadable PID file.
    Stopping { pid: Option<u32> },
    /// The process outlived the stop timeout; SIGKILL is next.
    ForcingShutdown { pid: u32 },
    /// The stop half finished; a restart now waits before starting.
    Stopped(StopOutcome),
}
