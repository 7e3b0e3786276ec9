//! Ports used by the supervisor.
//!
//! [`ProcessControl`] is the only way the supervisor touches OS processes.
//! The runtime crate provides the real implementation; tests substitute a
//! mock. [`LifecycleObserver`] receives progress while an operation runs.

use std::path::Path;

use crate::config::LaunchSpec;
use crate::domain::{Liveness, StopSignal};
use crate::error::ProcessError;
use crate::events::LifecycleEvent;

/// Spawn, probe and signal processes by PID.
///
/// # Design Rules
///
/// - The supervisor never owns a child handle: spawning returns a PID only
/// - Probing never fails; uncertainty is expressed as [`Liveness::Unknown`]
/// - Signalling a PID that no longer exists is `ProcessError::NoSuchProcess`
pub trait ProcessControl: Send + Sync {
    /// Launch `launch` detached from the caller, in `cwd`, with stdout and
    /// stderr truncating into `log_file`. Returns the child's PID.
    fn spawn_detached(
        &self,
        launch: &LaunchSpec,
        cwd: &Path,
        log_file: &Path,
    ) -> Result<u32, ProcessError>;

    /// Check whether a process with this PID currently exists.
    fn probe(&self, pid: u32) -> Liveness;

    /// Deliver `signal` to `pid`.
    fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError>;
}

/// Receives [`LifecycleEvent`]s as operations progress.
///
/// Implementations must not block; the CLI prints each event as one or
/// two lines.
pub trait LifecycleObserver: Send + Sync {
    fn emit(&self, event: LifecycleEvent);
}

/// Discards all events. Used when nobody is watching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NoopObserver {
    pub const fn new() -> Self {
        Self
    }
}

impl LifecycleObserver for NoopObserver {
    fn emit(&self, _event: LifecycleEvent) {}
}
