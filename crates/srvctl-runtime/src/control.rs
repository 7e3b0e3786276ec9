//! The real [`ProcessControl`] implementation backed by the OS.

use std::path::Path;

use srvctl_core::{LaunchSpec, Liveness, ProcessControl, ProcessError, StopSignal};

use crate::pidfile::probe_pid;
use crate::process::{send_signal, spawn_detached};

/// Spawns with `std::process`, probes and signals with `nix`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProcessControl;

impl OsProcessControl {
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessControl for OsProcessControl {
    fn spawn_detached(
        &self,
        launch: &LaunchSpec,
        cwd: &Path,
        log_file: &Path,
    ) -> Result<u32, ProcessError> {
        spawn_detached(launch, cwd, log_file)
    }

    fn probe(&self, pid: u32) -> Liveness {
        probe_pid(pid)
    }

    fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError> {
        send_signal(pid, signal)
    }
}
