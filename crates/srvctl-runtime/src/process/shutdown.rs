//! Stop a process by PID with optional SIGTERM → SIGKILL escalation.

use std::time::Duration;

use srvctl_core::{LifecycleEvent, LifecycleObserver, ProcessControl, ProcessError, StopSignal};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// Interval between liveness polls while waiting for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long to wait for exit after SIGKILL.
const KILL_WAIT: Duration = Duration::from_secs(2);

/// Terminate `pid` through `control`.
///
/// # Strategy
/// 1. Send SIGTERM
/// 2. Without a `grace` period, return immediately (no verification)
/// 3. Otherwise poll every 100ms until the process is gone or `grace` elapses
/// 4. If still alive, emit [`LifecycleEvent::ForcingShutdown`], send SIGKILL
///    and poll for up to 2 seconds
///
/// # Returns
/// - `Ok(true)` if SIGKILL was needed
/// - `Ok(false)` if SIGTERM was sent and either not verified or sufficient
/// - `Err(ProcessError::NoSuchProcess)` if the process was already gone
pub async fn terminate_pid(
    control: &dyn ProcessControl,
    pid: u32,
    grace: Option<Duration>,
    observer: &dyn LifecycleObserver,
) -> Result<bool, ProcessError> {
    control.signal(pid, StopSignal::Terminate)?;

    let Some(grace) = grace else {
        return Ok(false);
    };

    if wait_for_exit(control, pid, grace).await {
        debug!(pid, "process exited after SIGTERM");
        return Ok(false);
    }

    warn!(pid, grace_ms = grace.as_millis(), "process ignored SIGTERM, sending SIGKILL");
    observer.emit(LifecycleEvent::ForcingShutdown { pid });
    match control.signal(pid, StopSignal::Kill) {
        Ok(()) => {}
        // Exited between the last poll and the kill
        Err(ProcessError::NoSuchProcess(_)) => return Ok(false),
        Err(e) => return Err(e),
    }

    if wait_for_exit(control, pid, KILL_WAIT).await {
        Ok(true)
    } else {
        Err(ProcessError::DidNotExit(pid))
    }
}

async fn wait_for_exit(control: &dyn ProcessControl, pid: u32, within: Duration) -> bool {
    let deadline = Instant::now() + within;
    loop {
        if control.probe(pid).is_dead() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(POLL_INTERVAL).await;
    }
}
