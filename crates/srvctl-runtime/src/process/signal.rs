//! Signal delivery by PID.

use srvctl_core::{ProcessError, StopSignal};

/// Send `signal` to `pid`.
///
/// `ESRCH` maps to [`ProcessError::NoSuchProcess`] and `EPERM` to
/// [`ProcessError::PermissionDenied`] so callers can tell "already gone"
/// apart from real failures.
#[cfg(unix)]
pub fn send_signal(pid: u32, signal: StopSignal) -> Result<(), ProcessError> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let raw = i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or(ProcessError::NoSuchProcess(pid))?;

    let sig = match signal {
        StopSignal::Terminate => Signal::SIGTERM,
        StopSignal::Kill => Signal::SIGKILL,
    };

    match signal::kill(Pid::from_raw(raw), sig) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(ProcessError::NoSuchProcess(pid)),
        Err(Errno::EPERM) => Err(ProcessError::PermissionDenied(pid)),
        Err(e) => Err(ProcessError::SignalFailed {
            pid,
            signal: signal.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(not(unix))]
pub fn send_signal(_pid: u32, _signal: StopSignal) -> Result<(), ProcessError> {
    Err(ProcessError::Unsupported("signal delivery"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn signal_to_missing_process_is_no_such_process() {
        let pid = u32::try_from(i32::MAX).expect("fits");
        let err = send_signal(pid, StopSignal::Terminate).expect_err("no such pid");
        assert!(matches!(err, ProcessError::NoSuchProcess(p) if p == pid));
    }

    #[test]
    #[cfg(unix)]
    fn signal_zero_pid_is_refused() {
        assert!(matches!(
            send_signal(0, StopSignal::Kill),
            Err(ProcessError::NoSuchProcess(0))
        ));
    }

    #[test]
    #[cfg(unix)]
    fn sigterm_stops_sleep() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("failed to spawn sleep");

        send_signal(child.id(), StopSignal::Terminate).expect("signal failed");

        let status = child.wait().expect("wait failed");
        assert!(!status.success());
    }
}
