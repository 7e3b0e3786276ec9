//! Liveness probing for recorded PIDs.

use srvctl_core::Liveness;

#[cfg(target_os = "linux")]
use std::fs;

/// Probe the process table for `pid`.
///
/// Uses `kill` with the null signal, which checks existence without
/// delivering anything:
/// - success → [`Liveness::Alive`]
/// - `ESRCH` → [`Liveness::Dead`]
/// - `EPERM` → [`Liveness::Unknown`] (exists, but not ours to signal)
///
/// On Linux a zombie (exited, not yet reaped) counts as dead.
#[cfg(unix)]
pub fn probe_pid(pid: u32) -> Liveness {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    // 0 and negative values address process groups, never a single process
    let Some(raw) = i32::try_from(pid).ok().filter(|raw| *raw > 0) else {
        return Liveness::Dead;
    };

    match signal::kill(Pid::from_raw(raw), None) {
        Ok(()) if is_zombie(pid) => Liveness::Dead,
        Ok(()) => Liveness::Alive,
        Err(Errno::ESRCH) => Liveness::Dead,
        Err(_) => Liveness::Unknown,
    }
}

#[cfg(not(unix))]
pub fn probe_pid(_pid: u32) -> Liveness {
    Liveness::Unknown // Not implemented on non-Unix
}

/// Read the state field of `/proc/<pid>/stat`.
///
/// The command name in field 2 may contain spaces and parentheses, so the
/// state is taken as the first token after the last `)`.
#[cfg(target_os = "linux")]
fn is_zombie(pid: u32) -> bool {
    let Ok(stat) = fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };

    stat.rfind(')')
        .and_then(|idx| stat[idx + 1..].split_whitespace().next())
        .is_some_and(|state| state == "Z")
}

#[cfg(all(unix, not(target_os = "linux")))]
const fn is_zombie(_pid: u32) -> bool {
    false
}
