//! Detached child spawning.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use srvctl_core::{LaunchSpec, ProcessError};
use tracing::debug;

/// Launch `launch` in `cwd` with stdout and stderr truncating into `log_file`.
///
/// The child gets its own process group and a null stdin, so terminal
/// signals aimed at the supervisor never reach it. The `Child` handle is
/// dropped immediately; only the PID survives.
pub fn spawn_detached(launch: &LaunchSpec, cwd: &Path, log_file: &Path) -> Result<u32, ProcessError> {
    let stdout = File::create(log_file).map_err(|e| {
        spawn_failed(launch, format!("cannot open log file {}: {e}", log_file.display()))
    })?;
    let stderr = stdout
        .try_clone()
        .map_err(|e| spawn_failed(launch, format!("cannot share log file handle: {e}")))?;

    let mut cmd = Command::new(&launch.program);
    cmd.args(&launch.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = cmd
        .spawn()
        .map_err(|e| spawn_failed(launch, e.to_string()))?;
    let pid = child.id();
    drop(child);

    debug!(pid, command = %launch.display(), cwd = %cwd.display(), "spawned detached child");
    Ok(pid)
}

fn spawn_failed(launch: &LaunchSpec, reason: String) -> ProcessError {
    ProcessError::SpawnFailed {
        program: launch.program.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn wait_for_log(path: &Path, needle: &str) -> String {
        for _ in 0..100 {
            let content = fs::read_to_string(path).unwrap_or_default();
            if content.contains(needle) {
                return content;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    #[cfg(unix)]
    fn spawn_redirects_both_streams_to_log() {
        let dir = TempDir::new().expect("tempdir");
        let log = dir.path().join("app.log");
        let launch = LaunchSpec::new("sh").with_args(["-c", "echo out; echo err >&2"]);

        let pid = spawn_detached(&launch, dir.path(), &log).expect("spawn failed");
        assert!(pid > 0);

        let content = wait_for_log(&log, "err");
        assert!(content.contains("out"), "log was {content:?}");
        assert!(content.contains("err"), "log was {content:?}");
    }

    #[test]
    #[cfg(unix)]
    fn spawn_truncates_existing_log() {
        let dir = TempDir::new().expect("tempdir");
        let log = dir.path().join("app.log");
        fs::write(&log, "previous run\n").expect("seed log");

        let launch = LaunchSpec::new("sh").with_args(["-c", "echo fresh"]);
        spawn_detached(&launch, dir.path(), &log).expect("spawn failed");

        let content = wait_for_log(&log, "fresh");
        assert!(!content.contains("previous run"), "log was {content:?}");
    }

    #[test]
    #[cfg(unix)]
    fn spawn_runs_in_work_dir() {
        let dir = TempDir::new().expect("tempdir");
        let log = dir.path().join("app.log");
        let launch = LaunchSpec::new("sh").with_args(["-c", "touch marker"]);

        spawn_detached(&launch, dir.path(), &log).expect("spawn failed");

        let marker = dir.path().join("marker");
        for _ in 0..100 {
            if marker.exists() {
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(marker.exists());
    }

    #[test]
    fn spawn_missing_program_fails() {
        let dir = TempDir::new().expect("tempdir");
        let log = dir.path().join("app.log");
        let launch = LaunchSpec::new("srvctl-definitely-not-a-program");

        let err = spawn_detached(&launch, dir.path(), &log).expect_err("should fail");
        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    }
}
