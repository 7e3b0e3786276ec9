//! Terminal messages for outcomes and progress events.
//!
//! Format-only: every `render_*` function turns an outcome or event into
//! the lines printed on stdout. Exit codes are decided by the handlers.

use std::path::Path;

use srvctl_core::{LifecycleEvent, LifecycleObserver, StartOutcome, StatusReport, StopOutcome};

pub const NOT_RUNNING: &str = "Server is not running";
pub const RESTARTING: &str = "Restarting server...";
pub const LOG_NOT_FOUND: &str = "Log file not found";
pub const LOG_STOPPED: &str = "Log monitoring stopped";

fn log_line(log_file: &Path) -> String {
    format!("Log file: {}", log_file.display())
}

/// Lines for a progress event, printed while the operation is running.
pub fn render_event(app_name: &str, event: &LifecycleEvent) -> Vec<String> {
    let line = match event {
        LifecycleEvent::Starting => format!("Starting {app_name} server..."),
        LifecycleEvent::Stopping { pid: Some(pid) } => {
            format!("Stopping {app_name} server (PID: {pid})...")
        }
        LifecycleEvent::Stopping { pid: None } => {
            format!("Stopping {app_name} server (invalid PID file)...")
        }
        LifecycleEvent::ForcingShutdown { .. } => "Forcing shutdown...".to_string(),
        LifecycleEvent::Stopped(StopOutcome::NotRunning) => NOT_RUNNING.to_string(),
        LifecycleEvent::Stopped(StopOutcome::Stopped { .. }) => "Server stopped".to_string(),
    };
    vec![line]
}

/// Final lines for `start`, after any progress events.
pub fn render_start(outcome: &StartOutcome) -> Vec<String> {
    match outcome {
        StartOutcome::AlreadyRunning { pid: Some(pid) } => {
            vec![format!("Server is already running (PID: {pid})")]
        }
        StartOutcome::AlreadyRunning { pid: None } => {
            vec!["Server is already running (unreadable PID file)".to_string()]
        }
        StartOutcome::Started { pid, log_file } => vec![
            format!("Server started successfully (PID: {pid})"),
            log_line(log_file),
        ],
        StartOutcome::ExitedEarly { log_file, .. } => vec![
            "Failed to start server".to_string(),
            format!("Check logs: {}", log_file.display()),
        ],
    }
}

pub fn render_status(report: &StatusReport) -> Vec<String> {
    let line = match report {
        StatusReport::NotRunning => NOT_RUNNING.to_string(),
        StatusReport::Running { pid } => format!("Server is running (PID: {pid})"),
        StatusReport::Stale { .. } => "Server is not running (stale PID file)".to_string(),
        StatusReport::InvalidPidFile => "Server is not running (invalid PID file)".to_string(),
        StatusReport::Unknown { pid } => {
            format!("Server status unknown (PID: {pid}, permission denied)")
        }
    };
    vec![line]
}

/// Print rendered lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Prints each lifecycle event to stdout as it arrives.
#[derive(Debug, Clone)]
pub struct ConsoleObserver {
    app_name: String,
}

impl ConsoleObserver {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl LifecycleObserver for ConsoleObserver {
    fn emit(&self, event: LifecycleEvent) {
        print_lines(&render_event(&self.app_name, &event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn start_messages() {
        let started = StartOutcome::Started {
            pid: 4242,
            log_file: PathBuf::from("/srv/geoip-api.log"),
        };
        assert_eq!(
            render_start(&started),
            vec![
                "Server started successfully (PID: 4242)",
                "Log file: /srv/geoip-api.log",
            ]
        );

        let running = StartOutcome::AlreadyRunning { pid: Some(7) };
        assert_eq!(render_start(&running), vec!["Server is already running (PID: 7)"]);
    }

    #[test]
    fn early_exit_points_at_log() {
        let outcome = StartOutcome::ExitedEarly {
            pid: 9,
            log_file: PathBuf::from("/tmp/a.log"),
        };
        let lines = render_start(&outcome);
        assert_eq!(lines[0], "Failed to start server");
        assert!(lines[1].ends_with("/tmp/a.log"));
    }

    #[test]
    fn progress_messages() {
        let render = |event| render_event("api", &event);

        assert_eq!(render(LifecycleEvent::Starting), vec!["Starting api server..."]);
        assert_eq!(
            render(LifecycleEvent::Stopping { pid: Some(11) }),
            vec!["Stopping api server (PID: 11)..."]
        );
        assert_eq!(
            render(LifecycleEvent::ForcingShutdown { pid: 11 }),
            vec!["Forcing shutdown..."]
        );
        assert_eq!(
            render(LifecycleEvent::Stopped(StopOutcome::NotRunning)),
            vec![NOT_RUNNING]
        );
        assert_eq!(
            render(LifecycleEvent::Stopped(StopOutcome::Stopped {
                pid: Some(11),
                forced: true
            })),
            vec!["Server stopped"]
        );
    }

    #[test]
    fn status_messages() {
        assert_eq!(render_status(&StatusReport::NotRunning), vec![NOT_RUNNING]);
        assert_eq!(
            render_status(&StatusReport::Running { pid: 3 }),
            vec!["Server is running (PID: 3)"]
        );
        assert_eq!(
            render_status(&StatusReport::Stale { pid: 3 }),
            vec!["Server is not running (stale PID file)"]
        );
        assert_eq!(
            render_status(&StatusReport::Unknown { pid: 1 }),
            vec!["Server status unknown (PID: 1, permission denied)"]
        );
    }
}
