//! Supervisor configuration.
//!
//! Every operation receives a [`SupervisorConfig`] explicitly; the PID and
//! log paths are derived from the application name and working directory
//! rather than living in globals.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default application name, used to name the PID and log files.
pub const DEFAULT_APP_NAME: &str = "geoip-api";

/// Default entry point program.
pub const DEFAULT_PROGRAM: &str = "python3";

/// Default entry point arguments.
pub const DEFAULT_ENTRY_ARGS: &[&str] = &["app.py"];

/// Pause between stop and start during a restart, to let ports free up.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(2);

/// How to launch the supervised server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Program to execute, resolved through `PATH` if not a path.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Create a launch spec with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Replace the argument list.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The command line as a single display string.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for LaunchSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM).with_args(DEFAULT_ENTRY_ARGS.iter().copied())
    }
}

/// Everything a supervisor operation needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Application name; PID and log files are `<app_name>.pid` / `<app_name>.log`.
    pub app_name: String,
    /// Directory holding the state files and used as the child's cwd.
    pub work_dir: PathBuf,
    /// Entry point to launch.
    pub launch: LaunchSpec,
    /// Delay between stop and start on restart.
    pub restart_delay: Duration,
    /// If set, stop waits this long for exit and then sends SIGKILL.
    pub stop_timeout: Option<Duration>,
    /// If set, start waits this long and verifies the child is still alive.
    pub startup_grace: Option<Duration>,
}

impl SupervisorConfig {
    /// Create a configuration with required fields and default timings.
    pub fn new(app_name: impl Into<String>, work_dir: impl Into<PathBuf>, launch: LaunchSpec) -> Self {
        Self {
            app_name: app_name.into(),
            work_dir: work_dir.into(),
            launch,
            restart_delay: DEFAULT_RESTART_DELAY,
            stop_timeout: None,
            startup_grace: None,
        }
    }

    /// Default app name and entry point, rooted at `work_dir`.
    pub fn with_defaults(work_dir: impl Into<PathBuf>) -> Self {
        Self::new(DEFAULT_APP_NAME, work_dir, LaunchSpec::default())
    }

    /// Set the restart delay.
    #[must_use]
    pub const fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Enable SIGKILL escalation after `timeout`.
    #[must_use]
    pub const fn with_stop_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Enable startup verification after `grace`.
    #[must_use]
    pub const fn with_startup_grace(mut self, grace: Option<Duration>) -> Self {
        self.startup_grace = grace;
        self
    }

    /// Path of the PID file.
    pub fn pid_file(&self) -> PathBuf {
        self.work_dir.join(format!("{}.pid", self.app_name))
    }

    /// Path of the log file.
    pub fn log_file(&self) -> PathBuf {
        self.work_dir.join(format!("{}.log", self.app_name))
    }

    /// Working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.app_name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidAppName(self.app_name.clone()));
        }

        if self.launch.program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram);
        }

        if !self.work_dir.is_dir() {
            return Err(ConfigError::WorkDirNotFound(self.work_dir.clone()));
        }

        Ok(())
    }
}
