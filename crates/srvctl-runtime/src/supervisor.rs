//! The lifecycle service behind the five CLI commands.
//!
//! The PID file is the single source of truth for "is it running". Each
//! operation is independent; nothing is kept in memory between calls.

use std::io;
use std::path::Path;
use std::sync::Arc;

use srvctl_core::{
    LifecycleEvent, LifecycleObserver, Liveness, NoopObserver, ProcessControl, ProcessError,
    RestartOutcome, StartOutcome, StatusReport, StopOutcome, StopSignal, SupervisorConfig,
    SupervisorError,
};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::control::OsProcessControl;
use crate::logs::LogFollower;
use crate::pidfile::{delete_pidfile, publish_pidfile, read_pidfile, replace_pidfile};
use crate::process::terminate_pid;

/// What the PID file currently says.
enum Recorded {
    Missing,
    Invalid,
    Pid(u32),
}

/// Starts, stops and inspects one supervised server.
pub struct Supervisor {
    config: SupervisorConfig,
    control: Arc<dyn ProcessControl>,
    observer: Arc<dyn LifecycleObserver>,
}

impl Supervisor {
    /// Create a supervisor after validating `config`.
    pub fn new(
        config: SupervisorConfig,
        control: Arc<dyn ProcessControl>,
    ) -> Result<Self, SupervisorError> {
        config.validate()?;
        Ok(Self {
            config,
            control,
            observer: Arc::new(NoopObserver::new()),
        })
    }

    /// Create a supervisor backed by the real OS.
    pub fn with_os_control(config: SupervisorConfig) -> Result<Self, SupervisorError> {
        Self::new(config, Arc::new(OsProcessControl::new()))
    }

    /// Report progress to `observer` instead of discarding it.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub const fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Launch the server unless a PID file already exists.
    ///
    /// Only the existence of the PID file is checked, not liveness; use
    /// [`Self::status`] to clear a stale file.
    ///
    /// The PID file is claimed (holding our own PID) before the log is
    /// opened, so a concurrent start that loses never touches the log or
    /// spawns anything.
    pub async fn start(&self) -> Result<StartOutcome, SupervisorError> {
        let pid_file = self.config.pid_file();

        if let Err(err) = publish_pidfile(&pid_file, std::process::id()) {
            if err.kind() != io::ErrorKind::AlreadyExists {
                return Err(SupervisorError::pid_file(pid_file, err));
            }
            let pid = match recorded_pid(&pid_file)? {
                Recorded::Pid(pid) => Some(pid),
                Recorded::Missing | Recorded::Invalid => None,
            };
            debug!(?pid, "PID file already present");
            return Ok(StartOutcome::AlreadyRunning { pid });
        }

        let log_file = self.config.log_file();
        info!(
            app = %self.config.app_name,
            command = %self.config.launch.display(),
            "starting server"
        );
        self.observer.emit(LifecycleEvent::Starting);

        let pid = match self
            .control
            .spawn_detached(&self.config.launch, self.config.work_dir(), &log_file)
        {
            Ok(pid) => pid,
            Err(err) => {
                release_claim(&pid_file);
                return Err(err.into());
            }
        };

        if let Err(err) = replace_pidfile(&pid_file, pid) {
            // Never leave a child behind that no PID file accounts for
            if let Err(kill_err) = self.control.signal(pid, StopSignal::Terminate) {
                warn!(pid, error = %kill_err, "failed to terminate unrecorded child");
            }
            release_claim(&pid_file);
            return Err(SupervisorError::pid_file(pid_file, err));
        }

        if let Some(grace) = self.config.startup_grace {
            sleep(grace).await;
            if self.control.probe(pid).is_dead() {
                warn!(pid, "server exited during startup");
                delete_pidfile(&pid_file).map_err(|e| SupervisorError::pid_file(&pid_file, e))?;
                return Ok(StartOutcome::ExitedEarly { pid, log_file });
            }
        }

        info!(pid, "server started");
        Ok(StartOutcome::Started { pid, log_file })
    }

    /// Signal the recorded process and remove the PID file.
    ///
    /// The PID file is removed even if the signal could not be delivered.
    pub async fn stop(&self) -> Result<StopOutcome, SupervisorError> {
        let pid_file = self.config.pid_file();

        let pid = match recorded_pid(&pid_file)? {
            Recorded::Missing => {
                self.observer.emit(LifecycleEvent::Stopped(StopOutcome::NotRunning));
                return Ok(StopOutcome::NotRunning);
            }
            Recorded::Invalid => {
                warn!(path = %pid_file.display(), "PID file holds no valid PID, removing it");
                None
            }
            Recorded::Pid(pid) => Some(pid),
        };

        self.observer.emit(LifecycleEvent::Stopping { pid });
        let mut forced = false;
        if let Some(pid) = pid {
            info!(pid, "stopping server");
            let timeout = self.config.stop_timeout;
            match terminate_pid(self.control.as_ref(), pid, timeout, self.observer.as_ref()).await {
                Ok(was_forced) => forced = was_forced,
                Err(ProcessError::NoSuchProcess(_)) => debug!(pid, "process already gone"),
                Err(err @ ProcessError::DidNotExit(_)) => {
                    warn!(pid, error = %err, "process survived SIGKILL");
                    forced = true;
                }
                Err(err) => warn!(pid, error = %err, "failed to stop process"),
            }
        }

        delete_pidfile(&pid_file).map_err(|e| SupervisorError::pid_file(&pid_file, e))?;
        let outcome = StopOutcome::Stopped { pid, forced };
        self.observer.emit(LifecycleEvent::Stopped(outcome.clone()));
        Ok(outcome)
    }

    /// Stop, wait for the restart delay, then start.
    ///
    /// A stop that finds nothing running does not prevent the start. The
    /// stop half is reported through the observer before the delay, so it
    /// is visible even if the start then fails.
    pub async fn restart(&self) -> Result<RestartOutcome, SupervisorError> {
        let stop = self.stop().await?;
        debug!(delay_ms = self.config.restart_delay.as_millis(), "waiting before start");
        sleep(self.config.restart_delay).await;
        let start = self.start().await?;
        Ok(RestartOutcome { stop, start })
    }

    /// Report liveness of the recorded process, removing stale PID files.
    pub fn status(&self) -> Result<StatusReport, SupervisorError> {
        let pid_file = self.config.pid_file();

        let pid = match recorded_pid(&pid_file)? {
            Recorded::Missing => return Ok(StatusReport::NotRunning),
            Recorded::Invalid => {
                delete_pidfile(&pid_file).map_err(|e| SupervisorError::pid_file(&pid_file, e))?;
                return Ok(StatusReport::InvalidPidFile);
            }
            Recorded::Pid(pid) => pid,
        };

        let liveness = self.control.probe(pid);
        debug!(pid, ?liveness, "probed recorded process");

        match liveness {
            Liveness::Alive => Ok(StatusReport::Running { pid }),
            Liveness::Unknown => Ok(StatusReport::Unknown { pid }),
            Liveness::Dead => {
                info!(pid, "removing stale PID file");
                delete_pidfile(&pid_file).map_err(|e| SupervisorError::pid_file(&pid_file, e))?;
                Ok(StatusReport::Stale { pid })
            }
        }
    }

    /// A follower for the server log, or `None` if there is no log yet.
    pub fn log_follower(&self) -> Option<LogFollower> {
        let log_file = self.config.log_file();
        log_file.is_file().then(|| LogFollower::new(log_file))
    }
}

/// Drop a claim whose start did not go through.
fn release_claim(pid_file: &Path) {
    if let Err(err) = delete_pidfile(pid_file) {
        warn!(path = %pid_file.display(), error = %err, "failed to release PID file claim");
    }
}

fn recorded_pid(pid_file: &Path) -> Result<Recorded, SupervisorError> {
    match read_pidfile(pid_file) {
        Ok(pid) => Ok(Recorded::Pid(pid)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Recorded::Missing),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(Recorded::Invalid),
        Err(e) => Err(SupervisorError::pid_file(pid_file, e)),
    }
}
