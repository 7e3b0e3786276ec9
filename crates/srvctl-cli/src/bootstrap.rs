//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the CLI wires infrastructure
//! together: environment loading, the tracing subscriber, configuration
//! resolution and the [`Supervisor`] backed by the real OS.

use std::env;
use std::sync::Arc;

use srvctl_core::{DEFAULT_PROGRAM, LaunchSpec, SupervisorConfig};
use srvctl_runtime::Supervisor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::ConsoleObserver;

/// Fully composed context handed to command handlers.
pub struct CliContext {
    pub supervisor: Supervisor,
}

impl CliContext {
    pub const fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    /// Application name used in messages.
    pub fn app_name(&self) -> &str {
        &self.supervisor.config().app_name
    }
}

/// Load a `.env` file from the current directory, if there is one.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the supervisor configuration from parsed arguments.
///
/// The working directory defaults to the current directory and relative
/// paths are resolved against it. Without `--arg`, the default program
/// gets its default entry script; any other program runs bare.
pub fn resolve_config(cli: &Cli) -> Result<SupervisorConfig, CliError> {
    let cwd = env::current_dir()?;
    let work_dir = match &cli.dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let launch = if cli.args.is_empty() && cli.exec == DEFAULT_PROGRAM {
        LaunchSpec::default()
    } else {
        LaunchSpec::new(cli.exec.as_str()).with_args(cli.args.iter().cloned())
    };

    debug!(
        app = %cli.app_name,
        dir = %work_dir.display(),
        command = %launch.display(),
        "resolved configuration"
    );
    Ok(SupervisorConfig::new(cli.app_name.as_str(), work_dir, launch))
}

/// Bootstrap the CLI context.
///
/// Validates `config`, attaches the OS process control and prints progress
/// to stdout.
pub fn bootstrap(config: SupervisorConfig) -> Result<CliContext, CliError> {
    let observer = Arc::new(ConsoleObserver::new(config.app_name.as_str()));
    let supervisor = Supervisor::with_os_control(config)?.with_observer(observer);
    Ok(CliContext { supervisor })
}
