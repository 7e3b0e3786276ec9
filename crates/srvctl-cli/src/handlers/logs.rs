//! Logs command handler.
//!
//! Prints the tail of the server log and keeps following it until Ctrl-C.

use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;

use srvctl_core::SupervisorError;
use srvctl_runtime::LogFollower;
use tracing::{debug, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::exit_code;
use crate::presentation::{LOG_NOT_FOUND, LOG_STOPPED};

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves,
/// leaving the default SIGINT behaviour in charge.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Execute the logs command.
///
/// Exits 1 without blocking if the log file does not exist.
pub async fn execute(ctx: &CliContext, lines: usize) -> Result<ExitCode, CliError> {
    let Some(follower) = ctx.supervisor().log_follower() else {
        println!("{LOG_NOT_FOUND}");
        return Ok(ExitCode::FAILURE);
    };
    debug!(path = %follower.path().display(), lines, "following log");

    let followed = follow_into(&follower, lines, &mut io::stdout(), interrupted()).await?;
    Ok(exit_code(followed))
}

/// Follow `follower` into `out` until `shutdown` resolves or `out` is closed.
///
/// Returns `false` if the log disappeared before following started.
async fn follow_into<W, F>(
    follower: &LogFollower,
    lines: usize,
    out: &mut W,
    shutdown: F,
) -> Result<bool, CliError>
where
    W: Write,
    F: Future<Output = ()>,
{
    let followed = follower
        .follow(lines, out, shutdown)
        .await
        .and_then(|()| writeln!(out, "\n{LOG_STOPPED}"));

    match followed {
        Ok(()) => Ok(true),
        // Reader went away, e.g. `srvctl logs | head`
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed, stopping");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("{LOG_NOT_FOUND}");
            Ok(false)
        }
        Err(e) => Err(SupervisorError::log_file(follower.path(), e).into()),
    }
}
