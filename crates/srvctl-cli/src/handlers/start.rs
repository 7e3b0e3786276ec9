//! Start command handler.

use std::process::ExitCode;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::exit_code;
use crate::presentation::{print_lines, render_start};

/// Execute the start command.
///
/// Exits 1 if a PID file already exists or the server died during the
/// startup grace period.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or the PID file
/// cannot be written.
pub async fn execute(ctx: &CliContext) -> Result<ExitCode, CliError> {
    let outcome = ctx.supervisor().start().await?;
    print_lines(&render_start(&outcome));
    Ok(exit_code(outcome.is_success()))
}
