//! Stop command handler.

use std::process::ExitCode;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::exit_code;

/// Execute the stop command. Exits 1 if there is no PID file.
///
/// Messages are printed by the context's observer as the stop progresses.
pub async fn execute(ctx: &CliContext) -> Result<ExitCode, CliError> {
    let outcome = ctx.supervisor().stop().await?;
    Ok(exit_code(outcome.is_success()))
}
