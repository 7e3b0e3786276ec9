//! Restart command handler.

use std::process::ExitCode;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::exit_code;
use crate::presentation::{RESTARTING, print_lines, render_start};

/// Execute the restart command.
///
/// The exit code is that of the start half; a stop that found nothing
/// running does not count against it. The stop half is printed before the
/// restart delay, so it stays visible if the start fails.
pub async fn execute(ctx: &CliContext) -> Result<ExitCode, CliError> {
    println!("{RESTARTING}");
    let outcome = ctx.supervisor().restart().await?;
    print_lines(&render_start(&outcome.start));
    Ok(exit_code(outcome.is_success()))
}
