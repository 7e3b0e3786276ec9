//! Status command handler.

use std::process::ExitCode;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_lines, render_status};

/// Execute the status command. Always exits 0 unless the PID file is unreadable.
pub fn execute(ctx: &CliContext) -> Result<ExitCode, CliError> {
    let report = ctx.supervisor().status()?;
    print_lines(&render_status(&report));
    Ok(ExitCode::SUCCESS)
}
