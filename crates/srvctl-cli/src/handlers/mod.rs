//! Command handlers that delegate to the [`Supervisor`](srvctl_runtime::Supervisor).
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<ExitCode, CliError>`
//! - Thin wrappers that call the supervisor, print the outcome through
//!   [`crate::presentation`] and pick the exit code.
//!
//! Precondition failures ("already running", "not running") come back as
//! exit code 1, not as errors.

pub mod logs;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;

use std::process::ExitCode;

/// Exit code for an outcome: success or the generic failure code 1.
pub(crate) fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
