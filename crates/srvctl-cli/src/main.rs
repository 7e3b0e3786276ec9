//! CLI entry point.
//!
//! Loads the environment, parses arguments, wires the supervisor through
//! [`bootstrap`] and dispatches to a handler.

use std::process::ExitCode;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};

use srvctl_cli::{
    Cli, CliError, Commands, USAGE, bootstrap, handlers, init_logging, load_env,
    normalize_command_case, resolve_config,
};

fn report(err: &CliError) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}

/// Report a parse failure and pick the exit code.
///
/// Unknown commands and stray arguments get the usage block and exit 1.
/// Help and version exit 0. A bad option value is an argument error.
fn parse_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::InvalidSubcommand => {
            if let Some(ContextValue::String(name)) = err.get(ContextKind::InvalidSubcommand) {
                println!("Unknown command: {name}");
            }
            println!("{USAGE}");
            ExitCode::FAILURE
        }
        ErrorKind::UnknownArgument | ErrorKind::TooManyValues => {
            if let Some(ContextValue::String(arg)) = err.get(ContextKind::InvalidArg) {
                println!("Unknown argument: {arg}");
            }
            println!("{USAGE}");
            ExitCode::FAILURE
        }
        _ => report(&CliError::from(err)),
    }
}

async fn run(cli: &Cli, command: Commands) -> Result<ExitCode, CliError> {
    let config = command.apply_to(resolve_config(cli)?);
    let ctx = bootstrap(config)?;

    match command {
        Commands::Start { .. } => handlers::start::execute(&ctx).await,
        Commands::Stop { .. } => handlers::stop::execute(&ctx).await,
        Commands::Restart { .. } => handlers::restart::execute(&ctx).await,
        Commands::Status => handlers::status::execute(&ctx),
        Commands::Logs { lines } => handlers::logs::execute(&ctx, lines).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads SRVCTL_*
    load_env();

    let cli = match Cli::try_parse_from(normalize_command_case(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    init_logging(cli.verbose);

    let Some(command) = cli.command.clone() else {
        println!("{USAGE}");
        return ExitCode::FAILURE;
    };

    run(&cli, command).await.unwrap_or_else(|e| report(&e))
}
