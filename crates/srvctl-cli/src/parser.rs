//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Command, CommandFactory, Parser};
use srvctl_core::{DEFAULT_APP_NAME, DEFAULT_PROGRAM};

use crate::commands::Commands;

/// Command-line interface for the server supervisor.
///
/// Global options select which server is managed; the subcommand says
/// what to do with it.
#[derive(Parser, Debug)]
#[command(name = "srvctl")]
#[command(about = "Start, stop and watch a background server through a PID file")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Application name; state files are <NAME>.pid and <NAME>.log
    #[arg(long = "app-name", value_name = "NAME", env = "SRVCTL_APP_NAME", default_value = DEFAULT_APP_NAME, global = true)]
    pub app_name: String,

    /// Directory holding the state files, also the server's working directory
    #[arg(short = 'C', long = "dir", value_name = "DIR", env = "SRVCTL_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Program that runs the server
    #[arg(long = "exec", value_name = "PROGRAM", env = "SRVCTL_EXEC", default_value = DEFAULT_PROGRAM, global = true)]
    pub exec: String,

    /// Argument for the program, repeatable (defaults to app.py for python3)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true, global = true)]
    pub args: Vec<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Lowercase the command name in `args` so `START` and `Status` work.
///
/// Global options and their values are skipped to find the command. A
/// token that is not a known command once lowercased is left as typed, so
/// it is reported verbatim.
pub fn normalize_command_case<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = Cli::command();
    let takes_value = |token: &str| {
        cli.get_arguments().any(|arg| {
            arg.get_action().takes_values()
                && (arg.get_long().is_some_and(|long| token.strip_prefix("--") == Some(long))
                    || arg.get_short().is_some_and(|short| token == format!("-{short}")))
        })
    };
    let commands: Vec<&str> = cli.get_subcommands().map(Command::get_name).collect();

    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut idx = 1;
    while let Some(token) = args.get(idx).and_then(|arg| arg.to_str()) {
        if token == "--" {
            break;
        }
        if token.starts_with('-') {
            idx += if takes_value(token) { 2 } else { 1 };
            continue;
        }
        let lower = token.to_lowercase();
        if commands.contains(&lower.as_str()) {
            args[idx] = OsString::from(lower);
        }
        break;
    }
    args
}
