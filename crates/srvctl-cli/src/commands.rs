//! The five lifecycle commands.

use std::time::Duration;

use clap::Subcommand;
use srvctl_core::{DEFAULT_RESTART_DELAY, SupervisorConfig};
use srvctl_runtime::DEFAULT_TAIL_LINES;

/// Printed when no command or an unknown command is given.
pub const USAGE: &str = "\
Usage: srvctl {start|stop|restart|status|logs}

Commands:
  start   - Start the server in background
  stop    - Stop the server
  restart - Restart the server
  status  - Check server status
  logs    - Show server logs (tail -f)";

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the server in background
    Start {
        /// Wait this many seconds and confirm the server is still up
        #[arg(long, value_name = "SECS")]
        verify: Option<u64>,
    },

    /// Stop the server
    Stop {
        /// Send SIGKILL if the server is still alive after this many seconds
        #[arg(long = "force-after", value_name = "SECS")]
        force_after: Option<u64>,
    },

    /// Restart the server
    Restart {
        /// Seconds to wait between stop and start
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_RESTART_DELAY.as_secs())]
        delay: u64,
        /// Wait this many seconds and confirm the server is still up
        #[arg(long, value_name = "SECS")]
        verify: Option<u64>,
        /// Send SIGKILL if the server is still alive after this many seconds
        #[arg(long = "force-after", value_name = "SECS")]
        force_after: Option<u64>,
    },

    /// Check server status
    Status,

    /// Show server logs (tail -f)
    Logs {
        /// Number of trailing lines to print before following
        #[arg(short = 'n', long, value_name = "LINES", default_value_t = DEFAULT_TAIL_LINES)]
        lines: usize,
    },
}

impl Commands {
    /// Fold the per-command timing options into `config`.
    pub fn apply_to(&self, config: SupervisorConfig) -> SupervisorConfig {
        let secs = |s: &Option<u64>| s.map(Duration::from_secs);
        match self {
            Self::Start { verify } => config.with_startup_grace(secs(verify)),
            Self::Stop { force_after } => config.with_stop_timeout(secs(force_after)),
            Self::Restart {
                delay,
                verify,
                force_after,
            } => config
                .with_restart_delay(Duration::from_secs(*delay))
                .with_startup_grace(secs(verify))
                .with_stop_timeout(secs(force_after)),
            Self::Status | Self::Logs { .. } => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        let argv = std::iter::once("srvctl").chain(args.iter().copied());
        Cli::parse_from(argv).command.expect("command")
    }

    #[test]
    fn usage_lists_every_command() {
        for name in ["start", "stop", "restart", "status", "logs"] {
            assert!(USAGE.contains(name), "usage is missing {name}");
        }
    }

    #[test]
    fn restart_defaults_to_two_second_delay() {
        assert_eq!(
            parse(&["restart"]),
            Commands::Restart {
                delay: 2,
                verify: None,
                force_after: None
            }
        );
    }

    #[test]
    fn logs_defaults_to_ten_lines() {
        assert_eq!(parse(&["logs"]), Commands::Logs { lines: 10 });
        assert_eq!(parse(&["logs", "-n", "50"]), Commands::Logs { lines: 50 });
    }

    #[test]
    fn apply_to_sets_only_relevant_timings() {
        let base = SupervisorConfig::with_defaults(".");

        let start = parse(&["start", "--verify", "3"]).apply_to(base.clone());
        assert_eq!(start.startup_grace, Some(Duration::from_secs(3)));
        assert_eq!(start.stop_timeout, None);

        let stop = parse(&["stop", "--force-after", "10"]).apply_to(base.clone());
        assert_eq!(stop.stop_timeout, Some(Duration::from_secs(10)));
        assert_eq!(stop.startup_grace, None);

        let restart = parse(&["restart", "--delay", "0"]).apply_to(base.clone());
        assert_eq!(restart.restart_delay, Duration::ZERO);

        assert_eq!(parse(&["status"]).apply_to(base.clone()), base);
    }
}
