use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lookout — detection dashboard client
///
/// Polls a video-detection backend, shows what the camera sees and raises
/// spoken, visual and audible alerts.
#[derive(Parser, Debug)]
#[command(name = "lookout")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `watch`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL, overrides `general.endpoint`
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive dashboard
    #[command(alias = "w")]
    Watch {
        /// Poll interval in milliseconds (default: config)
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Poll without a dashboard, printing alerts to the terminal
    #[command(alias = "d")]
    Daemon {
        /// Poll interval in milliseconds (default: config)
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Fetch the current detection statistics once
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Poll interval requested on the command line, if any
    #[must_use]
    pub const fn interval_override(&self) -> Option<u64> {
        match self.command {
            Some(Commands::Watch { interval_ms } | Commands::Daemon { interval_ms }) => {
                interval_ms
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_command() {
        let cli = Cli::try_parse_from(["lookout", "status"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Some(Commands::Status { json: false })
        ));
    }

    #[test]
    fn parse_status_with_json() {
        let cli =
            Cli::try_parse_from(["lookout", "status", "--json"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Some(Commands::Status { json: true })));
    }

    #[test]
    fn parse_status_alias() {
        let cli = Cli::try_parse_from(["lookout", "s"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Some(Commands::Status { .. })));
    }

    #[test]
    fn parse_global_verbose() {
        let cli = Cli::try_parse_from(["lookout", "--verbose", "status"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_global_config() {
        let cli = Cli::try_parse_from(["lookout", "--config", "/tmp/test.toml", "status"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn parse_global_endpoint_after_subcommand() {
        let cli = Cli::try_parse_from(["lookout", "daemon", "--endpoint", "http://cam:5000"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://cam:5000"));
    }

    #[test]
    fn no_command_returns_none() {
        let cli = Cli::try_parse_from(["lookout"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.command.is_none());
        assert_eq!(cli.interval_override(), None);
    }

    #[test]
    fn parse_watch_with_interval() {
        let cli = Cli::try_parse_from(["lookout", "watch", "--interval-ms", "250"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Some(Commands::Watch {
                interval_ms: Some(250)
            })
        ));
        assert_eq!(cli.interval_override(), Some(250));
    }

    #[test]
    fn parse_daemon_alias_with_short_interval() {
        let cli =
            Cli::try_parse_from(["lookout", "d", "-i", "1000"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.interval_override(), Some(1000));
    }

    #[test]
    fn status_has_no_interval_override() {
        let cli = Cli::try_parse_from(["lookout", "status"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.interval_override(), None);
    }

    #[test]
    fn unknown_command_fails() {
        assert!(Cli::try_parse_from(["lookout", "kill", "42"]).is_err());
    }
}
