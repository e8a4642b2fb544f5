//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tripwright - conversational trip planner
#[derive(Parser)]
#[command(
    name = "tw",
    about = "Conversational trip-planning engine",
    version,
    after_help = "Logs are written to the platform data dir, e.g. ~/.local/share/tripwright/logs/tripwright.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Interactive planning session over stdin
    Chat {
        /// Stable user id for cross-session preferences
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Send one message and print the JSON response
    Send {
        /// The message text
        message: String,

        /// Stable user id for cross-session preferences
        #[arg(short, long)]
        user: Option<String>,
    },
}

/// Log file location used by the binary
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripwright")
        .join("logs")
        .join("tripwright.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat() {
        let cli = Cli::parse_from(["tw", "chat"]);
        assert!(matches!(cli.command, Command::Chat { user: None }));
    }

    #[test]
    fn test_cli_parse_chat_with_user() {
        let cli = Cli::parse_from(["tw", "chat", "--user", "u-7"]);
        assert!(matches!(cli.command, Command::Chat { user: Some(u) } if u == "u-7"));
    }

    #[test]
    fn test_cli_parse_send() {
        let cli = Cli::parse_from(["tw", "send", "take me to Rome"]);
        assert!(matches!(cli.command, Command::Send { message, .. } if message.contains("Rome")));
    }

    #[test]
    fn test_cli_parse_globals() {
        let cli = Cli::parse_from(["tw", "--verbose", "--config", "/tmp/tw.yml", "chat"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tw.yml")));
    }
}
