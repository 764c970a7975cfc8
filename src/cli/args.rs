//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not record tasks in the actors' logs
    #[arg(long, global = true)]
    pub no_logging: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    /// Let every actor idle for a fixed number of turns
    IdleFor {
        /// Number of turns to idle
        duration: u64,
        /// Number of actors, each with its own idling workflow
        #[arg(short, long, default_value_t = 1)]
        actors:   usize
    },
    /// Let every actor idle until a flag completes after the given number of ticks
    IdleUntil {
        /// Tick at which the awaited flag completes
        ticks:  u64,
        /// Number of actors, each with its own idling workflow
        #[arg(short, long, default_value_t = 1)]
        actors: usize
    },
    /// Show the effective configuration
    Config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idle_for() {
        let cli = Cli::parse_from(["theatre", "idle-for", "3", "--actors", "2", "--no-logging"]);

        assert!(cli.no_logging);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::IdleFor { duration: 3, actors: 2 }));
    }

    #[test]
    fn test_parse_idle_until_with_config() {
        let cli = Cli::parse_from(["theatre", "--config", "sim.yaml", "idle-until", "4"]);

        assert_eq!(cli.config, Some(PathBuf::from("sim.yaml")));
        assert!(matches!(cli.command, Commands::IdleUntil { ticks: 4, actors: 1 }));
    }
}
