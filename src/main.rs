//! # Theatre CLI
//!
//! Runs small discrete-event simulations with the reference idling workflow.
//!
//! ## Usage
//!
//! ```bash
//! # Two actors, each idling for five turns
//! theatre idle-for 5 --actors 2
//!
//! # Idle until a flag completes at tick 3, without task logging
//! theatre idle-until 3 --no-logging
//!
//! # Show the effective configuration
//! theatre config
//! ```
//!
//! Set `RUST_LOG=workflow=debug` to follow allocation and task events.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use workflow::{
    cli::{Cli, Commands, commands},
    domain::error::WorkflowError
};

#[tokio::main]
async fn main() -> Result<(), WorkflowError> {
    init_tracing();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config => commands::handle_config_command(config_path, cli.no_logging)?,
        Commands::IdleFor { duration, actors } => {
            let config = commands::resolve_config(config_path, cli.no_logging)?;
            commands::handle_idle_for_command(duration, actors, &config).await?
        }
        Commands::IdleUntil { ticks, actors } => {
            let config = commands::resolve_config(config_path, cli.no_logging)?;
            commands::handle_idle_until_command(ticks, actors, &config).await?
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
