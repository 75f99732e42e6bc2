// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trustline - bilingual customer-support assistant.
//!
//! Binary entry point: customer chat shell plus the admin-facing order
//! and complaint commands.

mod complaints;
mod orders;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Trustline - bilingual customer-support assistant.
#[derive(Parser, Debug)]
#[command(name = "trustline", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive customer chat shell.
    Shell,
    /// Inspect and manage orders.
    Orders {
        #[command(subcommand)]
        command: orders::OrdersCommand,
    },
    /// Inspect and manage complaints.
    Complaints {
        #[command(subcommand)]
        command: complaints::ComplaintsCommand,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match trustline_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            trustline_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Orders { command }) => orders::run(&config, command).await,
        Some(Commands::Complaints { command }) => complaints::run(&config, command).await,
        Some(Commands::Config) => match render_config(&config) {
            Ok(rendered) => {
                println!("{rendered}");
                Ok(())
            }
            Err(e) => Err(e),
        },
        None => {
            println!("trustline: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn render_config(
    config: &trustline_config::TrustlineConfig,
) -> Result<String, trustline_core::TrustlineError> {
    toml::to_string_pretty(config)
        .map_err(|e| trustline_core::TrustlineError::Internal(format!("render config: {e}")))
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trustline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config =
            trustline_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "trustline");
    }
}
