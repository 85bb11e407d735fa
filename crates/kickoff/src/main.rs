// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kickoff - company intake service.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;
mod sweep;

use clap::{Parser, Subcommand};
use kickoff_config::model::KickoffConfig;
use kickoff_intake::Preview;

/// Kickoff - company intake service.
#[derive(Parser, Debug)]
#[command(name = "kickoff", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP intake server.
    Serve,
    /// Print the channel identifier a company name would get.
    Sanitize {
        /// Company name to sanitize.
        name: String,
    },
    /// Validate configuration and print the resolved values.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => {
            let config = load_config_or_exit();
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Sanitize { name }) => match kickoff_intake::preview(&name) {
            Preview::Identifier(identifier) => println!("{identifier}"),
            Preview::Invalid(errors) => {
                for e in errors {
                    eprintln!("error: {e}");
                }
                std::process::exit(1);
            }
        },
        Some(Commands::Config) => {
            let config = load_config_or_exit();
            match render_config(&config) {
                Ok(text) => print!("{text}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("kickoff: use --help for available commands");
        }
    }
}

fn load_config_or_exit() -> KickoffConfig {
    match kickoff_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kickoff_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Resolved configuration as TOML with credentials masked.
fn render_config(config: &KickoffConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.slack.bot_token.is_some() {
        shown.slack.bot_token = Some("[redacted]".to_string());
    }
    if shown.email.api_key.is_some() {
        shown.email.api_key = Some("[redacted]".to_string());
    }
    toml::to_string_pretty(&shown)
}
