// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Okada - a WhatsApp-driven campus delivery marketplace bot.
//!
//! This is the binary entry point for the Okada service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};

/// Okada - a WhatsApp-driven campus delivery marketplace bot.
#[derive(Parser, Debug)]
#[command(name = "okada", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Okada webhook server.
    Serve,
    /// Print the resolved configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match okada_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            okada_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(error) = serve::run(&config).await {
                tracing::error!(%error, "server exited with error");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            // Secrets stay out of the dump.
            println!("service.name = {}", config.service.name);
            println!("service.log_level = {}", config.service.log_level);
            println!("fees.delivery = {}", config.fees.delivery);
            println!("fees.shopping = {}", config.fees.shopping);
            println!("storage.database_path = {}", config.storage.database_path);
            println!("server.host = {}", config.server.host);
            println!("server.port = {}", config.server.port);
        }
        None => {
            println!("okada: use --help for available commands");
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
