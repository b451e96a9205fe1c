// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Libris - a reading companion chat service.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use libris_config::LibrisConfig;

/// Libris - a reading companion chat service.
#[derive(Parser, Debug)]
#[command(name = "libris", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP chat server.
    Serve,
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => libris_config::load_and_validate_path(path),
        None => libris_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            libris_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            serve::init_tracing(&config.agent.log_level);
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("libris: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&redacted(&config)) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("libris: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("libris: use --help for available commands");
        }
    }
}

/// Copy of `config` with API keys masked.
fn redacted(config: &LibrisConfig) -> LibrisConfig {
    let mask = |key: &Option<String>| key.as_ref().map(|_| "[redacted]".to_string());
    let mut out = config.clone();
    out.llm.api_key = mask(&config.llm.api_key);
    out.books.api_key = mask(&config.books.api_key);
    out
}
