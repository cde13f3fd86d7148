//! Spicebox CLI - catalog inspection and scripted cart replays.
//!
//! # Usage
//!
//! ```bash
//! # Show the built-in price table
//! spicebox catalog
//!
//! # Show the price table of a JSON catalog
//! spicebox catalog --file catalog.json
//!
//! # Replay a YAML script of cart events against a fresh cart
//! spicebox replay session.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog` - Validate a catalog and log its price table
//! - `replay` - Run add/update/remove/promo/checkout events and log the result

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "spicebox")]
#[command(author, version, about = "Spicebox CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a catalog and show its price table
    Catalog {
        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Replay a YAML script of cart events
    Replay {
        /// YAML script file
        script: PathBuf,

        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Command output is logged at info level unless RUST_LOG says otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spicebox_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { file } => commands::catalog::show(file.as_deref()).await?,
        Commands::Replay { script, catalog } => {
            commands::replay::run(&script, catalog.as_deref()).await?;
        }
    }
    Ok(())
}
