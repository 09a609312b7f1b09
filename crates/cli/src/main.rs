//! Dala Market CLI - Session migration and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront session table
//! dala-cli migrate
//!
//! # Seed the catalog with demo products
//! dala-cli seed --count 12
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the session store schema
//! - `seed` - Insert demo products through the backend API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dala-cli")]
#[command(author, version, about = "Dala Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the storefront session table
    Migrate,
    /// Seed the catalog with demo products
    Seed {
        /// How many demo products to insert
        #[arg(short, long, default_value_t = 12)]
        count: u32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::run(count).await?,
    }
    Ok(())
}
