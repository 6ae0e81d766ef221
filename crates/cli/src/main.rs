//! Shopline CLI - Database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! shopline migrate
//!
//! # Show which migrations have been applied
//! shopline migrate --status
//!
//! # Insert demo users, shops and products
//! shopline seed
//! ```
//!
//! Both commands read `SHOPLINE_DATABASE_URL` (falling back to
//! `DATABASE_URL`), loading `.env` if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopline")]
#[command(author, version, about = "Shopline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// List applied and pending migrations instead of running them
        #[arg(long)]
        status: bool,
    },
    /// Seed the database with demo data
    Seed,
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
        Commands::Migrate { status: false } => commands::migrate::run().await?,
        Commands::Migrate { status: true } => commands::migrate::status().await?,
        Commands::Seed => commands::seed::demo_data().await?,
    }
    Ok(())
}
