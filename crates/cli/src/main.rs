//! Backoffice CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! bo-cli migrate
//!
//! # Seed the app catalogue and sample conversations
//! bo-cli seed
//!
//! # Also create demo users (sharing one password) and tasks
//! bo-cli seed --demo-password 'correct horse battery staple'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed reference and demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Backoffice CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the app catalogue and sample conversations
    Seed {
        /// Also create demo users with this password, and demo tasks
        #[arg(long)]
        demo_password: Option<String>,
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
        Commands::Seed { demo_password } => {
            commands::seed::run(demo_password.as_deref()).await?;
        }
    }
    Ok(())
}
