//! Fernhill CLI - Database migrations and staff management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run portal database migrations
//! fernhill-cli migrate
//!
//! # Create a staff account
//! fernhill-cli staff create -e jo@fernhill.dev -n "Jo Bloom" -r hr
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run portal database migrations
//! - `staff create` - Create staff accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fernhill-cli")]
#[command(author, version, about = "Fernhill HR portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run portal database migrations
    Migrate,
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff account
    Create {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Staff display name
        #[arg(short, long)]
        name: String,

        /// Staff role (`hr`, `hod`, `staff`, `intern`)
        #[arg(short, long, default_value = "staff")]
        role: String,
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
        Commands::Migrate => commands::migrate::portal().await?,
        Commands::Staff { action } => match action {
            StaffAction::Create { email, name, role } => {
                commands::staff::create(&email, &name, &role).await?;
            }
        },
    }
    Ok(())
}
