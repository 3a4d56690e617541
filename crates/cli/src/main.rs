//! Orchard Market CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! orchard-cli migrate
//!
//! # Seed the catalog from a YAML file
//! orchard-cli seed -f crates/cli/seed/catalog.yaml
//!
//! # Create a staff user
//! orchard-cli staff create -e admin@example.com -p "a strong password"
//!
//! # Promote an existing user to staff
//! orchard-cli staff grant -e user@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog (menus and products) from YAML
//! - `staff create` - Create a staff user for the `/admin` back office
//! - `staff grant` - Grant staff access to an existing user

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orchard-cli")]
#[command(author, version, about = "Orchard Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the YAML catalog file
        #[arg(short, long)]
        file: String,
    },
    /// Manage staff users
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Grant staff access to an existing user
    Grant {
        /// Email address
        #[arg(short, long)]
        email: String,
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
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Staff { action } => match action {
            StaffAction::Create { email, password } => {
                commands::staff::create(&email, &password).await?;
            }
            StaffAction::Grant { email } => commands::staff::grant(&email).await?,
        },
    }
    Ok(())
}
