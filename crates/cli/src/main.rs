//! TechShop CLI - Data seeding and admin management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the data directory with the sample catalog
//! techshop-cli seed
//!
//! # Seed into an explicit directory, replacing an existing catalog
//! techshop-cli seed --data-dir ./data --force
//!
//! # Create an admin account
//! techshop-cli admin create -e admin@techshop.com -n "Administrator" -p <password>
//! ```
//!
//! # Commands
//!
//! - `seed` - Initialize the JSON collections with sample products
//! - `admin create` - Create admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "techshop-cli")]
#[command(author, version, about = "TechShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the data directory with the sample catalog
    Seed {
        /// Data directory holding the JSON collections
        #[arg(long, default_value = "data")]
        data_dir: String,

        /// Replace an existing catalog instead of leaving it untouched
        #[arg(long)]
        force: bool,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long, default_value = "Administrator")]
        name: String,

        /// Admin password
        #[arg(short, long)]
        password: String,

        /// Data directory holding the JSON collections
        #[arg(long, default_value = "data")]
        data_dir: String,
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
        Commands::Seed { data_dir, force } => {
            commands::seed::run(&data_dir, force).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
                data_dir,
            } => {
                commands::admin::create(&data_dir, &email, &name, &password).await?;
            }
        },
    }
    Ok(())
}
