//! Orderdesk CLI - payload debugging and live order lookups.
//!
//! # Usage
//!
//! ```bash
//! # Normalize a raw payload captured from the fulfillment API
//! orderdesk normalize payload.json
//!
//! # Normalize from stdin
//! cat payload.json | orderdesk normalize
//!
//! # Fetch and normalize one order from the live proxy
//! orderdesk fetch --order-number R595531189
//!
//! # Fetch a customer's orders
//! orderdesk fetch --email cliente@example.com
//! orderdesk fetch --phone "(11) 98765-4321"
//! ```
//!
//! # Commands
//!
//! - `normalize` - Run a payload file (or stdin) through the normalizer
//! - `fetch` - Query the live fulfillment proxy and print canonical orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(author, version, about = "Orderdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw order payload into canonical JSON
    Normalize {
        /// Payload file; stdin when omitted
        file: Option<PathBuf>,

        /// Default country for addresses without one
        #[arg(long, default_value = "Brasil")]
        country: String,
    },
    /// Fetch orders from the live fulfillment proxy and normalize them
    Fetch {
        /// Track one order by its order number
        #[arg(short = 'n', long)]
        order_number: Option<String>,

        /// Customer email: ownership check with --order-number, search filter otherwise
        #[arg(short, long)]
        email: Option<String>,

        /// Customer phone, search filter (digits are extracted)
        #[arg(short, long)]
        phone: Option<String>,
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
        Commands::Normalize { file, country } => {
            commands::normalize::run(file.as_deref(), &country)?;
        }
        Commands::Fetch {
            order_number,
            email,
            phone,
        } => {
            commands::fetch::run(order_number.as_deref(), email.as_deref(), phone.as_deref())
                .await?;
        }
    }
    Ok(())
}
