//! Storefront CLI - price carts, quote shipping and place orders against a
//! storefront backend.
//!
//! Commands:
//! - `storefront price` - Price a cart file offline
//! - `storefront cart` - Show or edit the backend cart
//! - `storefront quote` - Request a shipping quote for the backend cart
//! - `storefront checkout` - Place an order
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, PriceArgs, QuoteArgs};

/// Storefront CLI - cart pricing, shipping quotes and checkout
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart file without contacting the backend
    Price(PriceArgs),

    /// Show or edit the backend cart
    Cart(CartArgs),

    /// Request a shipping quote for the backend cart
    Quote(QuoteArgs),

    /// Validate checkout details and place an order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose > 0, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    storefront_observability::init_logging(&ctx.config.logging.with_verbosity(cli.verbose))
        .context("Failed to initialise logging")?;

    // Execute command
    let result = match cli.command {
        Commands::Price(args) => commands::price::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
