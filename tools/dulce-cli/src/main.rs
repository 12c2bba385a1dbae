//! Dulce CLI - the Dulce Hogar bakery storefront in a terminal.
//!
//! Commands:
//! - `dulce products` - Browse the catalog with filters, sorting and pages
//! - `dulce search` - Search products by name and description
//! - `dulce cart` - Show and edit the persisted cart, check out
//! - `dulce account` - Log in or register against the demo directory
//! - `dulce slides` - Drive the hero carousel
//! - `dulce config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{AccountArgs, CartArgs, ConfigArgs, ProductsArgs, SearchArgs, SlidesArgs};

/// Dulce CLI - Browse and buy from the Dulce Hogar bakery
#[derive(Parser)]
#[command(name = "dulce")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

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
    /// Browse the product catalog
    Products(ProductsArgs),

    /// Search products by name or description
    Search(SearchArgs),

    /// Show and edit the shopping cart
    Cart(CartArgs),

    /// Log in or create an account
    Account(AccountArgs),

    /// Run the hero carousel
    Slides(SlidesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    // RUST_LOG wins; otherwise warnings only, or debug for our crates with --verbose
    let default_filter = if verbose {
        "warn,dulce_cache=debug,dulce_commerce=debug,dulce_auth=debug,dulce_storefront=debug,dulce_cli=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
        Commands::Slides(args) => commands::slides::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
