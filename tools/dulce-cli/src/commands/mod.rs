//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod config;
pub mod products;
pub mod search;
pub mod slides;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category: pan, pastel, factura, dulce or all.
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Price band: 0-5000, 5000-10000, 10000+ or all.
    #[arg(long, default_value = "all")]
    pub price: String,

    /// Sort order: default, name, price-low, price-high or featured.
    #[arg(short, long, default_value = "default")]
    pub sort: String,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search term, matched against names and descriptions.
    #[arg(num_args = 0.., trailing_var_arg = true)]
    pub term: Vec<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id or exact name.
        product: String,
    },
    /// Add one unit to a cart line.
    Increase {
        /// Line number as shown by `cart show`.
        line: usize,
    },
    /// Take one unit from a cart line, removing it at zero.
    Decrease {
        /// Line number as shown by `cart show`.
        line: usize,
    },
    /// Remove a cart line.
    Remove {
        /// Line number as shown by `cart show`.
        line: usize,
    },
    /// Place the order and empty the cart.
    Checkout {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Log in with a demo customer account.
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account. Accounts last for this process only.
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Password again.
        #[arg(long)]
        confirm: String,

        #[arg(long)]
        phone: Option<String>,

        /// Accept the terms and conditions.
        #[arg(long)]
        accept_terms: bool,
    },
}

/// Arguments for the slides command.
#[derive(Args)]
pub struct SlidesArgs {
    /// Number of slides (default: from config).
    #[arg(long)]
    pub count: Option<usize>,

    /// Auto-advance ticks to watch before exiting.
    #[arg(short, long, default_value = "3")]
    pub ticks: u32,

    /// Auto-advance period in milliseconds (default: from config).
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Convert a 1-based line number from the command line to a cart index.
pub fn line_index(line: usize) -> Result<usize> {
    if line == 0 {
        bail!("Line numbers start at 1");
    }
    Ok(line - 1)
}
