//! Argument definitions for the `shoecart` binary.

use clap::{Parser, Subcommand};
use shoecart_core::ProductId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "shoecart",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage the RocketShoes shopping cart from the terminal"
)]
pub struct Cli {
    /// Config file (default: shoecart.toml in the platform config directory).
    #[clap(long, global = true, env = "SHOECART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serve stock and products from a JSON catalog file instead of the API.
    #[clap(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the cart and its totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        product_id: ProductId,
        /// New quantity
        #[clap(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Print the effective configuration
    Config,
}
