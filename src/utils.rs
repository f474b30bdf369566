//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to load the catalog from
    #[clap(short, long, default_value = "sample")]
    pub fixture: String,

    /// File the cart is restored from and persisted to
    #[clap(short, long, default_value = "target/cart.json")]
    pub cart: String,

    /// Only show products in these categories
    #[clap(short = 'g', long = "category")]
    pub categories: Vec<String>,
}
