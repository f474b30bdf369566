//! Storefront Example
//!
//! This example loads a catalog fixture set, runs a filtered query,
//! fills a cart and places the order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to choose the cart file
//! Use `-g` (repeatable) to filter by category id

use anyhow::Result;
use clap::Parser;
use tabled::{Table, Tabled};

use shopfront::{
    cart::Cart,
    fixtures::Fixture,
    notify::LogSink,
    query::{CatalogQuery, CategorySelection, FilterConfig, SortKey},
    storage::FileSlot,
    utils::DemoArgs,
};

/// One row of the query result table.
#[derive(Tabled)]
struct ProductRow {
    /// Product id
    id: String,

    /// Product name
    name: String,

    /// Price in minor units
    price: i64,

    /// Review rating
    rating: String,
}

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let currency = fixture.currency().ok_or_else(|| {
        anyhow::anyhow!("fixture set {} contains no products", args.fixture)
    })?;
    let catalog = fixture.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let category_ids: Vec<&str> = args.categories.iter().map(String::as_str).collect();
    let config = FilterConfig {
        categories: CategorySelection::from_ids(&category_ids),
        sort: SortKey::PriceAscending,
        ..FilterConfig::default()
    };

    let visible = query.run(&config);

    let rows: Vec<ProductRow> = visible
        .iter()
        .map(|product| ProductRow {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.to_minor_units(),
            rating: product.rating.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));

    let mut cart = Cart::restore(FileSlot::new(&args.cart), LogSink, currency);

    for product in visible.iter().take(2) {
        cart.add(product, 1)?;
    }

    let totals = cart.totals()?;

    println!("Subtotal: {}", totals.subtotal());
    println!("Shipping: {}", totals.shipping());
    println!("Total:    {}", totals.total());
    println!("Items:    {}", totals.item_count());

    cart.complete_order()?;

    Ok(())
}
