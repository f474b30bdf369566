//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    catalog::Category,
    fixtures::FixtureError,
    products::{Badge, Product},
};

/// Wrapper for categories in YAML
#[derive(Debug, Deserialize)]
pub struct CategoriesFixture {
    /// Categories, in file order
    pub categories: Vec<CategoryFixture>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category id
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Imagery reference
    pub image: String,
}

impl From<CategoryFixture> for Category {
    fn from(fixture: CategoryFixture) -> Self {
        Category {
            id: fixture.id,
            name: fixture.name,
            description: fixture.description,
            image: fixture.image,
        }
    }
}

/// Wrapper for products in YAML
///
/// Products are a sequence, not a map: the file order is the catalog
/// order, which the query engine treats as recency.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products, in file order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "450000 RWF")
    pub price: String,

    /// Pre-discount price, same format
    #[serde(default)]
    pub original_price: Option<String>,

    /// Category id
    pub category: String,

    /// Review rating, 0.0 to 5.0
    pub rating: Decimal,

    /// Number of reviews
    pub reviews: u32,

    /// Short description
    pub description: String,

    /// Selling points
    #[serde(default)]
    pub features: Vec<String>,

    /// Stock flag
    pub in_stock: bool,

    /// Optional badge (new, sale or hot)
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor, original_currency)| Money::from_minor(minor, original_currency));

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            price,
            original_price,
            category: fixture.category,
            rating: fixture.rating,
            reviews: fixture.reviews,
            description: fixture.description,
            features: fixture.features.into_iter().collect(),
            in_stock: fixture.in_stock,
            badge: fixture.badge,
        })
    }
}

/// Parse a price string (e.g., "450000 RWF") into minor units and currency.
///
/// The amount is in major units and is scaled by the currency exponent,
/// so "2.99 GBP" is 299 pence while "450000 RWF" is 450000 francs.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not a known ISO-4217 code.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
