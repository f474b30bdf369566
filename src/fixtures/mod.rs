//! Fixtures
//!
//! Catalog datasets live outside the crate as YAML files under
//! `fixtures/`. A fixture set pairs a category file with an ordered
//! product file; loading builds a validated [`Catalog`].

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, Category},
    fixtures::catalog::{CategoriesFixture, ProductsFixture},
    products::Product,
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded; currency unknown")]
    NoCurrency,

    /// Catalog validation failure
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture
///
/// Accumulates categories and products from YAML files and turns them
/// into a [`Catalog`]. Product file order is preserved; it becomes the
/// catalog order and therefore the "newest" sort order.
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Categories, in file order
    categories: Vec<Category>,

    /// Products, in file order
    products: Vec<Product<'a>>,

    /// Currency shared by every loaded price
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Fixture {
            base_path: base_path.into(),
            categories: Vec::new(),
            products: Vec::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set by name (categories plus products).
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if either file cannot be read or
    /// parsed, or if the set mixes currencies.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_categories(name)?;
        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Load categories from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn load_categories(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("categories").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CategoriesFixture = serde_norway::from_str(&contents)?;

        self.categories
            .extend(fixture.categories.into_iter().map(Category::from));

        Ok(self)
    }

    /// Load products from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed,
    /// or if a price is not in the currency of the products loaded so
    /// far.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            // Parse to get the currency first, before building the Product.
            let (_minor_units, currency) = catalog::parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.products.push(product_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Currency of the loaded products, once known.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Build a validated catalog from the loaded data.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] when no products were
    /// loaded, or a wrapped [`CatalogError`] when validation fails.
    pub fn catalog(self) -> Result<Catalog<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Catalog::new(self.categories, self.products, currency)?)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn sample_set_loads_full_catalog() -> TestResult {
        let fixture = Fixture::from_set("sample")?;

        assert_eq!(fixture.currency(), Some(iso::RWF));

        let catalog = fixture.catalog()?;

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.categories().len(), 4);

        Ok(())
    }

    #[test]
    fn sample_set_preserves_product_order() -> TestResult {
        let catalog = Fixture::from_set("sample")?.catalog()?;

        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);

        Ok(())
    }

    #[test]
    fn missing_set_errors() {
        assert!(matches!(
            Fixture::from_set("does-not-exist"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn catalog_without_products_errors() {
        let fixture = Fixture::new();

        assert!(matches!(
            fixture.catalog(),
            Err(FixtureError::NoCurrency)
        ));
    }
}
