//! Catalog

use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::Product;

/// Errors raised while validating a catalog at load time.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two categories share the same id.
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    /// Two products share the same id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product references a category that does not exist.
    #[error("Product {product} references unknown category {category}")]
    UnknownCategory {
        /// Id of the offending product
        product: String,
        /// Category id it referenced
        category: String,
    },

    /// A product's price is not in the catalog currency (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A product's original price is below its current price.
    #[error("Product {0} has an original price below its current price")]
    OriginalPriceBelowPrice(String),

    /// A product's rating falls outside the 0.0 to 5.0 scale.
    #[error("Product {0} has rating {1} outside 0.0..=5.0")]
    RatingOutOfRange(String, Decimal),
}

/// Category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique category id
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Imagery reference
    pub image: String,
}

/// The full, static set of purchasable products and their categories.
///
/// Products keep their source order; the query engine treats that order
/// as the proxy for recency. The catalog is immutable once built, and
/// construction enforces the invariants the raw dataset leaves implicit:
/// unique ids, resolvable category references, a single currency and
/// ratings within the five-star scale.
#[derive(Debug)]
pub struct Catalog<'a> {
    categories: Vec<Category>,
    products: Vec<Product<'a>>,
    index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Build a validated catalog from categories and products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when ids collide, a product references
    /// an unknown category, a price is not in the catalog currency, an
    /// original price undercuts the current price, or a rating falls
    /// outside 0.0..=5.0.
    pub fn new(
        categories: impl Into<Vec<Category>>,
        products: impl Into<Vec<Product<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let categories = categories.into();
        let products = products.into();

        let mut category_ids = FxHashSet::default();
        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut index = FxHashMap::default();
        for (position, product) in products.iter().enumerate() {
            validate_product(product, &category_ids, currency)?;

            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Catalog {
            categories,
            products,
            index,
            currency,
        })
    }

    /// All categories, in source order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products, in source order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product<'a>> {
        self.products.get(*self.index.get(id)?)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Currency shared by every price in the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Check one product against the catalog invariants.
fn validate_product(
    product: &Product<'_>,
    category_ids: &FxHashSet<&str>,
    currency: &'static Currency,
) -> Result<(), CatalogError> {
    if !category_ids.contains(product.category.as_str()) {
        return Err(CatalogError::UnknownCategory {
            product: product.id.clone(),
            category: product.category.clone(),
        });
    }

    let price_currency = product.price.currency();
    if price_currency != currency {
        return Err(CatalogError::CurrencyMismatch(
            product.id.clone(),
            price_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    if let Some(original) = product.original_price {
        let original_currency = original.currency();
        if original_currency != currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id.clone(),
                original_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        if original.to_minor_units() < product.price.to_minor_units() {
            return Err(CatalogError::OriginalPriceBelowPrice(product.id.clone()));
        }
    }

    if product.rating < Decimal::ZERO || product.rating > Decimal::from(5) {
        return Err(CatalogError::RatingOutOfRange(
            product.id.clone(),
            product.rating,
        ));
    }

    Ok(())
}
