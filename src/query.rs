//! Catalog Queries
//!
//! The query engine derives the visible product list for a filter and
//! sort configuration. Queries are pull-based: every configuration
//! change re-runs the full query against the injected catalog, and the
//! result replaces the previous list wholesale.

use std::cmp::Reverse;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

/// Errors raised while building a filter configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The price range lower bound exceeds the upper bound.
    #[error("Price range lower bound {lower} exceeds upper bound {upper}")]
    InvertedPriceRange {
        /// Requested lower bound, in minor units
        lower: i64,
        /// Requested upper bound, in minor units
        upper: i64,
    },

    /// A price bound is negative.
    #[error("Price bound {0} is negative")]
    NegativePriceBound(i64),
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the catalog's source order, the proxy for recency.
    #[default]
    Newest,

    /// Cheapest first.
    PriceAscending,

    /// Most expensive first.
    PriceDescending,

    /// Highest rated first.
    RatingDescending,
}

/// Inclusive price bounds in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    lower: i64,
    upper: i64,
}

impl PriceRange {
    /// Create a price range with inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if either bound is negative or the
    /// lower bound exceeds the upper bound.
    pub fn new(lower: i64, upper: i64) -> Result<Self, FilterError> {
        if lower < 0 {
            return Err(FilterError::NegativePriceBound(lower));
        }

        if upper < 0 {
            return Err(FilterError::NegativePriceBound(upper));
        }

        if lower > upper {
            return Err(FilterError::InvertedPriceRange { lower, upper });
        }

        Ok(PriceRange { lower, upper })
    }

    /// Lower bound in minor units.
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper bound in minor units.
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Check whether a minor-unit price falls within the range.
    ///
    /// Both bounds are inclusive.
    pub fn contains(&self, minor: i64) -> bool {
        (self.lower..=self.upper).contains(&minor)
    }
}

impl Default for PriceRange {
    /// The full non-negative range.
    fn default() -> Self {
        PriceRange {
            lower: 0,
            upper: i64::MAX,
        }
    }
}

/// Set of selected category ids, kept sorted and deduplicated.
///
/// An empty selection deliberately means "all categories", never
/// "show none".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    ids: SmallVec<[String; 4]>,
}

impl CategorySelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from category id slices.
    pub fn from_ids(ids: &[&str]) -> Self {
        let mut ids: SmallVec<[String; 4]> = ids.iter().map(ToString::to_string).collect();

        ids.sort();
        ids.dedup();

        CategorySelection { ids }
    }

    /// Select the category if it is unselected, deselect it otherwise.
    pub fn toggle(&mut self, id: &str) {
        match self.ids.binary_search_by(|selected| selected.as_str().cmp(id)) {
            Ok(pos) => {
                self.ids.remove(pos);
            }
            Err(pos) => {
                self.ids.insert(pos, id.to_string());
            }
        }
    }

    /// Check whether a category id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .binary_search_by(|selected| selected.as_str().cmp(id))
            .is_ok()
    }

    /// Check whether no category is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of selected categories.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Filter and sort configuration for a catalog query.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Selected categories; an empty selection matches every product.
    pub categories: CategorySelection,

    /// Inclusive price bounds.
    pub price: PriceRange,

    /// Sort order applied after filtering.
    pub sort: SortKey,
}

/// Catalog Query Engine
///
/// Holds a reference to the read-only catalog it queries. Each call to
/// [`CatalogQuery::run`] is pure and deterministic; an empty result is
/// a valid outcome, not an error.
#[derive(Debug, Clone, Copy)]
pub struct CatalogQuery<'a> {
    catalog: &'a Catalog<'a>,
}

impl<'a> CatalogQuery<'a> {
    /// Create a query engine over a catalog.
    pub fn new(catalog: &'a Catalog<'a>) -> Self {
        CatalogQuery { catalog }
    }

    /// Derive the visible product list for a configuration.
    ///
    /// Products are first filtered by category (skipped when the
    /// selection is empty), then by inclusive price bounds, then
    /// sorted. `Vec::sort_by_key` is stable, so products tied on the
    /// sort key keep their filtered order.
    pub fn run(&self, config: &FilterConfig) -> Vec<&'a Product<'a>> {
        let mut result: Vec<&Product<'_>> = self
            .catalog
            .products()
            .iter()
            .filter(|product| {
                config.categories.is_empty() || config.categories.contains(&product.category)
            })
            .filter(|product| config.price.contains(product.price.to_minor_units()))
            .collect();

        match config.sort {
            SortKey::Newest => {}
            SortKey::PriceAscending => {
                result.sort_by_key(|product| product.price.to_minor_units());
            }
            SortKey::PriceDescending => {
                result.sort_by_key(|product| Reverse(product.price.to_minor_units()));
            }
            SortKey::RatingDescending => {
                result.sort_by_key(|product| Reverse(product.rating));
            }
        }

        result
    }
}
