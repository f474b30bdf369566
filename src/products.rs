//! Products

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Merchandising badge attached to a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Recently added to the catalog.
    New,

    /// Currently discounted against its original price.
    Sale,

    /// High demand.
    Hot,
}

/// Product
///
/// Immutable, externally supplied catalog entry. Prices are held in
/// minor units of the catalog currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Unique product id
    pub id: String,

    /// Display name
    pub name: String,

    /// Current price
    pub price: Money<'a, Currency>,

    /// Pre-discount price, when the product is on offer
    pub original_price: Option<Money<'a, Currency>>,

    /// Id of the category this product belongs to
    pub category: String,

    /// Average review rating, 0.0 to 5.0
    pub rating: Decimal,

    /// Number of reviews behind the rating
    pub reviews: u32,

    /// Short description
    pub description: String,

    /// Selling points, in display order
    pub features: SmallVec<[String; 4]>,

    /// Whether the product can currently be added to a cart
    pub in_stock: bool,

    /// Optional merchandising badge
    pub badge: Option<Badge>,
}

impl Product<'_> {
    /// Whole-percent saving of the current price against the original price.
    ///
    /// Returns `None` when the product has no original price, when the
    /// original price is zero, or when the product has somehow become more
    /// expensive than its original price.
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price?.to_minor_units();

        if original <= 0 {
            return None;
        }

        let saved = original.checked_sub(self.price.to_minor_units())?;

        if saved < 0 {
            return None;
        }

        let percent = Decimal::from(saved)
            .checked_div(Decimal::from(original))?
            .checked_mul(Decimal::ONE_HUNDRED)?;

        Some(percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use smallvec::smallvec;

    use super::*;

    fn test_product<'a>() -> Product<'a> {
        Product {
            id: "1".to_string(),
            name: "HP LaserJet Pro Printer".to_string(),
            price: Money::from_minor(450_000, iso::RWF),
            original_price: Some(Money::from_minor(520_000, iso::RWF)),
            category: "electronics".to_string(),
            rating: Decimal::new(48, 1),
            reviews: 124,
            description: "High-speed laser printer.".to_string(),
            features: smallvec!["Duplex printing".to_string()],
            in_stock: true,
            badge: Some(Badge::Sale),
        }
    }

    #[test]
    fn discount_percent_rounds_to_whole_percent() {
        let product = test_product();

        // (520000 - 450000) / 520000 = 13.46%, rounded to 13.
        assert_eq!(product.discount_percent(), Some(Decimal::from(13)));
    }

    #[test]
    fn discount_percent_is_none_without_original_price() {
        let product = Product {
            original_price: None,
            ..test_product()
        };

        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn discount_percent_is_none_when_price_rose() {
        let product = Product {
            original_price: Some(Money::from_minor(400_000, iso::RWF)),
            ..test_product()
        };

        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn badge_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Badge::Sale).as_deref().ok(),
            Some("\"sale\"")
        );
        assert_eq!(
            serde_json::from_str::<Badge>("\"hot\"").ok(),
            Some(Badge::Hot)
        );
    }
}
