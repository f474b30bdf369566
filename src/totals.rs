//! Derived totals
//!
//! Subtotal, shipping and total are always computed from the ledger on
//! demand and never stored independently.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Flat shipping fee in minor units, charged on any non-empty order.
pub const FLAT_SHIPPING_MINOR: i64 = 5_000;

/// Errors that can occur while deriving totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// A line total overflowed the minor-unit range.
    #[error("Line total for product {0} overflows minor units")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Derived totals for a cart ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals<'a> {
    subtotal: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    total: Money<'a, Currency>,
    item_count: u32,
}

impl<'a> Totals<'a> {
    /// Sum of price times quantity across all lines.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Flat shipping fee; zero exactly when the subtotal is zero.
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Sum of quantities across all lines.
    ///
    /// This counts units, not lines: two lines of three units each
    /// report six. Used for the cart badge.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }
}

/// Derive the totals for a set of cart lines.
///
/// # Errors
///
/// - [`TotalsError::Overflow`]: a line's price times quantity does not
///   fit in minor units.
/// - [`TotalsError::Money`]: wrapped money arithmetic or currency
///   mismatch error.
pub fn derive_totals<'a>(
    lines: &[CartLine<'a>],
    currency: &'static Currency,
) -> Result<Totals<'a>, TotalsError> {
    let mut subtotal = Money::from_minor(0, currency);
    let mut item_count: u32 = 0;

    for line in lines {
        subtotal = subtotal.add(line_total(line)?)?;
        item_count = item_count.saturating_add(line.quantity());
    }

    let shipping = if subtotal.is_zero() {
        Money::from_minor(0, currency)
    } else {
        Money::from_minor(FLAT_SHIPPING_MINOR, currency)
    };

    let total = subtotal.add(shipping)?;

    Ok(Totals {
        subtotal,
        shipping,
        total,
        item_count,
    })
}

/// Price times quantity for a single line, checked.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if the product does not fit in
/// minor units.
pub fn line_total<'a>(line: &CartLine<'a>) -> Result<Money<'a, Currency>, TotalsError> {
    let price = line.product().price;

    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or_else(|| TotalsError::Overflow(line.product().id.clone()))?;

    Ok(Money::from_minor(minor, price.currency()))
}
