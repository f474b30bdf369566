//! Cart Ledger
//!
//! The ledger is the ordered-by-insertion collection of cart line
//! items, keyed by product id for uniqueness. Every mutating operation
//! re-serializes the whole ledger to the durable slot before returning,
//! so a restored cart always reflects the last completed action.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::warn;

use crate::{
    notify::{CartEvent, NotificationSink},
    products::Product,
    storage::{self, CartSlot, StorageError},
    totals::{Totals, TotalsError, derive_totals},
};

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The ledger could not be persisted to the durable slot.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One (product, quantity) pairing in the cart.
///
/// The product is a full snapshot taken at add time: catalog price
/// changes after the fact do not reprice the line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: Product<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Create a line item from a product snapshot and quantity.
    pub fn new(product: Product<'a>, quantity: u32) -> Self {
        CartLine { product, quantity }
    }

    /// The product snapshot.
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Units of the product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Outcome of a cart mutation.
///
/// Rejected input never raises an error: an absent id or an invalid
/// quantity reports [`CartChange::Unchanged`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Added,

    /// An existing line item's quantity changed.
    QuantityUpdated,

    /// A line item was deleted.
    Removed,

    /// Every line item was deleted.
    Cleared,

    /// The ledger was left exactly as it was.
    Unchanged,
}

/// Cart Ledger
#[derive(Debug)]
pub struct Cart<'a, S, N> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
    slot: S,
    sink: N,
}

impl<'a, S: CartSlot, N: NotificationSink> Cart<'a, S, N> {
    /// Create an empty cart over a slot and sink.
    pub fn new(slot: S, sink: N, currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
            slot,
            sink,
        }
    }

    /// Restore a cart from its durable slot.
    ///
    /// A missing, unreadable or malformed payload falls back to an
    /// empty ledger; restoring never fails. Payloads in a currency
    /// other than the cart's are treated as stale and discarded.
    pub fn restore(slot: S, sink: N, currency: &'static Currency) -> Self {
        let lines = match slot.load() {
            Ok(Some(payload)) => match storage::decode_lines(&payload) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!(%err, "discarding malformed cart payload");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "cart slot unreadable; starting empty");
                Vec::new()
            }
        };

        let lines = if lines
            .iter()
            .any(|line| line.product.price.currency() != currency)
        {
            warn!("discarding cart payload in a foreign currency");
            Vec::new()
        } else {
            lines
        };

        Cart {
            lines,
            currency,
            slot,
            sink,
        }
    }

    /// Add a quantity of a product to the cart.
    ///
    /// Merges into the existing line item for the product id when one
    /// exists (no upper bound on the resulting quantity), otherwise
    /// appends a new line item. A zero quantity is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product's currency differs from
    /// the cart's, or if the ledger cannot be persisted.
    pub fn add(&mut self, product: &Product<'a>, quantity: u32) -> Result<CartChange, CartError> {
        if quantity == 0 {
            return Ok(CartChange::Unchanged);
        }

        let product_currency = product.price.currency();
        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let change = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            self.sink.notify(CartEvent::QuantityUpdated {
                product: product.name.clone(),
            });
            CartChange::QuantityUpdated
        } else {
            self.lines.push(CartLine::new(product.clone(), quantity));
            self.sink.notify(CartEvent::Added {
                product: product.name.clone(),
            });
            CartChange::Added
        };

        self.persist()?;

        Ok(change)
    }

    /// Set the exact quantity of an existing line item.
    ///
    /// A quantity below one is silently rejected without touching the
    /// slot. An absent product id changes nothing but still rewrites
    /// the slot with the unchanged ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the ledger cannot be persisted.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: u32,
    ) -> Result<CartChange, CartError> {
        if quantity == 0 {
            return Ok(CartChange::Unchanged);
        }

        let change = match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            Some(line) => {
                line.quantity = quantity;
                CartChange::QuantityUpdated
            }
            None => CartChange::Unchanged,
        };

        self.persist()?;

        Ok(change)
    }

    /// Remove the line item for a product id, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the ledger cannot be persisted.
    pub fn remove(&mut self, product_id: &str) -> Result<CartChange, CartError> {
        let before = self.lines.len();

        self.lines.retain(|line| line.product.id != product_id);

        // Notifies on every removal attempt, matched or not.
        self.sink.notify(CartEvent::Removed);

        self.persist()?;

        Ok(if self.lines.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed
        })
    }

    /// Empty the ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the empty ledger cannot be persisted.
    pub fn clear(&mut self) -> Result<CartChange, CartError> {
        let change = self.clear_lines()?;

        self.sink.notify(CartEvent::Cleared);

        Ok(change)
    }

    /// Empty the ledger on order completion.
    ///
    /// Identical to [`Cart::clear`] apart from the event delivered to
    /// the sink.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the empty ledger cannot be persisted.
    pub fn complete_order(&mut self) -> Result<CartChange, CartError> {
        let change = self.clear_lines()?;

        self.sink.notify(CartEvent::OrderCompleted);

        Ok(change)
    }

    /// Derive subtotal, shipping, total and item count for the ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if a line total overflows or money
    /// arithmetic fails.
    pub fn totals(&self) -> Result<Totals<'a>, TotalsError> {
        derive_totals(&self.lines, self.currency)
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// The line item for a product id, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Number of line items (not units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all line items.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The durable slot backing the cart.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// The notification sink attached to the cart.
    pub fn sink(&self) -> &N {
        &self.sink
    }

    fn clear_lines(&mut self) -> Result<CartChange, CartError> {
        let had_lines = !self.lines.is_empty();

        self.lines.clear();
        self.persist()?;

        Ok(if had_lines {
            CartChange::Cleared
        } else {
            CartChange::Unchanged
        })
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let payload = storage::encode_lines(&self.lines)?;

        self.slot.store(&payload)?;

        Ok(())
    }
}
