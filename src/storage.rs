//! Durable cart storage
//!
//! The cart persists to a single named slot of opaque text, the moral
//! equivalent of a browser's local-storage key. The payload is a JSON
//! array of line records, each carrying a full product snapshot rather
//! than a bare id: prices are frozen at add time, matching the
//! in-memory ledger.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartLine,
    products::{Badge, Product},
};

/// Errors raised while reading or writing a cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error accessing the slot.
    #[error("Failed to access cart slot: {0}")]
    Io(#[from] io::Error),

    /// The ledger could not be serialized.
    #[error("Failed to encode cart payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised while decoding a persisted cart payload.
///
/// The restoring cart treats every variant the same way: the payload is
/// discarded and the ledger starts empty.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON for the expected record shape.
    #[error("Malformed cart payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A record references a currency code that is not ISO-4217.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A record carries a quantity of zero.
    #[error("Line item for product {0} has zero quantity")]
    ZeroQuantity(String),
}

/// A single named slot of durable key-value storage.
pub trait CartSlot {
    /// Read the slot payload; `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the slot payload.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be written.
    fn store(&mut self, payload: &str) -> Result<(), StorageError>;
}

/// In-memory slot, for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with a payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        MemorySlot {
            value: Some(payload.into()),
        }
    }

    /// The current payload, if any.
    pub fn payload(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl CartSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn store(&mut self, payload: &str) -> Result<(), StorageError> {
        self.value = Some(payload.to_string());

        Ok(())
    }
}

/// File-backed slot; a missing file reads as an empty slot.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn store(&mut self, payload: &str) -> Result<(), StorageError> {
        fs::write(&self.path, payload)?;

        Ok(())
    }
}

/// Persisted form of one cart line.
#[derive(Debug, Serialize, Deserialize)]
struct LineRecord {
    product: ProductRecord,
    quantity: u32,
}

/// Persisted product snapshot.
///
/// Prices are minor units plus an ISO alpha currency code, resolved
/// back to a `&'static Currency` on load.
#[derive(Debug, Serialize, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_price: Option<i64>,
    currency: String,
    category: String,
    rating: Decimal,
    reviews: u32,
    description: String,
    features: Vec<String>,
    in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    badge: Option<Badge>,
}

/// Serialize a full ledger into a slot payload.
///
/// # Errors
///
/// Returns a [`StorageError::Encode`] if serialization fails.
pub fn encode_lines(lines: &[CartLine<'_>]) -> Result<String, StorageError> {
    let records: Vec<LineRecord> = lines.iter().map(record_from_line).collect();

    Ok(serde_json::to_string(&records)?)
}

/// Deserialize a slot payload back into cart lines.
///
/// # Errors
///
/// Returns a [`DecodeError`] for malformed JSON, unknown currency codes
/// or zero quantities. Callers restoring a cart treat any error as a
/// corrupt payload and fall back to an empty ledger.
pub fn decode_lines<'a>(payload: &str) -> Result<Vec<CartLine<'a>>, DecodeError> {
    let records: Vec<LineRecord> = serde_json::from_str(payload)?;

    records.into_iter().map(line_from_record).collect()
}

fn record_from_line(line: &CartLine<'_>) -> LineRecord {
    let product = line.product();

    LineRecord {
        product: ProductRecord {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.to_minor_units(),
            original_price: product.original_price.map(|money| money.to_minor_units()),
            currency: product.price.currency().iso_alpha_code.to_string(),
            category: product.category.clone(),
            rating: product.rating,
            reviews: product.reviews,
            description: product.description.clone(),
            features: product.features.iter().cloned().collect(),
            in_stock: product.in_stock,
            badge: product.badge,
        },
        quantity: line.quantity(),
    }
}

fn line_from_record<'a>(record: LineRecord) -> Result<CartLine<'a>, DecodeError> {
    if record.quantity == 0 {
        return Err(DecodeError::ZeroQuantity(record.product.id));
    }

    let currency = iso::find(&record.product.currency)
        .ok_or_else(|| DecodeError::UnknownCurrency(record.product.currency.clone()))?;

    let product = Product {
        id: record.product.id,
        name: record.product.name,
        price: Money::from_minor(record.product.price, currency),
        original_price: record
            .product
            .original_price
            .map(|minor| Money::from_minor(minor, currency)),
        category: record.product.category,
        rating: record.product.rating,
        reviews: record.product.reviews,
        description: record.product.description,
        features: record.product.features.into_iter().collect(),
        in_stock: record.product.in_stock,
        badge: record.product.badge,
    };

    Ok(CartLine::new(product, record.quantity))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::RWF;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn test_line<'a>(quantity: u32) -> CartLine<'a> {
        let product = Product {
            id: "4".to_string(),
            name: "Business Card Printing".to_string(),
            price: Money::from_minor(15_000, RWF),
            original_price: None,
            category: "printing".to_string(),
            rating: Decimal::new(49, 1),
            reviews: 342,
            description: "Premium business card printing service.".to_string(),
            features: smallvec!["Multiple finishes".to_string()],
            in_stock: true,
            badge: Some(Badge::New),
        };

        CartLine::new(product, quantity)
    }

    #[test]
    fn encode_then_decode_preserves_snapshot() -> TestResult {
        let lines = [test_line(2)];

        let payload = encode_lines(&lines)?;
        let decoded = decode_lines(&payload)?;

        let expected = test_line(2);

        assert_eq!(decoded.len(), 1);
        assert!(decoded.iter().all(|line| {
            line.product() == expected.product() && line.quantity() == 2
        }));

        Ok(())
    }

    #[test]
    fn empty_ledger_encodes_to_empty_array() -> TestResult {
        assert_eq!(encode_lines(&[])?, "[]");

        Ok(())
    }

    #[test]
    fn malformed_json_errors() {
        assert!(matches!(
            decode_lines("not json at all"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn unknown_currency_code_errors() {
        let payload = r#"[{"product":{"id":"1","name":"x","price":100,"currency":"ZZZ","category":"office","rating":"4.0","reviews":1,"description":"","features":[],"in_stock":true},"quantity":1}]"#;

        assert!(matches!(
            decode_lines(payload),
            Err(DecodeError::UnknownCurrency(code)) if code == "ZZZ"
        ));
    }

    #[test]
    fn zero_quantity_errors() {
        let payload = r#"[{"product":{"id":"1","name":"x","price":100,"currency":"RWF","category":"office","rating":"4.0","reviews":1,"description":"","features":[],"in_stock":true},"quantity":0}]"#;

        assert!(matches!(
            decode_lines(payload),
            Err(DecodeError::ZeroQuantity(id)) if id == "1"
        ));
    }

    #[test]
    fn memory_slot_round_trips_payload() -> TestResult {
        let mut slot = MemorySlot::new();

        assert_eq!(slot.load()?, None);

        slot.store("[]")?;

        assert_eq!(slot.load()?, Some("[]".to_string()));
        assert_eq!(slot.payload(), Some("[]"));

        Ok(())
    }

    #[test]
    fn file_slot_missing_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut slot = FileSlot::new(dir.path().join("cart.json"));

        assert_eq!(slot.load()?, None);

        slot.store("[]")?;

        assert_eq!(slot.load()?, Some("[]".to_string()));

        Ok(())
    }
}
