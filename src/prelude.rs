//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartChange, CartError, CartLine},
    catalog::{Catalog, CatalogError, Category},
    fixtures::{Fixture, FixtureError},
    notify::{CartEvent, LogSink, NoopSink, NotificationSink, RecordingSink},
    products::{Badge, Product},
    query::{CatalogQuery, CategorySelection, FilterConfig, FilterError, PriceRange, SortKey},
    storage::{CartSlot, FileSlot, MemorySlot, StorageError},
    totals::{FLAT_SHIPPING_MINOR, Totals, TotalsError, derive_totals},
};
