//! Shopfront
//!
//! Shopfront is the client-side core of a demo e-commerce storefront: a
//! validated product catalog, a filter-and-sort query engine, and a cart
//! ledger with derived totals and durable persistence.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod notify;
pub mod prelude;
pub mod products;
pub mod query;
pub mod storage;
pub mod totals;
pub mod utils;
