//! Notifications
//!
//! Fire-and-forget user-facing messages for cart activity. Delivery is
//! best-effort: sinks get no acknowledgement and provide no queuing
//! guarantees beyond whatever they implement themselves.

use tracing::info;

/// User-facing cart event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added to the cart as a new line item.
    Added {
        /// Display name of the product
        product: String,
    },

    /// An add merged into an existing line item.
    QuantityUpdated {
        /// Display name of the product
        product: String,
    },

    /// A line item removal was attempted.
    Removed,

    /// The cart was emptied.
    Cleared,

    /// An order was placed and the cart emptied.
    OrderCompleted,
}

/// Sink for user-facing cart notifications.
pub trait NotificationSink {
    /// Deliver one event.
    fn notify(&mut self, event: CartEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&mut self, _event: CartEvent) {}
}

/// Sink that records events for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<CartEvent>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered so far, oldest first.
    pub fn events(&self) -> &[CartEvent] {
        &self.events
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, event: CartEvent) {
        self.events.push(event);
    }
}

/// Sink that forwards events as structured log records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, event: CartEvent) {
        match event {
            CartEvent::Added { product } => info!(product, "added to cart"),
            CartEvent::QuantityUpdated { product } => info!(product, "cart quantity updated"),
            CartEvent::Removed => info!("item removed from cart"),
            CartEvent::Cleared => info!("cart cleared"),
            CartEvent::OrderCompleted => info!("order placed"),
        }
    }
}
