//! # Bus Event Sink
//!
//! Forwards committed events onto the shared in-memory bus.

use crate::ports::outbound::EventSink;
use async_trait::async_trait;
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, LedgerEvent, Subscription};
use std::sync::Arc;

/// [`EventSink`] backed by an [`InMemoryEventBus`].
#[derive(Clone)]
pub struct BusEventSink {
    bus: Arc<InMemoryEventBus>,
}

impl BusEventSink {
    /// Wrap an existing bus.
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    /// A sink over a fresh bus of the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Arc::new(InMemoryEventBus::with_capacity(capacity)))
    }

    /// The underlying bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    /// Subscribe to events delivered through this sink.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }
}

#[async_trait]
impl EventSink for BusEventSink {
    async fn emit(&self, event: LedgerEvent) -> usize {
        self.bus.publish(event).await
    }
}
