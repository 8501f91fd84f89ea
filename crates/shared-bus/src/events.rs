//! # Ledger Events
//!
//! Defines all event types that flow through the shared bus. Only committed
//! outcomes are published; nothing here is speculative.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, PixelChanged, Slot, TransactionId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // =========================================================================
    // PROGRAM EVENTS
    // =========================================================================
    /// A pixel record was created or recolored.
    PixelChanged {
        /// Program that owns the record.
        program_id: Address,
        /// Derived address of the record.
        address: Address,
        /// Slot the transition was committed in.
        slot: Slot,
        /// Committed field values.
        event: PixelChanged,
    },

    // =========================================================================
    // TRANSACTION OUTCOMES
    // =========================================================================
    /// A transaction committed.
    TransactionCommitted {
        /// Transaction id.
        signature: TransactionId,
        /// Commit slot.
        slot: Slot,
    },

    /// A transaction aborted with no state change.
    TransactionFailed {
        /// Transaction id.
        signature: TransactionId,
        /// Rendered error.
        reason: String,
    },
}

impl LedgerEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::PixelChanged { .. } => EventTopic::Canvas,
            Self::TransactionCommitted { .. } | Self::TransactionFailed { .. } => {
                EventTopic::Transactions
            }
        }
    }

    /// The record address this event concerns, if any.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::PixelChanged { address, .. } => Some(*address),
            _ => None,
        }
    }

    /// The pixel payload, for canvas events.
    #[must_use]
    pub fn pixel_changed(&self) -> Option<&PixelChanged> {
        match self {
            Self::PixelChanged { event, .. } => Some(event),
            _ => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Pixel record transitions.
    Canvas,
    /// Transaction outcomes.
    Transactions,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Record addresses to include. Empty means all addresses; non-empty
    /// drops events that carry no address.
    pub addresses: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            addresses: Vec::new(),
        }
    }

    /// Create a filter that follows specific records.
    #[must_use]
    pub fn for_addresses(addresses: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            addresses,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let address_match = self.addresses.is_empty()
            || event
                .address()
                .is_some_and(|address| self.addresses.contains(&address));

        topic_match && address_match
    }
}
