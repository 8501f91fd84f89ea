//! # Shared Bus - Event Bus for Committed Ledger Events
//!
//! Delivers events to live subscribers after the ledger commits them.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Ledger     │                    │  Subscriber  │
//! │   commit     │    publish()       │  (canvas UI, │
//! │              │ ──────┐            │   indexer)   │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Ordering
//!
//! The bus is a single broadcast channel, so every subscriber sees events in
//! publish order. Publishers publish in commit order, which gives per-address
//! commit ordering to consumers.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LedgerEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
