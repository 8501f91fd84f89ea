//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports: an in-memory ledger that
//! plays the platform for tests and local runs, and a sink that forwards
//! committed events onto the shared bus.

pub mod event_sink;
pub mod ledger;

pub use event_sink::*;
pub use ledger::*;
