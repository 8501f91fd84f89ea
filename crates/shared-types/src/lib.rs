//! # Shared Types Crate
//!
//! Ledger-wide entities shared by every Pixel-Chain crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, slots and event payloads that
//!   cross crate boundaries are defined here and nowhere else.
//! - **Plain Data**: everything is `Copy` or cheaply cloneable and
//!   serde-serializable so it can ride the event bus unchanged.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
