//! # Shared Crypto - Ledger Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Discriminators, transaction ids |
//! | `pda` | SHA-256 + Ed25519 curve check | Program-derived addresses |
//!
//! ## Security Properties
//!
//! - **Derived addresses are off-curve**: no ed25519 private key exists for
//!   them, so only the owning program can authorize writes to them.
//! - **Canonical bump**: `find_program_address` always returns the highest
//!   viable bump, so one seed set names exactly one address.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod pda;

// Re-exports
pub use errors::PdaError;
pub use hashing::{discriminator, hashv, sha256};
pub use pda::{create_program_address, find_program_address, is_on_curve, Pubkey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
