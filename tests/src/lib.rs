//! # Pixel-Chain Test Suite
//!
//! Unified test crate for behavior that spans crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Create / update / fetch end to end
//!     ├── concurrency.rs  # Racing transactions against one ledger
//!     └── properties.rs   # proptest over derivation and the state machine
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pc-tests
//!
//! # By category
//! cargo test -p pc-tests integration::concurrency::
//!
//! # With logs
//! RUST_LOG=pc_01_pixel_canvas=debug cargo test -p pc-tests -- --nocapture
//! ```

#![allow(dead_code)]

pub mod integration;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`. Safe to call from every
/// test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
