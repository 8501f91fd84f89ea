//! # PC-01 Pixel Canvas - Program-Derived Pixel Records
//!
//! **Subsystem ID:** 1
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! A shared 100x100 canvas where every cell is its own ledger account. The
//! account address is derived from the cell's coordinates, so clients never
//! need an index to find a pixel and the program never needs a lock manager
//! to keep two creators apart.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Address is a pure function of `(x, y)` | `domain/services.rs` - `AddressDeriver::derive()` |
//! | `0 <= x, y <= 99`, X checked before Y | `domain/invariants.rs` - `check_coordinate()` |
//! | Create never overwrites | `adapters/ledger.rs` - `InMemoryLedger::commit()` |
//! | Update never moves a pixel | `domain/invariants.rs` - `check_coordinates_unchanged()` |
//! | One `PixelChanged` per committed mutation, none on abort | `service.rs` - `process_transaction()` |
//!
//! ## Transaction Pipeline
//!
//! ```text
//! Transaction ──▶ unpack instruction ──▶ address authorization
//!                                             │
//!                      ┌──────────────────────┘
//!                      ▼
//!              program validation ──▶ staged writes + events
//!                                             │
//!                      ┌──────────────────────┘
//!                      ▼
//!        atomic commit (allocate-if-absent) ──▶ event log + bus
//! ```
//!
//! Nothing is written, logged to the event log or published unless the
//! whole transaction commits.
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `AccountStore` | Address-keyed account storage with atomic commit |
//! | `EventSink` | Delivery of committed events to subscribers |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pc_01_pixel_canvas::prelude::*;
//!
//! let service = create_test_service();
//! let address = service.derive(Coordinate::new(10, 10))?;
//!
//! service
//!     .create_pixel(payer, address, Coordinate::new(10, 10), Color::new(0, 0, 255))
//!     .await?;
//!
//! let pixel = service.fetch_pixel(address).await?;
//! assert_eq!(pixel.color(), Color::new(0, 0, 255));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod program;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Account, PixelRecord};

    // Value objects
    pub use crate::domain::value_objects::{
        Address, Color, Coordinate, CANVAS_HEIGHT, CANVAS_WIDTH, MAX_POS, PIXEL_SEED,
    };

    // Domain services
    pub use crate::domain::services::AddressDeriver;

    // Invariants
    pub use crate::domain::invariants::{
        check_address_binding, check_coordinate, check_coordinates_unchanged,
        check_x_coordinate, check_y_coordinate,
    };

    // Ports
    pub use crate::ports::inbound::{
        PixelCanvasApi, Transaction, TransactionFailure, TransactionReceipt,
    };
    pub use crate::ports::outbound::{AccountStore, AccountWrite, CommitBatch, EventSink};

    // Program
    pub use crate::program::{CanvasInstruction, ProgramLogs};

    // Events
    pub use crate::events::{CommittedEvent, PixelChanged};

    // Errors
    pub use crate::errors::{CanvasError, FailureKind, LedgerError};

    // Config
    pub use crate::config::{CanvasConfig, ConfigError};

    // Service
    pub use crate::service::{
        create_service, create_test_service, PixelCanvasService, ServiceStats,
    };

    // Adapters
    pub use crate::adapters::{BusEventSink, InMemoryLedger};
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Pixel Canvas";

/// Subsystem version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Label hashed into the default program id.
pub const PROGRAM_LABEL: &str = "pc-01-pixel-canvas";

/// The program id used when none is configured.
#[must_use]
pub fn default_program_id() -> domain::value_objects::Address {
    domain::value_objects::Address::from_label(PROGRAM_LABEL)
}
