//! # Domain Layer (Inner Hexagon)
//!
//! Pure canvas logic: coordinates, colors, the stored pixel layout and the
//! address derivation rule.
//! NO I/O, NO async.
//!
//! Dependencies point INWARD only (adapters depend on this, not vice versa).

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
