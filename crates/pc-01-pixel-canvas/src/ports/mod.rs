//! # Ports Layer (Middle Hexagon)
//!
//! Interfaces between the canvas program and the outside world.
//!
//! - **Driving Ports (Inbound)**: `PixelCanvasApi`
//! - **Driven Ports (Outbound)**: `AccountStore`, `EventSink`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
