//! # Canvas Program
//!
//! The on-ledger part of the canvas: how instructions are encoded, how they
//! are executed against a record, and what the program writes to its logs.

pub mod instruction;
pub mod logs;
pub mod processor;

pub use instruction::CanvasInstruction;
pub use logs::ProgramLogs;
pub use processor::{Execution, Processor};
