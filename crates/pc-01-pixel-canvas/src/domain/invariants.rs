//! # Domain Invariants
//!
//! Checks that MUST hold for every pixel transition.
//!
//! - Coordinates are in `0..=99`, X checked before Y.
//! - A create targets exactly the address derived from its coordinates.
//! - An update never moves a pixel.
//! - A transaction yields one event if it commits and none if it aborts.

use crate::domain::entities::PixelRecord;
use crate::domain::value_objects::{Address, Coordinate, MAX_POS};
use crate::errors::{CanvasError, LedgerError};
use shared_types::entities::PixelChanged;

// =============================================================================
// COORDINATE RANGE
// =============================================================================

/// X must be in `0..=99`.
pub fn check_x_coordinate(x: u8) -> Result<(), CanvasError> {
    if x > MAX_POS {
        return Err(CanvasError::InvalidXCoordinate);
    }
    Ok(())
}

/// Y must be in `0..=99`.
pub fn check_y_coordinate(y: u8) -> Result<(), CanvasError> {
    if y > MAX_POS {
        return Err(CanvasError::InvalidYCoordinate);
    }
    Ok(())
}

/// Both axes, X first. Only the first failure is reported.
pub fn check_coordinate(coordinate: Coordinate) -> Result<(), CanvasError> {
    check_x_coordinate(coordinate.x)?;
    check_y_coordinate(coordinate.y)
}

// =============================================================================
// ADDRESS BINDING
// =============================================================================

/// The supplied address must be the derived one.
pub fn check_address_binding(expected: &Address, supplied: &Address) -> Result<(), LedgerError> {
    if expected != supplied {
        return Err(LedgerError::PrivilegeEscalation {
            supplied: *supplied,
            expected: *expected,
        });
    }
    Ok(())
}

// =============================================================================
// TRANSITION SHAPE
// =============================================================================

/// An update may change color only.
#[must_use]
pub fn check_coordinates_unchanged(before: &PixelRecord, after: &PixelRecord) -> bool {
    before.x == after.x && before.y == after.y && before.bump == after.bump
}

/// One event per committed mutation, none on abort.
#[must_use]
pub fn check_event_count(committed: bool, events: &[PixelChanged]) -> bool {
    if committed {
        events.len() == 1
    } else {
        events.is_empty()
    }
}
