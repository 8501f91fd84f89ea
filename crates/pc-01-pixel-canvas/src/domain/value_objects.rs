//! # Value Objects
//!
//! Immutable canvas primitives. These types are defined by their value, not
//! identity.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use shared_types::entities::Address;

// =============================================================================
// CANVAS GEOMETRY
// =============================================================================

/// Number of columns on the canvas.
pub const CANVAS_WIDTH: u8 = 100;

/// Number of rows on the canvas.
pub const CANVAS_HEIGHT: u8 = 100;

/// Largest valid value on either axis.
pub const MAX_POS: u8 = 99;

/// Namespace tag mixed into every pixel address.
pub const PIXEL_SEED: &[u8] = b"pixel";

// =============================================================================
// COORDINATE
// =============================================================================

/// A cell position on the canvas.
///
/// Any `u8` pair is representable; only `0..=99` on both axes is valid.
/// Validity is checked by the program, not here, so that out-of-range
/// requests still derive an address and reach validation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl Coordinate {
    /// Creates a coordinate. No range check.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True if both axes are within the canvas.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.x <= MAX_POS && self.y <= MAX_POS
    }

    /// The coordinate seed used in address derivation: `[x, y]`.
    #[must_use]
    pub const fn seed(&self) -> [u8; 2] {
        [self.x, self.y]
    }

    /// Row-major cell index, or `None` when off the canvas.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.is_valid()
            .then(|| usize::from(self.y) * usize::from(CANVAS_WIDTH) + usize::from(self.x))
    }

    /// Every valid coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CANVAS_HEIGHT).flat_map(|y| (0..CANVAS_WIDTH).map(move |x| Self::new(x, y)))
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// An RGB color. Every channel value is valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:02x}{:02x}{:02x})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
