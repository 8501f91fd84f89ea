//! # Domain Entities
//!
//! The stored pixel record and the raw account that carries it.

use crate::domain::value_objects::{Address, Color, Coordinate};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use shared_crypto::discriminator;
use shared_types::entities::PixelChanged;

// =============================================================================
// ACCOUNT
// =============================================================================

/// A raw ledger account: an owner program and opaque data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Program allowed to write the data.
    pub owner: Address,
    /// Encoded payload.
    pub data: Vec<u8>,
}

impl Account {
    /// Creates an account.
    #[must_use]
    pub fn new(owner: Address, data: Vec<u8>) -> Self {
        Self { owner, data }
    }
}

// =============================================================================
// PIXEL RECORD
// =============================================================================

/// One canvas cell as stored on the ledger.
///
/// Layout: 8-byte discriminator, then `x, y, r, g, b, bump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRecord {
    /// Column. Fixed at creation.
    pub x: u8,
    /// Row. Fixed at creation.
    pub y: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Canonical bump of the record's derived address.
    pub bump: u8,
}

impl PixelRecord {
    /// Length of the type tag.
    pub const DISCRIMINATOR_LEN: usize = 8;

    /// Total encoded length.
    pub const LEN: usize = Self::DISCRIMINATOR_LEN + 6;

    /// Creates a record.
    #[must_use]
    pub const fn new(coordinate: Coordinate, color: Color, bump: u8) -> Self {
        Self {
            x: coordinate.x,
            y: coordinate.y,
            r: color.r,
            g: color.g,
            b: color.b,
            bump,
        }
    }

    /// The account type tag, `sha256("account:Pixel")[..8]`.
    #[must_use]
    pub fn discriminator() -> [u8; 8] {
        discriminator("account", "Pixel")
    }

    /// The record's position.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// The record's current color.
    #[must_use]
    pub const fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }

    /// Replaces the color. Position and bump are untouched.
    pub fn recolor(&mut self, color: Color) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }

    /// The event describing the record's current state.
    #[must_use]
    pub const fn changed_event(&self) -> PixelChanged {
        PixelChanged {
            x: self.x,
            y: self.y,
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Encodes the record with its type tag.
    pub fn try_to_vec(&self) -> Result<Vec<u8>, LedgerError> {
        let body = bincode::serialize(self).map_err(|_| LedgerError::AccountDidNotSerialize)?;
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::discriminator());
        data.extend_from_slice(&body);
        Ok(data)
    }

    /// Decodes a tagged record.
    pub fn try_from_slice(data: &[u8]) -> Result<Self, LedgerError> {
        if data.len() < Self::DISCRIMINATOR_LEN {
            return Err(LedgerError::AccountDidNotDeserialize);
        }
        let (tag, body) = data.split_at(Self::DISCRIMINATOR_LEN);
        if tag != Self::discriminator().as_slice() {
            return Err(LedgerError::AccountDiscriminatorMismatch);
        }
        bincode::deserialize(body).map_err(|_| LedgerError::AccountDidNotDeserialize)
    }
}
