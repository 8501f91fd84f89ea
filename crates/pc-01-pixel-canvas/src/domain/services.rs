//! # Domain Services
//!
//! Address derivation for pixel records.
//!
//! ```text
//! address = find_program_address([b"pixel", [x, y]], program_id)
//! ```
//!
//! Derivation is total over `u8 x u8`: out-of-range coordinates still map to
//! an address, so a create at `(0, 200)` is rejected by validation rather
//! than by authorization.

use crate::domain::entities::PixelRecord;
use crate::domain::value_objects::{Address, Coordinate, PIXEL_SEED};
use crate::errors::LedgerError;
use shared_crypto::{create_program_address, find_program_address, PdaError};

/// Maps coordinates to record addresses under one program id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressDeriver {
    program_id: Address,
}

impl AddressDeriver {
    /// Creates a deriver for the given program.
    #[must_use]
    pub const fn new(program_id: Address) -> Self {
        Self { program_id }
    }

    /// The program id addresses are derived under.
    #[must_use]
    pub const fn program_id(&self) -> Address {
        self.program_id
    }

    /// Derives the record address for a coordinate.
    pub fn derive(&self, coordinate: Coordinate) -> Result<Address, PdaError> {
        self.derive_with_bump(coordinate).map(|(address, _)| address)
    }

    /// Derives the record address and its canonical bump.
    pub fn derive_with_bump(&self, coordinate: Coordinate) -> Result<(Address, u8), PdaError> {
        let seed = coordinate.seed();
        let (address, bump) =
            find_program_address(&[PIXEL_SEED, &seed], self.program_id.as_bytes())?;
        Ok((Address::new(address), bump))
    }

    /// Re-derives an address from stored coordinates and bump.
    pub fn recreate(&self, coordinate: Coordinate, bump: u8) -> Result<Address, PdaError> {
        let seed = coordinate.seed();
        let address = create_program_address(
            &[PIXEL_SEED, &seed, &[bump]],
            self.program_id.as_bytes(),
        )?;
        Ok(Address::new(address))
    }

    /// Checks that a stored record lives at the address its own fields
    /// derive to.
    pub fn verify_record(&self, record: &PixelRecord, address: &Address) -> Result<(), LedgerError> {
        match self.recreate(record.coordinate(), record.bump) {
            Ok(derived) if derived == *address => Ok(()),
            Ok(_) | Err(PdaError::OnCurve) => Err(LedgerError::ConstraintSeeds(*address)),
            Err(other) => Err(other.into()),
        }
    }
}
