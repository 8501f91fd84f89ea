//! # Instruction Processor
//!
//! Runs one instruction against one record and stages its writes and
//! events. Nothing here touches the store's contents; the caller commits
//! the returned [`Execution`] or drops it.

use crate::domain::entities::{Account, PixelRecord};
use crate::domain::invariants::{
    check_address_binding, check_coordinate, check_coordinates_unchanged,
};
use crate::domain::services::AddressDeriver;
use crate::domain::value_objects::{Address, Color, Coordinate};
use crate::errors::LedgerError;
use crate::events::PixelChanged;
use crate::ports::outbound::{AccountStore, AccountWrite};
use crate::program::instruction::CanvasInstruction;
use crate::program::logs::ProgramLogs;
use tracing::debug;

/// Staged outcome of a successful instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Writes to commit.
    pub writes: Vec<AccountWrite>,
    /// Events to publish once committed.
    pub events: Vec<(Address, PixelChanged)>,
}

/// Executes canvas instructions.
pub struct Processor<'a, S: AccountStore + ?Sized> {
    deriver: &'a AddressDeriver,
    store: &'a S,
}

impl<'a, S: AccountStore + ?Sized> Processor<'a, S> {
    /// Creates a processor reading from `store`.
    #[must_use]
    pub fn new(deriver: &'a AddressDeriver, store: &'a S) -> Self {
        Self { deriver, store }
    }

    /// Runs `instruction` against the record at `address`.
    pub async fn process(
        &self,
        address: Address,
        instruction: &CanvasInstruction,
        logs: &mut ProgramLogs,
    ) -> Result<Execution, LedgerError> {
        logs.log(&format!("Instruction: {}", instruction.name()));

        match *instruction {
            CanvasInstruction::CreatePixel { coordinate, color } => {
                self.create_pixel(address, coordinate, color).await
            }
            CanvasInstruction::UpdatePixel { color } => self.update_pixel(address, color).await,
        }
    }

    async fn create_pixel(
        &self,
        address: Address,
        coordinate: Coordinate,
        color: Color,
    ) -> Result<Execution, LedgerError> {
        // The ledger only lets the program sign for the address it derives.
        let (expected, bump) = self.deriver.derive_with_bump(coordinate)?;
        check_address_binding(&expected, &address)?;

        check_coordinate(coordinate)?;

        if self.store.get_account(&address).await?.is_some() {
            return Err(LedgerError::AccountAlreadyInUse(address));
        }

        let record = PixelRecord::new(coordinate, color, bump);
        let account = Account::new(self.deriver.program_id(), record.try_to_vec()?);
        debug!(%address, %coordinate, %color, bump, "Pixel staged for creation");

        Ok(Execution {
            writes: vec![AccountWrite::allocate(address, account)],
            events: vec![(address, record.changed_event())],
        })
    }

    async fn update_pixel(&self, address: Address, color: Color) -> Result<Execution, LedgerError> {
        let account = self
            .store
            .get_account(&address)
            .await?
            .ok_or(LedgerError::AccountNotInitialized(address))?;

        if account.owner != self.deriver.program_id() {
            return Err(LedgerError::AccountOwnedByWrongProgram {
                address,
                owner: account.owner,
            });
        }

        let before = PixelRecord::try_from_slice(&account.data)?;
        self.deriver.verify_record(&before, &address)?;

        let mut after = before;
        after.recolor(color);
        debug_assert!(check_coordinates_unchanged(&before, &after));

        let updated = Account::new(account.owner, after.try_to_vec()?);
        debug!(%address, coordinate = %after.coordinate(), %color, "Pixel staged for update");

        Ok(Execution {
            writes: vec![AccountWrite::overwrite(address, updated)],
            events: vec![(address, after.changed_event())],
        })
    }
}
