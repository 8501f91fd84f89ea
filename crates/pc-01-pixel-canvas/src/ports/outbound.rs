//! # Driven Ports (SPI - Outbound)
//!
//! What the canvas program needs from the ledger around it:
//! - Address-keyed account storage with atomic commit
//! - Delivery of committed events

use crate::domain::entities::Account;
use crate::domain::value_objects::Address;
use crate::errors::LedgerError;
use crate::events::{CommittedEvent, PixelChanged};
use async_trait::async_trait;
use shared_bus::LedgerEvent;
use shared_types::entities::{Slot, TransactionId};

// =============================================================================
// ACCOUNT STORAGE
// =============================================================================

/// How a staged write lands on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// The address must be empty.
    Allocate,
    /// The address must already hold an account.
    Overwrite,
}

/// One staged account write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountWrite {
    /// Target address.
    pub address: Address,
    /// New account contents.
    pub account: Account,
    /// Allocation rule.
    pub kind: WriteKind,
}

impl AccountWrite {
    /// A write that fails if the address is taken.
    #[must_use]
    pub fn allocate(address: Address, account: Account) -> Self {
        Self {
            address,
            account,
            kind: WriteKind::Allocate,
        }
    }

    /// A write that fails if the address is empty.
    #[must_use]
    pub fn overwrite(address: Address, account: Account) -> Self {
        Self {
            address,
            account,
            kind: WriteKind::Overwrite,
        }
    }
}

/// Everything one transaction wants to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitBatch {
    /// Transaction being committed.
    pub signature: TransactionId,
    /// Staged writes.
    pub writes: Vec<AccountWrite>,
    /// Buffered events, keyed by the record they concern.
    pub events: Vec<(Address, PixelChanged)>,
}

/// Interface for ledger account storage.
///
/// ## Implementation Notes
///
/// `commit` must be all-or-nothing: every write's [`WriteKind`] is checked
/// before anything is applied, and a rejected batch leaves no accounts, no
/// events and no slot behind. Concurrent commits against one address are
/// linearized; the loser of two racing allocations sees
/// `AccountAlreadyInUse`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get an account.
    ///
    /// # Returns
    ///
    /// * `Some(Account)` - If the address holds an account
    /// * `None` - If nothing was ever allocated there
    async fn get_account(&self, address: &Address) -> Result<Option<Account>, LedgerError>;

    /// Atomically apply a batch and append its events. Returns the commit
    /// slot.
    async fn commit(&self, batch: CommitBatch) -> Result<Slot, LedgerError>;

    /// Committed events for one record, in commit order.
    async fn events_for(&self, address: &Address) -> Result<Vec<CommittedEvent>, LedgerError>;
}

// =============================================================================
// EVENT DELIVERY
// =============================================================================

/// Interface for delivering committed events to live subscribers.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event. Returns how many subscribers received it.
    async fn emit(&self, event: LedgerEvent) -> usize;
}
