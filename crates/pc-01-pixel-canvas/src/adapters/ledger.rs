//! # In-Memory Ledger
//!
//! Account store for tests and local runs. One write lock serializes
//! commits, so racing allocations against one address are linearized and
//! exactly one wins.

use crate::domain::entities::Account;
use crate::domain::value_objects::Address;
use crate::errors::LedgerError;
use crate::events::CommittedEvent;
use crate::ports::outbound::{AccountStore, AccountWrite, CommitBatch, WriteKind};
use async_trait::async_trait;
use shared_types::entities::Slot;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Address, Account>,
    events: Vec<CommittedEvent>,
    slot: Slot,
}

impl LedgerState {
    fn check(&self, write: &AccountWrite) -> Result<(), LedgerError> {
        let exists = self.accounts.contains_key(&write.address);
        match write.kind {
            WriteKind::Allocate if exists => Err(LedgerError::AccountAlreadyInUse(write.address)),
            WriteKind::Overwrite if !exists => {
                Err(LedgerError::AccountNotInitialized(write.address))
            }
            _ => Ok(()),
        }
    }
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an account directly, outside any transaction.
    ///
    /// Used to seed genesis state, including accounts owned by other
    /// programs.
    pub fn insert_account(&self, address: Address, account: Account) -> Result<(), LedgerError> {
        self.write()?.accounts.insert(address, account);
        Ok(())
    }

    /// Number of allocated accounts.
    pub fn account_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.accounts.len())
    }

    /// Every committed event, in commit order.
    pub fn event_log(&self) -> Result<Vec<CommittedEvent>, LedgerError> {
        Ok(self.read()?.events.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.state.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.state.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

#[async_trait]
impl AccountStore for InMemoryLedger {
    async fn get_account(&self, address: &Address) -> Result<Option<Account>, LedgerError> {
        Ok(self.read()?.accounts.get(address).cloned())
    }

    async fn commit(&self, batch: CommitBatch) -> Result<Slot, LedgerError> {
        let mut state = self.write()?;

        // Check every write before applying any.
        for write in &batch.writes {
            if let Err(e) = state.check(write) {
                warn!(address = %write.address, error = %e, "Commit rejected");
                return Err(e);
            }
        }

        state.slot += 1;
        let slot = state.slot;

        for write in batch.writes {
            state.accounts.insert(write.address, write.account);
        }
        for (address, event) in batch.events {
            state.events.push(CommittedEvent {
                address,
                slot,
                signature: batch.signature,
                event,
            });
        }

        debug!(slot, signature = %batch.signature, "Batch committed");
        Ok(slot)
    }

    async fn events_for(&self, address: &Address) -> Result<Vec<CommittedEvent>, LedgerError> {
        Ok(self
            .read()?
            .events
            .iter()
            .filter(|event| event.address == *address)
            .copied()
            .collect())
    }
}
