//! # Driving Ports (API - Inbound)
//!
//! The public API of the canvas subsystem. Clients submit raw transactions
//! or use the typed create/update helpers; reads go straight to the store.

use crate::domain::entities::PixelRecord;
use crate::domain::value_objects::{Address, Color, Coordinate};
use crate::errors::LedgerError;
use crate::events::{CommittedEvent, PixelChanged};
use crate::program::instruction::CanvasInstruction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Slot, TransactionId};
use thiserror::Error;

// =============================================================================
// TRANSACTION
// =============================================================================

/// A single-instruction transaction against one pixel record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Fee payer. Not checked by the canvas program.
    pub payer: Address,
    /// Record the instruction targets.
    pub address: Address,
    /// Encoded [`CanvasInstruction`].
    pub data: Vec<u8>,
    /// Distinguishes otherwise identical transactions.
    pub nonce: u64,
}

impl Transaction {
    /// Builds a transaction from a typed instruction.
    pub fn new(
        payer: Address,
        address: Address,
        instruction: &CanvasInstruction,
        nonce: u64,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            payer,
            address,
            data: instruction.pack()?,
            nonce,
        })
    }

    /// Transaction id: sha256 over payer, address, nonce and data.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        let mut encoded = Vec::with_capacity(32 + 32 + 8 + self.data.len());
        encoded.extend_from_slice(self.payer.as_bytes());
        encoded.extend_from_slice(self.address.as_bytes());
        encoded.extend_from_slice(&self.nonce.to_le_bytes());
        encoded.extend_from_slice(&self.data);
        TransactionId::from_encoded(&encoded)
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// A committed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Transaction id.
    pub signature: TransactionId,
    /// Commit slot.
    pub slot: Slot,
    /// Program logs.
    pub logs: Vec<String>,
    /// Events emitted, in order.
    pub events: Vec<PixelChanged>,
}

/// An aborted transaction. Nothing it did is visible.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("transaction {signature} failed: {error}")]
pub struct TransactionFailure {
    /// Transaction id.
    pub signature: TransactionId,
    /// Why it aborted.
    #[source]
    pub error: LedgerError,
    /// Program logs up to and including the failure.
    pub logs: Vec<String>,
}

impl TransactionFailure {
    /// True if any log line contains `needle`.
    #[must_use]
    pub fn logs_contain(&self, needle: &str) -> bool {
        self.logs.iter().any(|line| line.contains(needle))
    }
}

// =============================================================================
// CANVAS API
// =============================================================================

/// Primary API for the canvas subsystem.
#[async_trait]
pub trait PixelCanvasApi: Send + Sync {
    /// Executes a raw transaction.
    async fn submit(&self, tx: Transaction) -> Result<TransactionReceipt, TransactionFailure>;

    /// Creates the pixel at `address` from its coordinates and color.
    ///
    /// # Errors
    ///
    /// - `PrivilegeEscalation` if `address` is not derived from `coordinate`
    /// - `InvalidXCoordinate` / `InvalidYCoordinate` for positions off the canvas
    /// - `AccountAlreadyInUse` if the pixel exists
    async fn create_pixel(
        &self,
        payer: Address,
        address: Address,
        coordinate: Coordinate,
        color: Color,
    ) -> Result<TransactionReceipt, TransactionFailure>;

    /// Repaints the pixel at `address`.
    ///
    /// # Errors
    ///
    /// - `AccountNotInitialized` if there is no pixel there
    async fn update_pixel(
        &self,
        payer: Address,
        address: Address,
        color: Color,
    ) -> Result<TransactionReceipt, TransactionFailure>;

    /// Reads the pixel at `address`.
    async fn fetch_pixel(&self, address: Address) -> Result<PixelRecord, LedgerError>;

    /// Committed events for the pixel at `address`, oldest first.
    async fn events_for(&self, address: Address) -> Result<Vec<CommittedEvent>, LedgerError>;
}
