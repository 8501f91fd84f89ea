//! # Pixel Canvas Service
//!
//! Runs transactions end to end: decode, execute, commit, then log and
//! publish. Owns the statistics and the per-transaction program logs.
//!
//! ## Commit Rule
//!
//! The processor only stages writes. The store commit is the single point
//! where a transaction becomes visible; events are published after it and
//! only for it. Commit and publication happen under one lock so bus order
//! matches slot order.

use crate::adapters::{BusEventSink, InMemoryLedger};
use crate::config::{CanvasConfig, ConfigError};
use crate::domain::entities::PixelRecord;
use crate::domain::invariants::check_event_count;
use crate::domain::services::AddressDeriver;
use crate::domain::value_objects::{Address, Color, Coordinate};
use crate::errors::{FailureKind, LedgerError};
use crate::events::{encode_event, CommittedEvent, PixelChanged};
use crate::ports::inbound::{PixelCanvasApi, Transaction, TransactionFailure, TransactionReceipt};
use crate::ports::outbound::{AccountStore, CommitBatch, EventSink};
use crate::program::{CanvasInstruction, ProgramLogs, Processor};

use async_trait::async_trait;
use shared_bus::{EventFilter, EventStream, LedgerEvent, Subscription};
use shared_types::entities::{Slot, TransactionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Statistics for the canvas service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Transactions submitted.
    pub transactions_processed: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions aborted.
    pub transactions_failed: u64,
    /// Pixels created.
    pub pixels_created: u64,
    /// Pixels recolored.
    pub pixels_updated: u64,
    /// `PixelChanged` events published.
    pub events_emitted: u64,
    /// Aborts from coordinate validation.
    pub validation_failures: u64,
    /// Aborts from creating an existing pixel.
    pub allocation_conflicts: u64,
    /// Aborts from address mismatches.
    pub authorization_failures: u64,
}

struct Committed {
    slot: Slot,
    instruction: CanvasInstruction,
    events: Vec<(Address, PixelChanged)>,
}

/// The main canvas service.
///
/// This service:
/// 1. Decodes and executes canvas instructions
/// 2. Commits staged writes atomically through the [`AccountStore`]
/// 3. Publishes committed events through the [`EventSink`]
/// 4. Maintains execution statistics
pub struct PixelCanvasService<S: AccountStore, E: EventSink> {
    /// Service configuration.
    config: CanvasConfig,
    /// Address derivation under the configured program id.
    deriver: AddressDeriver,
    /// Account storage.
    store: Arc<S>,
    /// Event delivery.
    sink: Arc<E>,
    /// Serializes commit + publish.
    commit_lock: Mutex<()>,
    /// Nonce source for transactions built by the typed helpers.
    next_nonce: AtomicU64,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<S: AccountStore, E: EventSink> PixelCanvasService<S, E> {
    /// Create a new canvas service.
    pub fn new(store: S, sink: E, config: CanvasConfig) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(sink), config)
    }

    /// Create a service over a store and sink shared with other owners.
    pub fn with_shared(store: Arc<S>, sink: Arc<E>, config: CanvasConfig) -> Self {
        Self {
            deriver: AddressDeriver::new(config.program_id),
            config,
            store,
            sink,
            commit_lock: Mutex::new(()),
            next_nonce: AtomicU64::new(0),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The program id pixels are derived under.
    pub fn program_id(&self) -> Address {
        self.config.program_id
    }

    /// Address derivation for this program.
    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    /// The record address for a coordinate.
    pub fn derive(&self, coordinate: Coordinate) -> Result<Address, LedgerError> {
        Ok(self.deriver.derive(coordinate)?)
    }

    /// The account store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The event sink.
    pub fn sink(&self) -> &Arc<E> {
        &self.sink
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Execute one transaction.
    ///
    /// On success the writes are committed, the events appended to the
    /// ledger log and published. On failure nothing is written or
    /// published except a `TransactionFailed` notice.
    #[instrument(skip(self, tx), fields(signature = %tx.id(), address = %tx.address))]
    pub async fn process_transaction(
        &self,
        tx: Transaction,
    ) -> Result<TransactionReceipt, TransactionFailure> {
        let signature = tx.id();
        let mut logs = ProgramLogs::new(self.config.program_id, self.config.max_log_lines);
        logs.invoke();

        match self.execute(&tx, signature, &mut logs).await {
            Ok(committed) => Ok(self.on_committed(signature, committed, logs).await),
            Err(error) => Err(self.on_failed(signature, error, logs).await),
        }
    }

    async fn execute(
        &self,
        tx: &Transaction,
        signature: TransactionId,
        logs: &mut ProgramLogs,
    ) -> Result<Committed, LedgerError> {
        let instruction = CanvasInstruction::unpack(&tx.data)?;
        let execution = Processor::new(&self.deriver, self.store.as_ref())
            .process(tx.address, &instruction, logs)
            .await?;

        let events = execution.events.clone();
        let _guard = self.commit_lock.lock().await;
        let slot = self
            .store
            .commit(CommitBatch {
                signature,
                writes: execution.writes,
                events: execution.events,
            })
            .await?;

        for (address, event) in &events {
            let committed = CommittedEvent {
                address: *address,
                slot,
                signature,
                event: *event,
            };
            self.sink
                .emit(committed.to_ledger_event(self.config.program_id))
                .await;
        }
        self.sink
            .emit(LedgerEvent::TransactionCommitted { signature, slot })
            .await;

        Ok(Committed {
            slot,
            instruction,
            events,
        })
    }

    async fn on_committed(
        &self,
        signature: TransactionId,
        committed: Committed,
        mut logs: ProgramLogs,
    ) -> TransactionReceipt {
        let events: Vec<PixelChanged> = committed
            .events
            .iter()
            .map(|(_, event)| *event)
            .collect();
        debug_assert!(check_event_count(true, &events));

        for event in &events {
            logs.data(&encode_event(event));
        }
        logs.success();

        {
            let mut stats = self.stats.write().await;
            stats.transactions_processed += 1;
            stats.transactions_committed += 1;
            stats.events_emitted += events.len() as u64;
            match committed.instruction {
                CanvasInstruction::CreatePixel { .. } => stats.pixels_created += 1,
                CanvasInstruction::UpdatePixel { .. } => stats.pixels_updated += 1,
            }
        }

        info!(
            slot = committed.slot,
            instruction = committed.instruction.name(),
            "Transaction committed"
        );

        TransactionReceipt {
            signature,
            slot: committed.slot,
            logs: logs.into_lines(),
            events,
        }
    }

    async fn on_failed(
        &self,
        signature: TransactionId,
        error: LedgerError,
        mut logs: ProgramLogs,
    ) -> TransactionFailure {
        logs.error(&error);
        logs.failed(&error);

        self.sink
            .emit(LedgerEvent::TransactionFailed {
                signature,
                reason: error.to_string(),
            })
            .await;

        {
            let mut stats = self.stats.write().await;
            stats.transactions_processed += 1;
            stats.transactions_failed += 1;
            match error.kind() {
                FailureKind::Validation => stats.validation_failures += 1,
                FailureKind::AllocationConflict => stats.allocation_conflicts += 1,
                FailureKind::Authorization => stats.authorization_failures += 1,
                FailureKind::Account | FailureKind::Instruction | FailureKind::Internal => {}
            }
        }

        warn!(error = %error, kind = ?error.kind(), "Transaction failed");

        TransactionFailure {
            signature,
            error,
            logs: logs.into_lines(),
        }
    }

    /// Read and decode the pixel at `address`.
    #[instrument(skip(self), fields(address = %address))]
    pub async fn read_pixel(&self, address: Address) -> Result<PixelRecord, LedgerError> {
        let account = self
            .store
            .get_account(&address)
            .await?
            .ok_or(LedgerError::AccountNotInitialized(address))?;

        if account.owner != self.config.program_id {
            return Err(LedgerError::AccountOwnedByWrongProgram {
                address,
                owner: account.owner,
            });
        }

        let record = PixelRecord::try_from_slice(&account.data)?;
        debug!(coordinate = %record.coordinate(), color = %record.color(), "Pixel read");
        Ok(record)
    }

    fn build_transaction(
        &self,
        payer: Address,
        address: Address,
        instruction: &CanvasInstruction,
    ) -> Result<Transaction, TransactionFailure> {
        let nonce = self.next_nonce.fetch_add(1, Ordering::Relaxed);
        Transaction::new(payer, address, instruction, nonce).map_err(|error| TransactionFailure {
            signature: TransactionId::default(),
            error,
            logs: Vec::new(),
        })
    }
}

impl<S: AccountStore> PixelCanvasService<S, BusEventSink> {
    /// Subscribe to committed events.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.sink.subscribe(filter)
    }

    /// Stream committed events.
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.sink.bus().event_stream(filter)
    }
}

/// Build an in-memory service from a validated configuration.
pub fn create_service(
    config: CanvasConfig,
) -> Result<PixelCanvasService<InMemoryLedger, BusEventSink>, ConfigError> {
    config.validate()?;
    let sink = BusEventSink::with_capacity(config.event_capacity);
    Ok(PixelCanvasService::new(InMemoryLedger::new(), sink, config))
}

/// Create a service with default configuration for testing.
#[must_use]
pub fn create_test_service() -> PixelCanvasService<InMemoryLedger, BusEventSink> {
    let config = CanvasConfig::default();
    let sink = BusEventSink::with_capacity(config.event_capacity);
    PixelCanvasService::new(InMemoryLedger::new(), sink, config)
}

// =============================================================================
// PixelCanvasApi Implementation
// =============================================================================

#[async_trait]
impl<S: AccountStore, E: EventSink> PixelCanvasApi for PixelCanvasService<S, E> {
    async fn submit(&self, tx: Transaction) -> Result<TransactionReceipt, TransactionFailure> {
        self.process_transaction(tx).await
    }

    async fn create_pixel(
        &self,
        payer: Address,
        address: Address,
        coordinate: Coordinate,
        color: Color,
    ) -> Result<TransactionReceipt, TransactionFailure> {
        let instruction = CanvasInstruction::CreatePixel { coordinate, color };
        let tx = self.build_transaction(payer, address, &instruction)?;
        self.process_transaction(tx).await
    }

    async fn update_pixel(
        &self,
        payer: Address,
        address: Address,
        color: Color,
    ) -> Result<TransactionReceipt, TransactionFailure> {
        let instruction = CanvasInstruction::UpdatePixel { color };
        let tx = self.build_transaction(payer, address, &instruction)?;
        self.process_transaction(tx).await
    }

    async fn fetch_pixel(&self, address: Address) -> Result<PixelRecord, LedgerError> {
        self.read_pixel(address).await
    }

    async fn events_for(&self, address: Address) -> Result<Vec<CommittedEvent>, LedgerError> {
        self.store.events_for(&address).await
    }
}
