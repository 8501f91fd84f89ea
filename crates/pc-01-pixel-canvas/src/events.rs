//! # Event Schema
//!
//! `PixelChanged` is the canvas program's only event. It is buffered while
//! a transaction runs and becomes visible in three places once the
//! transaction commits:
//!
//! | Where | Form |
//! |-------|------|
//! | Program logs | `Program data: <hex>` (tag + `bincode` payload) |
//! | Ledger event log | [`CommittedEvent`] |
//! | Event bus | `LedgerEvent::PixelChanged` |

use crate::domain::value_objects::Address;
use serde::{Deserialize, Serialize};
use shared_bus::LedgerEvent;
use shared_crypto::discriminator;
use shared_types::entities::{Slot, TransactionId};

pub use shared_types::entities::PixelChanged;

/// Length of an encoded event: 8-byte tag plus five channels.
pub const ENCODED_EVENT_LEN: usize = 8 + 5;

/// A `PixelChanged` as recorded in the ledger's event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvent {
    /// Record the event concerns.
    pub address: Address,
    /// Commit slot of the emitting transaction.
    pub slot: Slot,
    /// Emitting transaction.
    pub signature: TransactionId,
    /// Committed values.
    pub event: PixelChanged,
}

impl CommittedEvent {
    /// Wraps the event for publication on the bus.
    #[must_use]
    pub fn to_ledger_event(&self, program_id: Address) -> LedgerEvent {
        LedgerEvent::PixelChanged {
            program_id,
            address: self.address,
            slot: self.slot,
            event: self.event,
        }
    }
}

/// The event type tag, `sha256("event:PixelChanged")[..8]`.
#[must_use]
pub fn event_discriminator() -> [u8; 8] {
    discriminator("event", "PixelChanged")
}

/// Encodes an event as it appears after `Program data:`.
#[must_use]
pub fn encode_event(event: &PixelChanged) -> Vec<u8> {
    let mut data = Vec::with_capacity(ENCODED_EVENT_LEN);
    data.extend_from_slice(&event_discriminator());
    data.extend_from_slice(&[event.x, event.y, event.r, event.g, event.b]);
    data
}

/// Decodes a `Program data:` payload. `None` if it is not a `PixelChanged`.
#[must_use]
pub fn decode_event(data: &[u8]) -> Option<PixelChanged> {
    let (tag, body) = data.split_at_checked(8)?;
    if tag != event_discriminator().as_slice() {
        return None;
    }
    bincode::deserialize(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> PixelChanged {
        PixelChanged {
            x: 30,
            y: 40,
            r: 255,
            g: 0,
            b: 0,
        }
    }

    #[test]
    fn test_encoded_event_layout() {
        let data = encode_event(&event());
        assert_eq!(data.len(), ENCODED_EVENT_LEN);
        assert_eq!(&data[8..], &[30, 40, 255, 0, 0]);
        assert_eq!(decode_event(&data), Some(event()));
    }

    #[test]
    fn test_decode_rejects_foreign_payloads() {
        assert_eq!(decode_event(&[1, 2, 3]), None);
        let mut data = encode_event(&event());
        data[0] ^= 1;
        assert_eq!(decode_event(&data), None);
    }

    #[test]
    fn test_to_ledger_event() {
        let committed = CommittedEvent {
            address: Address::new([4; 32]),
            slot: 9,
            signature: TransactionId::default(),
            event: event(),
        };
        let program = Address::new([1; 32]);
        let wrapped = committed.to_ledger_event(program);

        assert_eq!(wrapped.address(), Some(committed.address));
        assert_eq!(wrapped.pixel_changed(), Some(&event()));
        assert!(matches!(
            wrapped,
            LedgerEvent::PixelChanged { program_id, slot: 9, .. } if program_id == program
        ));
    }
}
