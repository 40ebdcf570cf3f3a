//! Custom actions for the ledger actor.
//!
//! Every action names the session the caller believes the seat area belongs to;
//! a mismatch is answered with [`LedgerError::WrongSession`](super::LedgerError::WrongSession).
//! See [`impl ActorEntity for SeatArea`](crate::model::SeatArea#impl-ActorEntity-for-SeatArea).

use crate::model::{BookingId, SessionId};

pub use crate::model::{Availability, ReleaseOutcome, ReserveOutcome};

#[derive(Debug, Clone)]
pub enum LedgerAction {
    /// Read-only; holds nothing.
    CheckAvailability { session_id: SessionId, quantity: u32 },
    /// Conditional decrement for `order_id`.
    Reserve {
        session_id: SessionId,
        quantity: u32,
        order_id: BookingId,
    },
    /// Conditional increment. Compensation only.
    Release {
        session_id: SessionId,
        quantity: u32,
        order_id: BookingId,
    },
}

/// Results from LedgerActions - variants match 1:1 with LedgerAction
#[derive(Debug, Clone)]
pub enum LedgerActionResult {
    CheckAvailability(Availability),
    Reserve(ReserveOutcome),
    Release(ReleaseOutcome),
}
