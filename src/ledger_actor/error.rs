//! Error types for the Inventory Ledger.

use crate::model::{SeatAreaId, SessionId};
use thiserror::Error;

/// Errors the ledger reports. Running out of seats is not one of them: it is a
/// normal [`ReserveOutcome`](crate::model::ReserveOutcome).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The seat area does not exist.
    #[error("Seat area not found: {0}")]
    NotFound(String),

    /// The seat area exists but belongs to a different session than claimed.
    #[error("Seat area {seat_area} does not belong to {session}")]
    WrongSession { seat_area: SeatAreaId, session: SessionId },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The ledger actor could not be reached or did not answer.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl LedgerError {
    /// Both variants mean "no such seat area in that session" to callers.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_) | LedgerError::WrongSession { .. })
    }
}

impl From<String> for LedgerError {
    fn from(msg: String) -> Self {
        LedgerError::ActorCommunicationError(msg)
    }
}
