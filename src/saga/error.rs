//! Errors callers of the booking service see.

use crate::booking_actor::BookingStoreError;
use crate::ledger_actor::LedgerError;
use crate::model::BookingStatus;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    /// Session, seat area or booking is absent, or does not match.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("out of stock: requested {requested}, available {available}")]
    OutOfStock { requested: u32, available: u32 },

    /// Payment attempted on a booking that is not `PendingPayment`.
    #[error("invalid booking state for payment: {0}")]
    InvalidState(BookingStatus),

    #[error("booking does not belong to the caller")]
    Unauthorized,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage or transport fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for BookingError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound(_) | LedgerError::WrongSession { .. } => BookingError::NotFound(e.to_string()),
            LedgerError::InvalidQuantity(_) => BookingError::InvalidArgument(e.to_string()),
            LedgerError::ActorCommunicationError(_) => BookingError::Internal(e.to_string()),
        }
    }
}

impl From<BookingStoreError> for BookingError {
    fn from(e: BookingStoreError) -> Self {
        match e {
            BookingStoreError::NotFound(_) => BookingError::NotFound(e.to_string()),
            BookingStoreError::InvalidTransition { from, .. } => BookingError::InvalidState(from),
            BookingStoreError::InvalidQuantity(_) => BookingError::InvalidArgument(e.to_string()),
            BookingStoreError::TotalMismatch { .. }
            | BookingStoreError::DuplicateOrderNo(_)
            | BookingStoreError::ActorCommunicationError(_) => BookingError::Internal(e.to_string()),
        }
    }
}
