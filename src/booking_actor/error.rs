//! Error types for the Order Store.

use crate::model::BookingStatus;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingStoreError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// `total_amount` must equal `unit_price * quantity` when the row is written.
    #[error("Total {actual} does not match unit price times quantity ({expected})")]
    TotalMismatch { expected: Decimal, actual: Decimal },

    /// The order number is already taken.
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNo(String),

    /// The move is not in the transition table, including any move out of a terminal state.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for BookingStoreError {
    fn from(msg: String) -> Self {
        BookingStoreError::ActorCommunicationError(msg)
    }
}
