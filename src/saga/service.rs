//! # Booking Service
//!
//! Drives the reservation saga across the ledger and the order store:
//!
//! ```text
//! create_booking:  CheckAvailability -> price -> store.Create -> Reserve
//!                                                     |            |
//!                                                     |       failure: mark Cancelled
//! process_payment: load -> owner/state checks -> PaymentGateway
//!                        success: -> Paid -> notify (fire-and-forget)
//!                        failure: -> Cancelled -> Release
//! ```
//!
//! Nothing here is transactional. Compensation steps are attempted once; a
//! failing compensation is logged and left for the expiry sweeper.

use super::error::BookingError;
use super::order_no::{OrderNoGenerator, TimestampOrderNo};
use crate::booking_actor::BookingStoreError;
use crate::clients::{BookingStoreClient, LedgerClient};
use crate::collaborators::{dispatch, Notification, Notifier, PaymentGateway, PaymentRequest};
use crate::config::BookingConfig;
use crate::framework::ActorEntity;
use crate::ledger_actor::LedgerError;
use crate::model::{
    line_total, Booking, BookingCreate, BookingId, BookingPage, BookingQuery, BookingStatus,
    CancelReason, ReleaseOutcome, ReserveOutcome, SeatAreaId, SessionId, StatusChange, UserId,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Answer to `process_payment` for both payment outcomes; check `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub success: bool,
    pub message: String,
    pub transaction_id: Option<String>,
}

/// Cloneable handle; every caller runs it on its own task.
#[derive(Clone)]
pub struct BookingService {
    ledger: LedgerClient,
    store: BookingStoreClient,
    payments: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
    order_numbers: Arc<dyn OrderNoGenerator>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        ledger: LedgerClient,
        store: BookingStoreClient,
        payments: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
        config: BookingConfig,
    ) -> Self {
        Self {
            ledger,
            store,
            payments,
            notifier,
            order_numbers: Arc::new(TimestampOrderNo),
            config,
        }
    }

    pub fn with_order_numbers(mut self, order_numbers: Arc<dyn OrderNoGenerator>) -> Self {
        self.order_numbers = order_numbers;
        self
    }

    /// Holds `quantity` seats for `user_id` and returns the `PendingPayment` booking.
    #[instrument(skip(self))]
    pub async fn create_booking(
        &self,
        user_id: UserId,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
    ) -> Result<Booking, BookingError> {
        if quantity == 0 {
            return Err(BookingError::InvalidArgument("quantity must be positive".into()));
        }

        let availability = self
            .ledger
            .check_availability(session_id, seat_area_id, quantity)
            .await?;
        if !availability.available {
            info!(available = availability.available_seats, "Not enough seats");
            return Err(BookingError::OutOfStock {
                requested: quantity,
                available: availability.available_seats,
            });
        }

        let unit_price = availability.price;
        let created_at = Utc::now();
        let template = BookingCreate {
            order_no: String::new(),
            user_id,
            session_id,
            seat_area_id,
            quantity,
            unit_price,
            total_amount: line_total(unit_price, quantity),
            created_at,
            expires_at: created_at
                .checked_add_signed(self.config.reservation_ttl())
                .ok_or_else(|| BookingError::Internal("reservation deadline out of range".into()))?,
        };
        let (id, params) = self.persist(template).await?;
        let booking = Booking::from_create_params(id, params)?;

        match self.ledger.reserve(session_id, seat_area_id, quantity, id).await {
            Ok(ReserveOutcome::InsufficientSeats { requested, available }) => {
                self.cancel_unreserved(id).await;
                Err(BookingError::OutOfStock { requested, available })
            }
            Ok(outcome) => {
                info!(booking = %id, order_no = %booking.order_no, ?outcome, total = %booking.total_amount, "Booking created");
                Ok(booking)
            }
            Err(e) => {
                warn!(booking = %id, error = %e, "Reservation failed");
                self.cancel_unreserved(id).await;
                // The reserve may have landed before the reply was lost. A keyed
                // release for a hold that never happened is a no-op.
                if matches!(e, LedgerError::ActorCommunicationError(_)) {
                    self.release_for(&booking).await;
                }
                Err(e.into())
            }
        }
    }

    /// Writes the booking, drawing a new order number on each collision.
    async fn persist(&self, template: BookingCreate) -> Result<(BookingId, BookingCreate), BookingError> {
        let attempts = self.config.order_no_attempts.max(1);
        for attempt in 1..=attempts {
            let params = BookingCreate {
                order_no: self.order_numbers.generate(template.created_at),
                ..template.clone()
            };
            match self.store.create_booking(params.clone()).await {
                Ok(id) => return Ok((id, params)),
                Err(BookingStoreError::DuplicateOrderNo(order_no)) => {
                    warn!(attempt, %order_no, "Order number collision");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(BookingError::Internal(format!(
            "no unique order number after {attempts} attempts"
        )))
    }

    /// Compensation for a booking whose seats were never reserved.
    async fn cancel_unreserved(&self, id: BookingId) {
        let change = StatusChange::cancelled(CancelReason::ReservationFailed, Utc::now());
        if let Err(e) = self.store.transition(id, change).await {
            error!(booking = %id, error = %e, "Compensation failed: booking left pending");
        }
    }

    /// Returns the booking if it exists and belongs to `user_id`.
    #[instrument(skip(self))]
    pub async fn get_booking(&self, booking_id: BookingId, user_id: UserId) -> Result<Booking, BookingError> {
        let booking = self.store.booking(booking_id).await?;
        if !booking.is_owned_by(user_id) {
            return Err(BookingError::NotFound(booking_id.to_string()));
        }
        Ok(booking)
    }

    /// Lists the caller's bookings, newest first. Any user filter in `query`
    /// is replaced by `user_id`.
    pub async fn list_bookings(&self, user_id: UserId, query: BookingQuery) -> Result<BookingPage, BookingError> {
        Ok(self.store.query(query.for_user(user_id)).await?)
    }

    /// Confirms payment and finalizes the booking.
    ///
    /// A declined payment is `Ok` with `success = false`: the booking is
    /// cancelled and its seats released.
    #[instrument(skip(self))]
    pub async fn process_payment(
        &self,
        booking_id: BookingId,
        user_id: UserId,
        method: &str,
    ) -> Result<PaymentReceipt, BookingError> {
        let booking = self.store.booking(booking_id).await?;
        if !booking.is_owned_by(user_id) {
            return Err(BookingError::Unauthorized);
        }
        if booking.status != BookingStatus::PendingPayment {
            return Err(BookingError::InvalidState(booking.status));
        }

        let request = PaymentRequest {
            booking_id,
            amount: booking.total_amount,
            method: method.to_string(),
        };
        match self.payments.confirm(request).await {
            Ok(confirmation) => {
                let paid = match self.store.transition(booking_id, StatusChange::paid(Utc::now())).await {
                    Ok(paid) => paid,
                    Err(e @ BookingStoreError::InvalidTransition { .. }) => {
                        error!(booking = %booking_id, error = %e, transaction_id = %confirmation.transaction_id, "Payment confirmed for a booking that is no longer pending");
                        return Err(e.into());
                    }
                    Err(e) => {
                        error!(booking = %booking_id, error = %e, transaction_id = %confirmation.transaction_id, "Payment confirmed but not recorded");
                        return Err(e.into());
                    }
                };

                info!(booking = %booking_id, transaction_id = %confirmation.transaction_id, "Booking paid");
                dispatch(self.notifier.clone(), confirmation_email(&paid));
                Ok(PaymentReceipt {
                    success: true,
                    message: "Payment processed successfully".to_string(),
                    transaction_id: Some(confirmation.transaction_id),
                })
            }
            Err(declined) => {
                info!(booking = %booking_id, reason = %declined, "Payment failed");
                let change = StatusChange::cancelled(CancelReason::PaymentDeclined, Utc::now());
                match self.store.transition(booking_id, change).await {
                    Ok(cancelled) => self.release_for(&cancelled).await,
                    Err(e @ BookingStoreError::InvalidTransition { .. }) => return Err(e.into()),
                    // Seats stay held: releasing them for a booking that may still be
                    // paid would oversell. The sweeper retries once it expires.
                    Err(e) => error!(booking = %booking_id, error = %e, "Compensation failed: booking left pending"),
                }
                Ok(PaymentReceipt {
                    success: false,
                    message: declined.to_string(),
                    transaction_id: None,
                })
            }
        }
    }

    /// Best-effort release of a cancelled booking's seats.
    async fn release_for(&self, booking: &Booking) {
        let released = self
            .ledger
            .release(booking.session_id, booking.seat_area_id, booking.quantity, booking.id)
            .await;
        match released {
            Ok(ReleaseOutcome::Released { quantity }) => {
                info!(booking = %booking.id, quantity, "Seats released");
            }
            Ok(outcome) => warn!(booking = %booking.id, ?outcome, "Nothing released"),
            Err(e) => error!(booking = %booking.id, error = %e, "Release failed: ledger short"),
        }
    }
}

fn confirmation_email(booking: &Booking) -> Notification {
    Notification {
        to: format!("{}@example.com", booking.user_id),
        subject: "Booking Confirmed".to_string(),
        body: format!(
            "Your booking {} has been confirmed. Total paid: {}",
            booking.order_no, booking.total_amount
        ),
    }
}
