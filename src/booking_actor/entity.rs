//! [`ActorEntity`] implementation for [`Booking`].
//!
//! The order number is the entity's unique key, so the actor rejects a second
//! booking with the same number before it is stored. Status changes are checked
//! against [`BookingStatus::can_transition_to`] inside the actor, which makes
//! "move from PendingPayment" a conditional update: of two racing callers only
//! the first one dequeued succeeds.

use super::error::BookingStoreError;
use crate::framework::ActorEntity;
use crate::model::{
    line_total, Booking, BookingCreate, BookingId, BookingQuery, BookingStatus, StatusChange,
};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for Booking {
    type Id = BookingId;
    type Create = BookingCreate;
    type Update = StatusChange;
    type Action = ();
    type ActionResult = ();
    type Query = BookingQuery;
    type Context = ();
    type Error = BookingStoreError;

    fn from_create_params(id: BookingId, params: BookingCreate) -> Result<Self, BookingStoreError> {
        if params.quantity == 0 {
            return Err(BookingStoreError::InvalidQuantity(params.quantity));
        }
        let expected = line_total(params.unit_price, params.quantity);
        if params.total_amount != expected {
            return Err(BookingStoreError::TotalMismatch { expected, actual: params.total_amount });
        }

        Ok(Booking {
            id,
            order_no: params.order_no,
            user_id: params.user_id,
            session_id: params.session_id,
            seat_area_id: params.seat_area_id,
            quantity: params.quantity,
            unit_price: params.unit_price,
            total_amount: params.total_amount,
            status: BookingStatus::PendingPayment,
            cancel_reason: None,
            expires_at: params.expires_at,
            paid_at: None,
            cancelled_at: None,
            created_at: params.created_at,
            updated_at: params.created_at,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_no.clone())
    }

    fn matches(&self, query: &BookingQuery) -> bool {
        query.matches(self)
    }

    async fn on_update(&mut self, change: StatusChange, _ctx: &()) -> Result<(), BookingStoreError> {
        if !self.status.can_transition_to(change.to) {
            return Err(BookingStoreError::InvalidTransition { from: self.status, to: change.to });
        }

        let from = self.status;
        self.status = change.to;
        self.updated_at = change.at;
        match change.to {
            BookingStatus::Paid => self.paid_at = Some(change.at),
            BookingStatus::Cancelled => {
                self.cancelled_at = Some(change.at);
                self.cancel_reason = change.reason;
            }
            BookingStatus::PendingPayment => {}
        }

        info!(booking = %self.id, order_no = %self.order_no, %from, to = %self.status, reason = ?self.cancel_reason, "Status changed");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), BookingStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CancelReason, SeatAreaId, SessionId, UserId};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn create(quantity: u32, total: &str) -> BookingCreate {
        let now = Utc::now();
        BookingCreate {
            order_no: "ORD1".into(),
            user_id: UserId(1),
            session_id: SessionId(1),
            seat_area_id: SeatAreaId(1),
            quantity,
            unit_price: "50.00".parse().unwrap(),
            total_amount: total.parse().unwrap(),
            created_at: now,
            expires_at: now + Duration::minutes(15),
        }
    }

    #[test]
    fn test_create_starts_pending() {
        let b = Booking::from_create_params(BookingId(1), create(2, "100.00")).unwrap();
        assert_eq!(b.status, BookingStatus::PendingPayment);
        assert_eq!(b.total_amount, Decimal::new(10000, 2));
        assert_eq!(b.unique_key().as_deref(), Some("ORD1"));
    }

    #[test]
    fn test_create_rejects_zero_quantity_and_bad_total() {
        assert_eq!(
            Booking::from_create_params(BookingId(1), create(0, "0")).unwrap_err(),
            BookingStoreError::InvalidQuantity(0)
        );
        assert!(matches!(
            Booking::from_create_params(BookingId(1), create(2, "99.99")),
            Err(BookingStoreError::TotalMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_terminal_states_refuse_updates() {
        let mut b = Booking::from_create_params(BookingId(1), create(1, "50.00")).unwrap();
        let at = Utc::now();
        b.on_update(StatusChange::cancelled(CancelReason::PaymentDeclined, at), &()).await.unwrap();
        assert_eq!(b.cancelled_at, Some(at));
        assert_eq!(b.cancel_reason, Some(CancelReason::PaymentDeclined));

        let err = b.on_update(StatusChange::paid(Utc::now()), &()).await.unwrap_err();
        assert_eq!(
            err,
            BookingStoreError::InvalidTransition { from: BookingStatus::Cancelled, to: BookingStatus::Paid }
        );
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(b.paid_at.is_none());
    }
}
