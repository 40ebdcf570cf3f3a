//! [`ActorEntity`] implementation for [`SeatArea`].
//!
//! The actor drains its channel one message at a time, so each `Reserve` and
//! `Release` below is a single conditional update on one seat area: whichever
//! request is dequeued first wins, later ones see the reduced count.

use super::actions::{LedgerAction, LedgerActionResult};
use super::error::LedgerError;
use crate::framework::ActorEntity;
use crate::model::{SeatArea, SeatAreaCreate, SeatAreaId, SessionId};
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for SeatArea {
    type Id = SeatAreaId;
    type Create = SeatAreaCreate;
    // Seat counts move only through actions.
    type Update = Infallible;
    type Action = LedgerAction;
    type ActionResult = LedgerActionResult;
    type Query = SessionId;
    type Context = ();
    type Error = LedgerError;

    fn from_create_params(id: SeatAreaId, params: SeatAreaCreate) -> Result<Self, LedgerError> {
        Ok(SeatArea::new(id, params))
    }

    fn matches(&self, session_id: &SessionId) -> bool {
        self.session_id == *session_id
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), LedgerError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: LedgerAction,
        _ctx: &(),
    ) -> Result<LedgerActionResult, LedgerError> {
        match action {
            LedgerAction::CheckAvailability { session_id, quantity } => {
                self.ensure_session(session_id)?;
                let availability = self.availability(quantity);
                debug!(seat_area = %self.id, quantity, available = availability.available_seats, "Checked");
                Ok(LedgerActionResult::CheckAvailability(availability))
            }
            LedgerAction::Reserve { session_id, quantity, order_id } => {
                self.ensure_session(session_id)?;
                ensure_quantity(quantity)?;
                let outcome = self.reserve(order_id, quantity);
                info!(
                    seat_area = %self.id,
                    %order_id,
                    quantity,
                    ?outcome,
                    available = self.available_seats,
                    "Reserve"
                );
                Ok(LedgerActionResult::Reserve(outcome))
            }
            LedgerAction::Release { session_id, quantity, order_id } => {
                self.ensure_session(session_id)?;
                ensure_quantity(quantity)?;
                let outcome = self.release(order_id, quantity);
                info!(
                    seat_area = %self.id,
                    %order_id,
                    quantity,
                    ?outcome,
                    available = self.available_seats,
                    "Release"
                );
                Ok(LedgerActionResult::Release(outcome))
            }
        }
    }
}

impl SeatArea {
    fn ensure_session(&self, session_id: SessionId) -> Result<(), LedgerError> {
        if self.session_id == session_id {
            Ok(())
        } else {
            Err(LedgerError::WrongSession { seat_area: self.id, session: session_id })
        }
    }
}

fn ensure_quantity(quantity: u32) -> Result<(), LedgerError> {
    if quantity == 0 {
        return Err(LedgerError::InvalidQuantity(quantity));
    }
    Ok(())
}
