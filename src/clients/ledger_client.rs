//! # Ledger Client
//!
//! High-level API over the seat-area actor. This is the surface the booking saga
//! and the expiry sweeper call, shaped like the inventory RPCs:
//! `CheckAvailability`, `ReserveSeats` and `ReleaseSeats`.
use crate::clients::actor_client::{downcast_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::ledger_actor::{
    Availability, LedgerAction, LedgerActionResult, LedgerError, ReleaseOutcome, ReserveOutcome,
};
use crate::model::{BookingId, SeatArea, SeatAreaCreate, SeatAreaId, SessionId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Reply of `ReserveSeats`/`ReleaseSeats`. Running out of seats is `success = false`,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatsResponse {
    pub success: bool,
    pub message: String,
}

impl From<ReserveOutcome> for SeatsResponse {
    fn from(outcome: ReserveOutcome) -> Self {
        let message = match outcome {
            ReserveOutcome::Reserved => "Seats reserved".to_string(),
            ReserveOutcome::AlreadyHeld { quantity } => {
                format!("Seats already reserved for this order ({quantity})")
            }
            ReserveOutcome::InsufficientSeats { requested, available } => {
                format!("Insufficient seats: requested {requested}, available {available}")
            }
        };
        Self { success: outcome.is_success(), message }
    }
}

impl From<ReleaseOutcome> for SeatsResponse {
    fn from(outcome: ReleaseOutcome) -> Self {
        let message = match outcome {
            ReleaseOutcome::Released { quantity } => format!("Seats released ({quantity})"),
            ReleaseOutcome::NotHeld => "No seats held for this order".to_string(),
            ReleaseOutcome::ExceedsCapacity { quantity } => {
                format!("Releasing {quantity} seats would exceed capacity")
            }
        };
        Self { success: outcome.is_success(), message }
    }
}

/// Client for the Inventory Ledger.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<SeatArea>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<SeatArea>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_seat_area(&self, params: SeatAreaCreate) -> Result<SeatAreaId, LedgerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but absence is an error.
    pub async fn seat_area(&self, id: SeatAreaId) -> Result<SeatArea, LedgerError> {
        self.get(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Seat areas of one session, most expensive first.
    #[instrument(skip(self))]
    pub async fn list_by_session(&self, session_id: SessionId) -> Result<Vec<SeatArea>, LedgerError> {
        let mut areas = self.list(session_id).await?;
        areas.sort_by(|a, b| b.price.cmp(&a.price).then(a.id.0.cmp(&b.id.0)));
        Ok(areas)
    }

    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
    ) -> Result<Availability, LedgerError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(seat_area_id, LedgerAction::CheckAvailability { session_id, quantity })
            .await
            .map_err(Self::map_error)?
        {
            LedgerActionResult::CheckAvailability(availability) => Ok(availability),
            other => Err(unexpected(other)),
        }
    }

    /// Conditional decrement. `InsufficientSeats` comes back as `Ok`.
    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
        order_id: BookingId,
    ) -> Result<ReserveOutcome, LedgerError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(seat_area_id, LedgerAction::Reserve { session_id, quantity, order_id })
            .await
            .map_err(Self::map_error)?
        {
            LedgerActionResult::Reserve(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    /// Conditional increment, bounded by the area's total.
    #[instrument(skip(self))]
    pub async fn release(
        &self,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
        order_id: BookingId,
    ) -> Result<ReleaseOutcome, LedgerError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(seat_area_id, LedgerAction::Release { session_id, quantity, order_id })
            .await
            .map_err(Self::map_error)?
        {
            LedgerActionResult::Release(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    pub async fn reserve_seats(
        &self,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
        order_id: BookingId,
    ) -> Result<SeatsResponse, LedgerError> {
        self.reserve(session_id, seat_area_id, quantity, order_id)
            .await
            .map(SeatsResponse::from)
    }

    pub async fn release_seats(
        &self,
        session_id: SessionId,
        seat_area_id: SeatAreaId,
        quantity: u32,
        order_id: BookingId,
    ) -> Result<SeatsResponse, LedgerError> {
        self.release(session_id, seat_area_id, quantity, order_id)
            .await
            .map(SeatsResponse::from)
    }
}

fn unexpected(result: LedgerActionResult) -> LedgerError {
    warn!(?result, "Mismatched ledger reply");
    LedgerError::ActorCommunicationError(format!("unexpected reply: {result:?}"))
}

#[async_trait]
impl ActorClient<SeatArea> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<SeatArea> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => LedgerError::NotFound(id),
            other => match downcast_entity_error::<LedgerError>(other) {
                Ok(ledger) => ledger,
                Err(other) => LedgerError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}
