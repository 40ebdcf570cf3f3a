use crate::model::BookingId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Type-safe identifier for seat areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatAreaId(pub u32);

impl From<u32> for SeatAreaId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SeatAreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat_area_{}", self.0)
    }
}

/// Identifier of the performance a seat area belongs to. Sessions themselves live
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u32);

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// How the ledger treats the order id passed to `Reserve`/`Release`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerMode {
    /// Counter plus a reservation set keyed by order id. Repeated reserves and
    /// releases for the same order are no-ops.
    #[default]
    Keyed,
    /// Bare counter: the order id is only logged, every call moves the count.
    CounterOnly,
}

/// A seat area: one price tier within one session, and the only place seat counts live.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for SeatArea`](#impl-ActorEntity-for-SeatArea) for details on:
/// - Creation parameters ([`SeatAreaCreate`])
/// - Custom actions ([`LedgerAction`](crate::ledger_actor::LedgerAction))
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatArea {
    pub id: SeatAreaId,
    pub session_id: SessionId,
    pub name: String,
    pub price: Decimal,
    pub total_seats: u32,
    pub available_seats: u32,
    pub mode: LedgerMode,
    reservations: HashMap<BookingId, u32>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new seat area. All seats start out available.
#[derive(Debug, Clone)]
pub struct SeatAreaCreate {
    pub session_id: SessionId,
    pub name: String,
    pub price: Decimal,
    pub total_seats: u32,
    pub mode: LedgerMode,
}

/// Answer to an availability check. Nothing is held by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub available_seats: u32,
    pub price: Decimal,
}

/// Result of a conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    /// The order already holds seats here; nothing changed.
    AlreadyHeld { quantity: u32 },
    /// The guard `available >= requested` did not hold. Expected under contention.
    InsufficientSeats { requested: u32, available: u32 },
}

impl ReserveOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ReserveOutcome::InsufficientSeats { .. })
    }
}

/// Result of a conditional increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released { quantity: u32 },
    /// No reservation is recorded for the order; nothing changed.
    NotHeld,
    /// The guard `available + quantity <= total` did not hold.
    ExceedsCapacity { quantity: u32 },
}

impl ReleaseOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ReleaseOutcome::ExceedsCapacity { .. })
    }
}

impl SeatArea {
    /// Creates a fully available seat area.
    pub fn new(id: SeatAreaId, params: SeatAreaCreate) -> Self {
        Self {
            id,
            session_id: params.session_id,
            name: params.name,
            price: params.price,
            total_seats: params.total_seats,
            available_seats: params.total_seats,
            mode: params.mode,
            reservations: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn availability(&self, quantity: u32) -> Availability {
        Availability {
            available: self.available_seats >= quantity,
            available_seats: self.available_seats,
            price: self.price,
        }
    }

    /// Subtracts `quantity` only if that many seats are available.
    pub fn reserve(&mut self, order_id: BookingId, quantity: u32) -> ReserveOutcome {
        if self.mode == LedgerMode::Keyed {
            if let Some(&held) = self.reservations.get(&order_id) {
                return ReserveOutcome::AlreadyHeld { quantity: held };
            }
        }

        if self.available_seats < quantity {
            return ReserveOutcome::InsufficientSeats {
                requested: quantity,
                available: self.available_seats,
            };
        }

        self.available_seats -= quantity;
        if self.mode == LedgerMode::Keyed {
            self.reservations.insert(order_id, quantity);
        }
        ReserveOutcome::Reserved
    }

    /// Adds seats back, never beyond `total_seats`.
    ///
    /// In keyed mode the amount returned is what the order holds, not `quantity`.
    pub fn release(&mut self, order_id: BookingId, quantity: u32) -> ReleaseOutcome {
        let quantity = match self.mode {
            LedgerMode::Keyed => match self.reservations.get(&order_id) {
                Some(&held) => held,
                None => return ReleaseOutcome::NotHeld,
            },
            LedgerMode::CounterOnly => quantity,
        };

        let restored = self.available_seats.checked_add(quantity);
        match restored {
            Some(restored) if restored <= self.total_seats => {
                self.available_seats = restored;
                self.reservations.remove(&order_id);
                ReleaseOutcome::Released { quantity }
            }
            _ => ReleaseOutcome::ExceedsCapacity { quantity },
        }
    }

    /// Seats recorded against `order_id`. Always `None` in counter-only mode.
    pub fn held_by(&self, order_id: BookingId) -> Option<u32> {
        self.reservations.get(&order_id).copied()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }
}
