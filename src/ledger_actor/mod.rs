//! # Ledger Actor
//!
//! The Inventory Ledger: sole owner of per-seat-area counters.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`SeatArea`]
//! - [`error`] - [`LedgerError`]
//! - [`actions`] - [`LedgerAction`] and [`LedgerActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, ledger) = ledger_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let area = ledger.create_seat_area(SeatAreaCreate { .. }).await?;
//! let reply = ledger.reserve_seats(session, area, 2, booking_id).await?;
//! if !reply.success { /* sold out */ }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::LedgerClient;
use crate::framework::ResourceActor;
use crate::model::SeatArea;

/// Creates a new ledger actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<SeatArea>, LedgerClient) {
    let (actor, inner) = ResourceActor::new(buffer_size);
    (actor, LedgerClient::new(inner))
}
