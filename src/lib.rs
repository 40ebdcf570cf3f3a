//! # Seat Booking
//!
//! Sells a bounded number of seats per seat area to many concurrent buyers
//! without overselling, across two independently owned services and no
//! distributed transaction.
//!
//! ## Design
//!
//! ### Resource actors
//! The Inventory Ledger and the Order Store are each a generic
//! [`ResourceActor`](framework::ResourceActor): a Tokio task that owns its entities
//! and processes messages one at a time. A guarded mutation inside an entity hook
//! is therefore a conditional update against one row. No lock guards a seat counter.
//!
//! ### A saga, not a transaction
//! The [`BookingService`](saga::BookingService) runs the multi-step purchase:
//! availability check, pricing, booking record, seat reservation, and later
//! payment. When a step fails it compensates (cancel the booking, release the
//! seats) once, logs a failed compensation and moves on. The
//! [`ExpirySweeper`](lifecycle::ExpirySweeper) reclaims whatever is left behind.
//!
//! ### Idempotent reservations
//! By default a seat area records which booking holds how many seats, so a
//! repeated reserve or release for the same booking is a no-op. See
//! [`LedgerMode`](model::LedgerMode).
//!
//! ## Module Tour
//!
//! - [`framework`] - generic actor, client, and test doubles
//! - [`model`] - [`SeatArea`](model::SeatArea), [`Booking`](model::Booking), ids, money, queries
//! - [`ledger_actor`], [`booking_actor`] - the two services as actors
//! - [`clients`] - typed clients over the actors' channels
//! - [`collaborators`] - payment confirmation and notification dispatch
//! - [`saga`] - the Booking Orchestrator
//! - [`lifecycle`] - wiring, shutdown, expiry sweeper, tracing
//! - [`config`] - `BOOKING_*` environment configuration
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod booking_actor;
pub mod clients;
pub mod collaborators;
pub mod config;
pub mod framework;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod saga;
