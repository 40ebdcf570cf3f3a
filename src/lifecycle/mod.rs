//! # System Lifecycle
//!
//! Starting, wiring and stopping the booking system.
//!
//! - [`BookingSystem`] creates both actors, spawns them, hands their clients to
//!   the [`BookingService`](crate::saga::BookingService) and owns the task handles.
//! - [`ExpirySweeper`] is the periodic reconciliation pass over unpaid bookings.
//! - [`setup_tracing`] installs the subscriber.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop the sweeper** - it holds client clones, so it goes first
//! 2. **Drop all clients** - closes the sender side of the actors' channels
//! 3. **Actors detect closure** - `receiver.recv()` returns `None` after the queue drains
//! 4. **Await completion** - wait for all actor tasks to finish
//!
//! Neither actor holds a client of the other in its context, so the dependency
//! graph is acyclic and channel closure is enough.

pub mod booking_system;
pub mod sweeper;
pub mod tracing;

pub use booking_system::*;
pub use sweeper::*;
pub use self::tracing::setup_tracing;
