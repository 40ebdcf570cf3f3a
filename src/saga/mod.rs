//! The Booking Orchestrator.
//!
//! [`BookingService`] is not an actor: it owns no state besides clients and
//! collaborators, and is cloned into every task that serves a request.

pub mod error;
pub mod order_no;
pub mod service;

pub use error::*;
pub use order_no::*;
pub use service::*;
