//! # Booking Actor
//!
//! The Order Store: durable record of every booking's lifecycle, price and deadline.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Booking`]
//! - [`error`] - [`BookingStoreError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::BookingStoreClient;
use crate::framework::ResourceActor;
use crate::model::Booking;

/// Creates a new booking actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Booking>, BookingStoreClient) {
    let (actor, inner) = ResourceActor::new(buffer_size);
    (actor, BookingStoreClient::new(inner))
}
