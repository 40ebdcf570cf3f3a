//! Pure data structures managed by the actors, plus the booking query builder.

pub mod booking;
pub mod seat_area;

pub use booking::*;
pub use seat_area::*;
