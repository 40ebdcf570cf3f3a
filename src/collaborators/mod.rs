//! Adapters to the two services the saga calls but does not own.

pub mod notification;
pub mod payment;

pub use notification::*;
pub use payment::*;
