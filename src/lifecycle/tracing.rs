//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber: compact, single-line output,
//! no module paths, filtered by `RUST_LOG` when set and by
//! [`LogConfig::filter`] otherwise.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: start and shutdown, with the final store size
//! - **Entity Operations**: Create, Get, List, Update, Delete and Actions, keyed by `entity_type`
//! - **Ledger moves**: every reserve and release with its outcome and the remaining count
//! - **Saga steps**: spans per service call (`create_booking`, `process_payment`) with
//!   compensation failures at `error`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Only the ledger actor's moves
//! RUST_LOG=warn,seat_booking::ledger_actor=info cargo run
//! ```
//!
//! **With `RUST_LOG=info`** the happy path reads:
//!
//! ```text
//! INFO Created entity_type="SeatArea" id=seat_area_1 size=1
//! INFO create_booking: Created entity_type="Booking" id=booking_1 size=1
//! INFO create_booking: Reserve seat_area=seat_area_1 order_id=booking_1 quantity=2 outcome=Reserved available=8
//! INFO create_booking: Booking created booking=booking_1 order_no=ORD17... outcome=Reserved total=100.00
//! INFO process_payment: Payment confirmed booking=booking_1 amount=100.00 transaction_id=txn_1
//! INFO process_payment: Status changed booking=booking_1 from=pending_payment to=paid
//! ```
use crate::config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it twice is harmless.
pub fn setup_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .try_init();
}
