//! Demo: one seat area, a paid booking and a declined one.

use rust_decimal::Decimal;
use seat_booking::config::Config;
use seat_booking::lifecycle::{setup_tracing, BookingSystem};
use seat_booking::model::{LedgerMode, SeatAreaCreate, SessionId, UserId};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::from_env();
    setup_tracing(&config.log);

    info!("Starting booking system");
    let system = BookingSystem::new(config);
    let session = SessionId(1);

    let area = system
        .ledger
        .create_seat_area(SeatAreaCreate {
            session_id: session,
            name: "Stalls".to_string(),
            price: Decimal::new(5000, 2),
            total_seats: 10,
            mode: LedgerMode::Keyed,
        })
        .await
        .map_err(|e| e.to_string())?;

    // Happy path
    let alice = UserId(1);
    let receipt = async {
        let booking = system
            .service
            .create_booking(alice, session, area, 2)
            .await
            .map_err(|e| e.to_string())?;
        info!(order_no = %booking.order_no, total = %booking.total_amount, "Booking held");
        system
            .service
            .process_payment(booking.id, alice, "card")
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("alice"))
    .await?;
    info!(?receipt, "Alice paid");

    // Declined payment releases the seats again
    let bob = UserId(2);
    let receipt = async {
        let booking = system
            .service
            .create_booking(bob, session, area, 3)
            .await
            .map_err(|e| e.to_string())?;
        system
            .service
            .process_payment(booking.id, bob, "fail")
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("bob"))
    .await?;
    info!(?receipt, "Bob's payment failed");

    let seats = system.ledger.seat_area(area).await.map_err(|e| e.to_string())?;
    info!(available = seats.available_seats, total = seats.total_seats, "Final inventory");

    system.shutdown().await
}
