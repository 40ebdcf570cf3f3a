use seat_booking::clients::ActorClient;
use seat_booking::config::Config;
use seat_booking::lifecycle::BookingSystem;
use seat_booking::model::{
    BookingQuery, BookingStatus, CancelReason, LedgerMode, SeatAreaCreate, SeatAreaId, SessionId,
    UserId,
};
use seat_booking::saga::BookingError;

fn test_config() -> Config {
    let mut config = Config::default();
    config.payment.latency_ms = 0;
    config.sweeper.enabled = false;
    config
}

async fn start(total: u32) -> (BookingSystem, SeatAreaId) {
    let system = BookingSystem::new(test_config());
    let area = system
        .ledger
        .create_seat_area(SeatAreaCreate {
            session_id: SessionId(1),
            name: "Stalls".into(),
            price: "50.00".parse().unwrap(),
            total_seats: total,
            mode: LedgerMode::Keyed,
        })
        .await
        .expect("Failed to create seat area");
    (system, area)
}

/// Full end-to-end run: book, pay, read back, shut down.
#[tokio::test]
async fn test_full_booking_flow() {
    let (system, area) = start(10).await;
    let user = UserId(1);

    // Scenario 2: price is frozen at creation with exact decimals
    let booking = system
        .service
        .create_booking(user, SessionId(1), area, 2)
        .await
        .expect("Failed to create booking");
    assert_eq!(booking.total_amount.to_string(), "100.00");
    assert_eq!(booking.unit_price.to_string(), "50.00");
    assert_eq!(booking.status, BookingStatus::PendingPayment);
    assert!(booking.order_no.starts_with("ORD"));
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 8);

    let stored = system.service.get_booking(booking.id, user).await.unwrap();
    assert_eq!(stored, booking);

    let receipt = system.service.process_payment(booking.id, user, "card").await.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.message, "Payment processed successfully");
    assert_eq!(receipt.transaction_id, Some(format!("txn_{}", booking.id.0)));

    let paid = system.service.get_booking(booking.id, user).await.unwrap();
    assert_eq!(paid.status, BookingStatus::Paid);
    assert!(paid.paid_at.is_some());
    assert!(paid.cancelled_at.is_none());
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 8);

    system.shutdown().await.expect("Shutdown failed");
}

/// Scenario 3: a declined payment is a successful call with `success = false`.
#[tokio::test]
async fn test_declined_payment_cancels_and_releases() {
    let (system, area) = start(10).await;
    let user = UserId(5);

    let booking = system.service.create_booking(user, SessionId(1), area, 4).await.unwrap();
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 6);

    let receipt = system.service.process_payment(booking.id, user, "fail").await.unwrap();
    assert!(!receipt.success);
    assert_eq!(receipt.message, "payment declined: payment failed");
    assert!(receipt.transaction_id.is_none());

    let cancelled = system.service.get_booking(booking.id, user).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason, Some(CancelReason::PaymentDeclined));
    assert!(cancelled.cancelled_at.is_some());

    let area_after = system.ledger.seat_area(area).await.unwrap();
    assert_eq!(area_after.available_seats, 10);
    assert_eq!(area_after.held_by(booking.id), None);

    system.shutdown().await.unwrap();
}

/// Scenario 4: paying twice fails the second time and changes nothing.
#[tokio::test]
async fn test_second_payment_is_invalid_state() {
    let (system, area) = start(10).await;
    let user = UserId(2);

    let booking = system.service.create_booking(user, SessionId(1), area, 3).await.unwrap();
    system.service.process_payment(booking.id, user, "card").await.unwrap();
    let before = system.service.get_booking(booking.id, user).await.unwrap();

    let err = system.service.process_payment(booking.id, user, "card").await.unwrap_err();
    assert_eq!(err, BookingError::InvalidState(BookingStatus::Paid));

    let after = system.service.get_booking(booking.id, user).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 7);

    // A declined-then-retried payment hits the same wall.
    let other = system.service.create_booking(user, SessionId(1), area, 1).await.unwrap();
    system.service.process_payment(other.id, user, "fail").await.unwrap();
    let err = system.service.process_payment(other.id, user, "card").await.unwrap_err();
    assert_eq!(err, BookingError::InvalidState(BookingStatus::Cancelled));
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 7);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ownership_checks() {
    let (system, area) = start(10).await;
    let owner = UserId(1);
    let stranger = UserId(2);

    let booking = system.service.create_booking(owner, SessionId(1), area, 1).await.unwrap();

    let err = system.service.get_booking(booking.id, stranger).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    let err = system.service.process_payment(booking.id, stranger, "card").await.unwrap_err();
    assert_eq!(err, BookingError::Unauthorized);
    let untouched = system.service.get_booking(booking.id, owner).await.unwrap();
    assert_eq!(untouched.status, BookingStatus::PendingPayment);

    let err = system
        .service
        .process_payment(seat_booking::model::BookingId(999), owner, "card")
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_booking_failures_have_no_side_effects() {
    let (system, area) = start(3).await;
    let user = UserId(1);

    let err = system.service.create_booking(user, SessionId(1), area, 4).await.unwrap_err();
    assert_eq!(err, BookingError::OutOfStock { requested: 4, available: 3 });

    let err = system.service.create_booking(user, SessionId(2), area, 1).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    let err = system
        .service
        .create_booking(user, SessionId(1), SeatAreaId(77), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    let all = system.store.list(BookingQuery::new()).await.unwrap();
    assert!(all.is_empty());
    assert_eq!(system.ledger.seat_area(area).await.unwrap().available_seats, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_list_bookings_is_scoped_and_paginated() {
    let (system, area) = start(50).await;
    let alice = UserId(1);
    let bob = UserId(2);

    let mut alice_ids = Vec::new();
    for _ in 0..12 {
        let b = system.service.create_booking(alice, SessionId(1), area, 1).await.unwrap();
        alice_ids.push(b.id);
    }
    system.service.create_booking(bob, SessionId(1), area, 1).await.unwrap();
    system.service.process_payment(alice_ids[0], alice, "card").await.unwrap();

    // Asking for Bob's bookings as Alice still yields Alice's.
    let page = system
        .service
        .list_bookings(alice, BookingQuery::new().for_user(bob))
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 10);
    assert!(page.items.iter().all(|b| b.user_id == alice));
    assert!(page.items.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let second = system
        .service
        .list_bookings(alice, BookingQuery::new().page(2, 10))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);

    let paid = system
        .service
        .list_bookings(alice, BookingQuery::new().with_status(BookingStatus::Paid))
        .await
        .unwrap();
    assert_eq!(paid.total, 1);
    assert_eq!(paid.items[0].id, alice_ids[0]);

    system.shutdown().await.unwrap();
}
