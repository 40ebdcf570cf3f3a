use seat_booking::clients::LedgerClient;
use seat_booking::ledger_actor::{self, LedgerError, ReleaseOutcome, ReserveOutcome};
use seat_booking::model::{BookingId, LedgerMode, SeatAreaCreate, SeatAreaId, SessionId};
use std::sync::Arc;
use tokio::sync::Barrier;

async fn ledger_with(total: u32, mode: LedgerMode) -> (LedgerClient, SeatAreaId) {
    let (actor, ledger) = ledger_actor::new(64);
    tokio::spawn(actor.run(()));
    let id = ledger
        .create_seat_area(SeatAreaCreate {
            session_id: SessionId(1),
            name: "Floor".into(),
            price: "50.00".parse().unwrap(),
            total_seats: total,
            mode,
        })
        .await
        .unwrap();
    (ledger, id)
}

/// Scenario 1
#[tokio::test]
async fn test_sell_out_then_refuse() {
    let (ledger, area) = ledger_with(10, LedgerMode::Keyed).await;

    let reply = ledger.reserve_seats(SessionId(1), area, 10, BookingId(1)).await.unwrap();
    assert!(reply.success);
    assert_eq!(reply.message, "Seats reserved");
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 0);

    let outcome = ledger.reserve(SessionId(1), area, 1, BookingId(2)).await.unwrap();
    assert_eq!(outcome, ReserveOutcome::InsufficientSeats { requested: 1, available: 0 });
}

#[tokio::test]
async fn test_check_availability_reports_price_and_count() {
    let (ledger, area) = ledger_with(4, LedgerMode::Keyed).await;

    let check = ledger.check_availability(SessionId(1), area, 4).await.unwrap();
    assert!(check.available);
    assert_eq!(check.available_seats, 4);
    assert_eq!(check.price.to_string(), "50.00");

    let check = ledger.check_availability(SessionId(1), area, 5).await.unwrap();
    assert!(!check.available);
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 4);
}

#[tokio::test]
async fn test_wrong_session_and_unknown_area_are_not_found() {
    let (ledger, area) = ledger_with(4, LedgerMode::Keyed).await;

    let err = ledger.check_availability(SessionId(9), area, 1).await.unwrap_err();
    assert_eq!(err, LedgerError::WrongSession { seat_area: area, session: SessionId(9) });
    assert!(err.is_not_found());

    let err = ledger.reserve(SessionId(9), area, 1, BookingId(1)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 4);

    let err = ledger.check_availability(SessionId(1), SeatAreaId(42), 1).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_zero_quantity_rejected() {
    let (ledger, area) = ledger_with(4, LedgerMode::Keyed).await;
    let err = ledger.reserve(SessionId(1), area, 0, BookingId(1)).await.unwrap_err();
    assert_eq!(err, LedgerError::InvalidQuantity(0));
}

/// No-oversell: concurrent reservers never get more than capacity between them.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reserves_never_oversell() {
    let (ledger, area) = ledger_with(25, LedgerMode::Keyed).await;
    let barrier = Arc::new(Barrier::new(40));

    let tasks: Vec<_> = (0..40u32)
        .map(|i| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                let qty = i % 3 + 1;
                let outcome = ledger.reserve(SessionId(1), area, qty, BookingId(i)).await.unwrap();
                (qty, outcome)
            })
        })
        .collect();

    let mut granted = 0;
    for task in tasks {
        let (qty, outcome) = task.await.unwrap();
        if outcome == ReserveOutcome::Reserved {
            granted += qty;
        }
    }

    let seats = ledger.seat_area(area).await.unwrap();
    assert!(granted <= 25);
    assert_eq!(seats.available_seats, 25 - granted);
}

/// Conservation: release after reserve restores the count.
#[tokio::test]
async fn test_release_restores_count() {
    for mode in [LedgerMode::Keyed, LedgerMode::CounterOnly] {
        let (ledger, area) = ledger_with(10, mode).await;
        ledger.reserve(SessionId(1), area, 6, BookingId(1)).await.unwrap();

        let outcome = ledger.release(SessionId(1), area, 6, BookingId(1)).await.unwrap();
        assert_eq!(outcome, ReleaseOutcome::Released { quantity: 6 });
        assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 10);

        let reply = ledger.release_seats(SessionId(1), area, 6, BookingId(1)).await.unwrap();
        match mode {
            LedgerMode::Keyed => assert_eq!(reply.message, "No seats held for this order"),
            LedgerMode::CounterOnly => assert!(!reply.success),
        }
        assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 10);
    }
}

/// Documented bare-counter behavior: the same order reserving twice takes 2q.
#[tokio::test]
async fn test_counter_only_reserve_is_not_idempotent() {
    let (ledger, area) = ledger_with(10, LedgerMode::CounterOnly).await;

    ledger.reserve(SessionId(1), area, 3, BookingId(7)).await.unwrap();
    let second = ledger.reserve(SessionId(1), area, 3, BookingId(7)).await.unwrap();

    assert_eq!(second, ReserveOutcome::Reserved);
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 4);
}

#[tokio::test]
async fn test_keyed_reserve_is_idempotent() {
    let (ledger, area) = ledger_with(10, LedgerMode::Keyed).await;

    ledger.reserve(SessionId(1), area, 3, BookingId(7)).await.unwrap();
    let second = ledger.reserve_seats(SessionId(1), area, 3, BookingId(7)).await.unwrap();
    assert!(second.success);
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 7);

    ledger.release(SessionId(1), area, 3, BookingId(7)).await.unwrap();
    let again = ledger.release(SessionId(1), area, 3, BookingId(7)).await.unwrap();
    assert_eq!(again, ReleaseOutcome::NotHeld);
    assert_eq!(ledger.seat_area(area).await.unwrap().available_seats, 10);
}

#[tokio::test]
async fn test_list_by_session_orders_by_price() {
    let (actor, ledger) = ledger_actor::new(8);
    tokio::spawn(actor.run(()));
    for (session, name, price) in [(1, "Balcony", "30.00"), (1, "VIP", "120.00"), (2, "Other", "99.00"), (1, "Stalls", "50.00")] {
        ledger
            .create_seat_area(SeatAreaCreate {
                session_id: SessionId(session),
                name: name.into(),
                price: price.parse().unwrap(),
                total_seats: 10,
                mode: LedgerMode::Keyed,
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = ledger
        .list_by_session(SessionId(1))
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["VIP", "Stalls", "Balcony"]);
}
