use crate::model::{SeatAreaId, SessionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for bookings. Also the reservation key held by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub u32);

impl From<u32> for BookingId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "booking_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Booking lifecycle. `Paid` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    Paid,
    Cancelled,
}

impl BookingStatus {
    /// The whole transition table.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::PendingPayment, BookingStatus::Paid)
                | (BookingStatus::PendingPayment, BookingStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, BookingStatus::PendingPayment)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Paid => "paid",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Why a booking ended up `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The ledger refused or could not be reached right after the row was written.
    ReservationFailed,
    PaymentDeclined,
    /// Left unpaid past `expires_at` and reclaimed by the sweeper.
    Expired,
}

/// Price of `quantity` seats at `unit_price`. Exact decimal arithmetic only.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub order_no: String,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub seat_area_id: SeatAreaId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub cancel_reason: Option<CancelReason>,
    pub expires_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Creation payload. `total_amount` is priced by the caller and must equal
/// `line_total(unit_price, quantity)`.
#[derive(Debug, Clone)]
pub struct BookingCreate {
    pub order_no: String,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub seat_area_id: SeatAreaId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The only kind of update a booking accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub to: BookingStatus,
    pub reason: Option<CancelReason>,
    pub at: DateTime<Utc>,
}

impl StatusChange {
    pub fn paid(at: DateTime<Utc>) -> Self {
        Self { to: BookingStatus::Paid, reason: None, at }
    }

    pub fn cancelled(reason: CancelReason, at: DateTime<Utc>) -> Self {
        Self { to: BookingStatus::Cancelled, reason: Some(reason), at }
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter and pagination for listing bookings.
///
/// Every filter is optional; an empty query matches every booking.
/// ```ignore
/// let q = BookingQuery::new().for_user(UserId(7)).with_status(BookingStatus::Paid).page(2, 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingQuery {
    pub user_id: Option<UserId>,
    pub status: Option<BookingStatus>,
    pub expired_at_or_before: Option<DateTime<Utc>>,
    pub page: u32,
    pub page_size: u32,
}

impl BookingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn expired_by(mut self, now: DateTime<Utc>) -> Self {
        self.expired_at_or_before = Some(now);
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.map_or(true, |u| booking.user_id == u)
            && self.status.map_or(true, |s| booking.status == s)
            && self
                .expired_at_or_before
                .map_or(true, |now| booking.is_expired_at(now))
    }

    /// `(page, page_size)` with out-of-range values replaced by 1 and 10.
    pub fn normalized_page(&self) -> (u32, u32) {
        let page = self.page.max(1);
        let page_size = if self.page_size < 1 { DEFAULT_PAGE_SIZE } else { self.page_size };
        (page, page_size)
    }

    /// Sorts newest first and cuts out the requested page.
    pub fn paginate(&self, mut items: Vec<Booking>) -> BookingPage {
        let (page, page_size) = self.normalized_page();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));

        let total = items.len() as u64;
        let total_pages = total.div_ceil(page_size as u64) as u32;
        let skip = (page as usize - 1).saturating_mul(page_size as usize);
        let items = items.into_iter().skip(skip).take(page_size as usize).collect();

        BookingPage { items, total, page, page_size, total_pages }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingPage {
    pub items: Vec<Booking>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(id: u32, user: u32, created_offset_secs: i64) -> Booking {
        let created = Utc::now() + Duration::seconds(created_offset_secs);
        Booking {
            id: BookingId(id),
            order_no: format!("ORD{id}"),
            user_id: UserId(user),
            session_id: SessionId(1),
            seat_area_id: SeatAreaId(1),
            quantity: 1,
            unit_price: Decimal::new(5000, 2),
            total_amount: Decimal::new(5000, 2),
            status: BookingStatus::PendingPayment,
            cancel_reason: None,
            expires_at: created + Duration::minutes(15),
            paid_at: None,
            cancelled_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;
        assert!(PendingPayment.can_transition_to(Paid));
        assert!(PendingPayment.can_transition_to(Cancelled));
        for from in [Paid, Cancelled] {
            for to in [PendingPayment, Paid, Cancelled] {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
        assert!(!PendingPayment.can_transition_to(PendingPayment));
    }

    #[test]
    fn test_line_total_is_exact() {
        let price: Decimal = "50.00".parse().unwrap();
        assert_eq!(line_total(price, 2).to_string(), "100.00");

        let cents: Decimal = "0.10".parse().unwrap();
        assert_eq!(line_total(cents, 3).to_string(), "0.30");
    }

    #[test]
    fn test_booking_serializes_money_as_string() {
        let b = booking(1, 1, 0);
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["total_amount"], "50.00");
        assert_eq!(json["status"], "pending_payment");
    }

    #[test]
    fn test_query_filters() {
        let mut paid = booking(2, 8, 0);
        paid.status = BookingStatus::Paid;
        let pending = booking(1, 7, 0);

        let q = BookingQuery::new().for_user(UserId(7));
        assert!(q.matches(&pending));
        assert!(!q.matches(&paid));

        let q = BookingQuery::new().with_status(BookingStatus::Paid);
        assert!(q.matches(&paid));
        assert!(!q.matches(&pending));

        let later = pending.expires_at + Duration::seconds(1);
        assert!(BookingQuery::new().expired_by(later).matches(&pending));
        assert!(!BookingQuery::new().expired_by(Utc::now()).matches(&pending));
    }

    #[test]
    fn test_paginate_defaults_and_ordering() {
        let items: Vec<Booking> = (1..=25).map(|i| booking(i, 1, i as i64)).collect();

        let page = BookingQuery::new().paginate(items.clone());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id, BookingId(25));

        let last = BookingQuery::new().page(3, 10).paginate(items.clone());
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[4].id, BookingId(1));

        let beyond = BookingQuery::new().page(9, 10).paginate(items);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 25);
    }
}
