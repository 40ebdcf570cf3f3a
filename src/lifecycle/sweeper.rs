//! Reclaims seats held by bookings nobody paid for.
//!
//! Every pass lists `PendingPayment` bookings whose `expires_at` has passed,
//! cancels each one with [`CancelReason::Expired`] and then releases its
//! reservation. The cancel goes first: a booking that was paid in the meantime
//! fails the transition and keeps its seats.

use crate::booking_actor::BookingStoreError;
use crate::clients::{ActorClient, BookingStoreClient, LedgerClient};
use crate::model::{BookingQuery, BookingStatus, CancelReason, ReleaseOutcome, StatusChange};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub cancelled: usize,
    pub released: usize,
    /// Cancelled, but the ledger did not take seats back.
    pub failed: usize,
}

pub struct ExpirySweeper {
    ledger: LedgerClient,
    store: BookingStoreClient,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl ExpirySweeper {
    /// Returns the sweeper and its shutdown sender. Send `true` to stop it.
    /// Intervals under one second are raised to one second.
    pub fn new(
        ledger: LedgerClient,
        store: BookingStoreClient,
        interval: Duration,
    ) -> (Self, watch::Sender<bool>) {
        let (shutdown_tx, shutdown) = watch::channel(false);
        let interval = interval.max(MIN_INTERVAL);
        let sweeper = Self { ledger, store, interval, shutdown };
        (sweeper, shutdown_tx)
    }

    /// Sweeps every `interval` until shut down. Consumes the sweeper so its
    /// clients are dropped on exit.
    pub async fn run(self) {
        info!(interval = ?self.interval, "Expiry sweeper started");
        let mut shutdown = self.shutdown.clone();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        while !*shutdown.borrow() {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.sweep_once(Utc::now()).await {
                        Ok(report) if report.expired > 0 => info!(?report, "Sweep finished"),
                        Ok(_) => debug!("Nothing expired"),
                        Err(e) => error!(error = %e, "Sweep failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!("Expiry sweeper stopped");
    }

    /// One pass over bookings expired at `now`.
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> Result<SweepReport, BookingStoreError> {
        let query = BookingQuery::new()
            .with_status(BookingStatus::PendingPayment)
            .expired_by(now);
        let expired = self.store.list(query).await?;

        let mut report = SweepReport { expired: expired.len(), ..SweepReport::default() };
        for booking in expired {
            let change = StatusChange::cancelled(CancelReason::Expired, now);
            let cancelled = match self.store.transition(booking.id, change).await {
                Ok(cancelled) => cancelled,
                Err(BookingStoreError::InvalidTransition { from, .. }) => {
                    debug!(booking = %booking.id, %from, "Finalized before sweep");
                    continue;
                }
                Err(e) => {
                    warn!(booking = %booking.id, error = %e, "Could not expire booking");
                    continue;
                }
            };
            report.cancelled += 1;

            let released = self
                .ledger
                .release(cancelled.session_id, cancelled.seat_area_id, cancelled.quantity, cancelled.id)
                .await;
            match released {
                Ok(ReleaseOutcome::Released { quantity }) => {
                    info!(booking = %cancelled.id, order_no = %cancelled.order_no, quantity, "Expired booking released");
                    report.released += 1;
                }
                Ok(outcome) => {
                    warn!(booking = %cancelled.id, ?outcome, "Expired booking held no seats");
                    report.failed += 1;
                }
                Err(e) => {
                    error!(booking = %cancelled.id, error = %e, "Release failed: ledger short");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}
