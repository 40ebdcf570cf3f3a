use crate::clients::{BookingStoreClient, LedgerClient};
use crate::collaborators::{LogNotifier, Notifier, PaymentGateway, SimulatedPaymentGateway};
use crate::config::Config;
use crate::lifecycle::ExpirySweeper;
use crate::saga::BookingService;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running booking system: both actors, the saga service wired to them and
/// the optional expiry sweeper.
///
/// # Example
///
/// ```ignore
/// let system = BookingSystem::new(Config::from_env());
/// let area = system.ledger.create_seat_area(params).await?;
/// let booking = system.service.create_booking(user, session, area, 2).await?;
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    /// The Booking Orchestrator. Clone it into request tasks.
    pub service: BookingService,

    /// Direct access to the Inventory Ledger (seat-area setup, inspection).
    pub ledger: LedgerClient,

    /// Direct access to the Order Store.
    pub store: BookingStoreClient,

    sweeper: Option<(watch::Sender<bool>, JoinHandle<()>)>,

    /// Task handles for the actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl BookingSystem {
    /// Starts the system with the simulated payment gateway and the log notifier.
    pub fn new(config: Config) -> Self {
        let payments = Arc::new(SimulatedPaymentGateway::new(config.payment.latency()));
        Self::with_collaborators(config, payments, Arc::new(LogNotifier::new()))
    }

    /// Starts the system with caller-supplied collaborators.
    pub fn with_collaborators(
        config: Config,
        payments: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let buffer = config.booking.actor_buffer_size.max(1);

        // 1. Create actors
        let (ledger_actor, ledger) = crate::ledger_actor::new(buffer);
        let (booking_actor, store) = crate::booking_actor::new(buffer);

        // 2. Start actors (no dependencies, Context = ())
        let handles = vec![tokio::spawn(ledger_actor.run(())), tokio::spawn(booking_actor.run(()))];

        // 3. Wire the saga
        let service = BookingService::new(
            ledger.clone(),
            store.clone(),
            payments,
            notifier,
            config.booking.clone(),
        );

        let sweeper = config.sweeper.enabled.then(|| {
            let (sweeper, stop) = ExpirySweeper::new(ledger.clone(), store.clone(), config.sweeper.interval());
            (stop, tokio::spawn(sweeper.run()))
        });

        info!(buffer, sweeper = sweeper.is_some(), "Booking system started");
        Self { service, ledger, store, sweeper, handles }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// The sweeper holds client clones, so it is stopped and awaited first.
    /// Dropping the remaining clients then closes the actors' channels.
    /// Clones of [`BookingService`] still alive elsewhere keep the actors
    /// running, and this call waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        if let Some((stop, handle)) = self.sweeper {
            let _ = stop.send(true);
            if let Err(e) = handle.await {
                error!("Sweeper task failed: {:?}", e);
                return Err(format!("Sweeper task failed: {:?}", e));
            }
        }

        drop(self.service);
        drop(self.ledger);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
