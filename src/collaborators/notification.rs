//! Notification dispatch.
//!
//! Sent after a payment is confirmed. Delivery is never awaited by the saga and
//! a failure here never touches the booking.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReceipt {
    pub message_id: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<NotificationReceipt, NotificationError>;
}

/// Writes each e-mail to the log instead of sending it.
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> Result<NotificationReceipt, NotificationError> {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("msg_{n}");
        info!(
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.body,
            %message_id,
            "Email sent"
        );
        Ok(NotificationReceipt { message_id })
    }
}

/// Sends on a background task. The result is only logged.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let subject = notification.subject.clone();
        match notifier.send(notification).await {
            Ok(receipt) => info!(%subject, message_id = %receipt.message_id, "Notification dispatched"),
            Err(e) => warn!(%subject, error = %e, "Notification failed"),
        }
    })
}
