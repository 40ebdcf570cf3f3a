//! Payment confirmation.
//!
//! The saga calls [`PaymentGateway::confirm`] once per `ProcessPayment` and
//! blocks on it. [`SimulatedPaymentGateway`] stands in for a real processor.

use crate::model::BookingId;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Payment method that the simulated gateway always declines.
pub const DECLINING_METHOD: &str = "fail";

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub booking_id: BookingId,
    pub amount: Decimal,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub transaction_id: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn confirm(&self, request: PaymentRequest) -> Result<PaymentConfirmation, PaymentError>;
}

/// Sleeps for a fixed latency, then approves every method except [`DECLINING_METHOD`].
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    latency: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn confirm(&self, request: PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
        tokio::time::sleep(self.latency).await;

        if request.method == DECLINING_METHOD {
            info!(booking = %request.booking_id, amount = %request.amount, "Payment declined");
            return Err(PaymentError::Declined("payment failed".to_string()));
        }

        let transaction_id = format!("txn_{}", request.booking_id.0);
        info!(booking = %request.booking_id, amount = %request.amount, %transaction_id, "Payment confirmed");
        Ok(PaymentConfirmation { transaction_id })
    }
}
