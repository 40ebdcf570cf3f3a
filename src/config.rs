//! Configuration for the booking system.
//!
//! Loaded from `BOOKING_*` environment variables with defaults for everything,
//! then handed to [`BookingSystem`](crate::lifecycle::BookingSystem) explicitly.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_RESERVATION_TTL_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub booking: BookingConfig,
    pub payment: PaymentConfig,
    pub sweeper: SweeperConfig,
    pub log: LogConfig,
}

/// Saga and store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long an unpaid booking holds its seats, in seconds (default: 900)
    pub reservation_ttl_secs: u64,
    /// Order numbers tried before giving up on a create (default: 3)
    pub order_no_attempts: u32,
    /// Channel capacity of each actor (default: 32)
    pub actor_buffer_size: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reservation_ttl_secs: DEFAULT_RESERVATION_TTL_SECS,
            order_no_attempts: 3,
            actor_buffer_size: 32,
        }
    }
}

impl BookingConfig {
    /// Values chrono cannot represent fall back to the default TTL.
    pub fn reservation_ttl(&self) -> chrono::Duration {
        i64::try_from(self.reservation_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_RESERVATION_TTL_SECS as i64))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Simulated gateway latency in milliseconds (default: 500)
    pub latency_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self { latency_ms: 500 }
    }
}

impl PaymentConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Expiry sweeper settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweeperConfig {
    pub enabled: bool,
    /// Seconds between passes (default: 30)
    pub interval_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self { enabled: true, interval_secs: 30 }
    }
}

impl SweeperConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info")
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            booking: BookingConfig {
                reservation_ttl_secs: env_or(
                    "BOOKING_RESERVATION_TTL_SECS",
                    defaults.booking.reservation_ttl_secs,
                ),
                order_no_attempts: env_or("BOOKING_ORDER_NO_ATTEMPTS", defaults.booking.order_no_attempts),
                actor_buffer_size: env_or("BOOKING_ACTOR_BUFFER_SIZE", defaults.booking.actor_buffer_size),
            },
            payment: PaymentConfig {
                latency_ms: env_or("BOOKING_PAYMENT_LATENCY_MS", defaults.payment.latency_ms),
            },
            sweeper: SweeperConfig {
                enabled: env_or("BOOKING_SWEEPER_ENABLED", defaults.sweeper.enabled),
                interval_secs: env_or("BOOKING_SWEEP_INTERVAL_SECS", defaults.sweeper.interval_secs),
            },
            log: LogConfig {
                filter: env::var("BOOKING_LOG").unwrap_or(defaults.log.filter),
            },
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.booking.reservation_ttl(), chrono::Duration::minutes(15));
        assert_eq!(config.booking.order_no_attempts, 3);
        assert_eq!(config.payment.latency(), Duration::from_millis(500));
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_from_env_overrides_and_falls_back() {
        env::set_var("BOOKING_ORDER_NO_ATTEMPTS", "5");
        env::set_var("BOOKING_PAYMENT_LATENCY_MS", "not-a-number");
        env::set_var("BOOKING_SWEEPER_ENABLED", "false");

        let config = Config::from_env();
        assert_eq!(config.booking.order_no_attempts, 5);
        assert_eq!(config.payment.latency_ms, 500);
        assert!(!config.sweeper.enabled);

        env::remove_var("BOOKING_ORDER_NO_ATTEMPTS");
        env::remove_var("BOOKING_PAYMENT_LATENCY_MS");
        env::remove_var("BOOKING_SWEEPER_ENABLED");
    }

    #[test]
    fn test_out_of_range_ttl_falls_back_to_default() {
        for secs in [10_000_000_000_000_000, u64::MAX] {
            let booking = BookingConfig { reservation_ttl_secs: secs, ..BookingConfig::default() };
            assert_eq!(booking.reservation_ttl(), chrono::Duration::minutes(15));
        }

        // Representable, even if no deadline can be built from it.
        let booking = BookingConfig { reservation_ttl_secs: 9_000_000_000_000_000, ..BookingConfig::default() };
        assert_eq!(booking.reservation_ttl(), chrono::Duration::seconds(9_000_000_000_000_000));
    }

    #[test]
    fn test_sweep_interval_never_zero() {
        let sweeper = SweeperConfig { enabled: true, interval_secs: 0 };
        assert_eq!(sweeper.interval(), Duration::from_secs(1));
    }
}
