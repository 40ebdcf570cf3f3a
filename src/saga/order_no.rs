//! Human-referenceable order numbers: `ORD` + unix seconds + 8 hex digits.
//!
//! Collisions are possible; the store's unique index catches them and the
//! service retries with a fresh number.

use chrono::{DateTime, Utc};
use rand::Rng;

pub trait OrderNoGenerator: Send + Sync {
    fn generate(&self, now: DateTime<Utc>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampOrderNo;

impl OrderNoGenerator for TimestampOrderNo {
    fn generate(&self, now: DateTime<Utc>) -> String {
        let suffix: u32 = rand::thread_rng().gen();
        format!("ORD{}{:08x}", now.timestamp(), suffix)
    }
}
