use std::time::Duration;

use rust_decimal::Decimal;

use crate::types::Monetary;

const DEFAULT_MINIMUM_FIXED_DEPOSIT: i64 = 1_000;
const DEFAULT_DAYS_PER_MONTH: u32 = 30;
const DEFAULT_RATE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Tunables for the transaction engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Smallest principal accepted for a fixed deposit.
    pub minimum_fixed_deposit: Monetary,
    /// Length of a deposit "month" when computing maturity dates.
    pub days_per_month: u32,
    /// How long a fetched exchange rate is reused.
    pub rate_cache_ttl: Duration
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            minimum_fixed_deposit: Monetary::new(Decimal::from(DEFAULT_MINIMUM_FIXED_DEPOSIT)),
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            rate_cache_ttl: DEFAULT_RATE_CACHE_TTL
        }
    }
}
