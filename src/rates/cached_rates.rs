use std::time::Duration;

use moka::sync::Cache;
use rust_decimal::Decimal;
use tracing::trace;

use crate::rates::{normalize_currency, RateProvider};

const MAX_CACHED_CURRENCIES: u64 = 1_024;

/// Remembers quotes from a slower provider for a fixed time-to-live.
pub struct CachedRates<P: RateProvider> {
    inner: P,
    cache: Cache<String, Decimal>
}

impl<P: RateProvider> CachedRates<P> {
    pub fn new(inner: P, time_to_live: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(MAX_CACHED_CURRENCIES)
                .time_to_live(time_to_live)
                .build()
        }
    }
}

impl<P: RateProvider> RateProvider for CachedRates<P> {
    fn rate(&self, currency: &str) -> Option<Decimal> {
        let currency = normalize_currency(currency);

        if let Some(rate) = self.cache.get(&currency) {
            trace!("Rate cache hit for [{currency}]");
            return Some(rate);
        }

        let rate = self.inner.rate(&currency)?;
        self.cache.insert(currency, rate);

        Some(rate)
    }
}
