mod cached_rates;
mod errors;
mod static_rates;

use rust_decimal::Decimal;

pub use cached_rates::CachedRates;
pub use errors::RateError;
pub use static_rates::StaticRates;

/// Source of exchange rates for international transfers, quoted as units of
/// `currency` per unit of the account currency.
pub trait RateProvider: Send + Sync + 'static {
    fn rate(&self, currency: &str) -> Option<Decimal>;
}

/// Quotes 1 for every currency. Used when no rate source is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParityRates;

impl RateProvider for ParityRates {
    fn rate(&self, _currency: &str) -> Option<Decimal> {
        Some(Decimal::ONE)
    }
}

pub(crate) fn normalize_currency(currency: &str) -> String {
    currency.trim().to_ascii_uppercase()
}
