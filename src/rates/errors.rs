use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Rate table error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Rate table error: rate [{rate}] for [{currency}] must be positive")]
    NonPositiveRate {
        currency: String,
        rate: Decimal
    },
    #[error("Rate table error: currency code is empty")]
    EmptyCurrency
}
