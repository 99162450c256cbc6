use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::rates::{normalize_currency, RateError, RateProvider};

#[derive(Debug, Deserialize)]
struct RateRow {
    currency: String,
    rate: Decimal
}

/// A fixed table of rates, typically loaded from a `currency,rate` CSV file.
///
/// Currencies missing from the table have no quote.
#[derive(Debug, Default, Clone)]
pub struct StaticRates {
    rates: HashMap<String, Decimal>
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: &str, rate: Decimal) -> Self {
        self.rates.insert(normalize_currency(currency), rate);
        self
    }

    pub fn from_path(path: &Path) -> Result<Self, RateError> {
        let file = File::open(path).map_err(csv::Error::from)?;

        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(reader);
        let mut table = Self::new();

        for result in reader.deserialize::<RateRow>() {
            let row = result?;
            let currency = normalize_currency(&row.currency);

            if currency.is_empty() {
                return Err(RateError::EmptyCurrency);
            }

            if row.rate <= Decimal::ZERO {
                return Err(RateError::NonPositiveRate { currency, rate: row.rate });
            }

            table = table.with_rate(&currency, row.rate);
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

impl RateProvider for StaticRates {
    fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(&normalize_currency(currency)).copied()
    }
}
