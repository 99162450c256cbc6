use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FixedDepositTerms, Transaction};
use crate::types::Monetary;

/// Only `Active` is ever produced by the engine; the other states belong to a
/// maturity process that lives outside this crate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedDepositStatus {
    Active,
    Matured,
    Withdrawn
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedDeposit {
    pub amount: Monetary,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub interest_rate: Decimal,
    pub status: FixedDepositStatus
}

impl FixedDeposit {
    /// Opens the placement recorded by a `fixed_deposit` ledger entry.
    pub fn open(transaction: &Transaction, terms: &FixedDepositTerms) -> Self {
        Self {
            amount: transaction.amount,
            start_date: transaction.date,
            end_date: terms.maturity_date,
            interest_rate: terms.interest_rate,
            status: FixedDepositStatus::Active
        }
    }
}
