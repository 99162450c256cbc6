use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::EngineConfig;
use crate::engine::validator::{Instruction, ValidatedTransaction};
use crate::models::{
    Account, FixedDeposit, FixedDepositTerms, Transaction, TransactionError, TransactionKind, TransactionStatus
};
use crate::rates::RateProvider;
use crate::storage::WriteBatch;

/// End of a fixed deposit term: `duration` months of `days_per_month` days each.
pub fn maturity_date(start: DateTime<Utc>, duration: u32, days_per_month: u32) -> Option<DateTime<Utc>> {
    let days = i64::from(duration).checked_mul(i64::from(days_per_month))?;

    TimeDelta::try_days(days).and_then(|term| start.checked_add_signed(term))
}

/// Turns a validated request into staged account documents.
///
/// Nothing here is persisted: the returned batch holds every touched account with its
/// new balance and ledger, and is committed by the caller in one step.
pub struct TransactionApplicator {
    rates: Arc<dyn RateProvider>,
    days_per_month: u32
}

impl TransactionApplicator {
    pub fn new(rates: Arc<dyn RateProvider>, config: &EngineConfig) -> Self {
        Self {
            rates,
            days_per_month: config.days_per_month
        }
    }

    pub fn apply(&self, validated: ValidatedTransaction, mut sender: Account, requested_at: DateTime<Utc>) -> Result<WriteBatch, TransactionError> {
        let ValidatedTransaction { transaction_type, amount, description, status, instruction } = validated;
        let mut batch = WriteBatch::new();

        let kind = match instruction {
            Instruction::Deposit => {
                sender.credit(amount, transaction_type)?;
                TransactionKind::Deposit
            }
            Instruction::Withdrawal => {
                sender.debit(amount, transaction_type)?;
                TransactionKind::Withdrawal
            }
            Instruction::Transfer { mut recipient } => {
                sender.debit(amount, transaction_type)?;
                recipient.credit(amount, transaction_type)?;
                recipient.record(Transaction::new(
                    TransactionKind::Deposit,
                    amount,
                    format!("Transfer from {}", sender.email),
                    TransactionStatus::Completed,
                    requested_at
                ));

                let recipient_email = recipient.email.clone();
                batch.stage(recipient);

                TransactionKind::Transfer { recipient_email }
            }
            Instruction::FixedDeposit { duration, interest_rate } => {
                let maturity_date = maturity_date(requested_at, duration, self.days_per_month)
                    .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, "duration is too long"))?;

                sender.debit(amount, transaction_type)?;

                TransactionKind::FixedDeposit {
                    metadata: FixedDepositTerms { duration, interest_rate, maturity_date }
                }
            }
            Instruction::InternationalTransfer { payee, exchange_rate } => {
                let exchange_rate = match exchange_rate {
                    Some(rate) => rate,
                    None => self.rates.rate(&payee.currency).ok_or_else(|| {
                        TransactionError::invalid_metadata(transaction_type, format!("no exchange rate available for [{}]", payee.currency))
                    })?
                };

                sender.debit(amount, transaction_type)?;

                TransactionKind::InternationalTransfer { metadata: payee.quoted_at(exchange_rate) }
            }
            Instruction::BillPayment(details) => {
                sender.debit(amount, transaction_type)?;
                TransactionKind::BillPayment { metadata: details }
            }
            Instruction::TaxPayment(details) => {
                sender.debit(amount, transaction_type)?;
                TransactionKind::TaxPayment { metadata: details }
            }
        };

        let transaction = Transaction::new(kind, amount, description, status, requested_at);

        if let TransactionKind::FixedDeposit { metadata } = &transaction.kind {
            sender.record_fixed_deposit(FixedDeposit::open(&transaction, metadata));
        }

        sender.record(transaction);
        batch.stage(sender);

        Ok(batch)
    }
}
