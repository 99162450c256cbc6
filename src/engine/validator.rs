use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::models::{
    Account, BillPaymentDetails, BillType, InternationalTransferDetails, RequestMetadata, TaxPaymentDetails, TaxType,
    TransactionError, TransactionRequest, TransactionStatus, TransactionType
};
use crate::types::Monetary;

/// A request that passed every precondition, ready for the applicator.
#[derive(Debug, Clone)]
pub struct ValidatedTransaction {
    pub transaction_type: TransactionType,
    pub amount: Monetary,
    pub description: String,
    pub status: TransactionStatus,
    pub instruction: Instruction
}

/// What the applicator has to do, with every required field already present.
#[derive(Debug, Clone)]
pub enum Instruction {
    Deposit,
    Withdrawal,
    Transfer {
        recipient: Account
    },
    FixedDeposit {
        duration: u32,
        interest_rate: Decimal
    },
    InternationalTransfer {
        payee: ForeignPayee,
        /// Caller-quoted rate; the rate provider is asked when absent.
        exchange_rate: Option<Decimal>
    },
    BillPayment(BillPaymentDetails),
    TaxPayment(TaxPaymentDetails)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignPayee {
    pub recipient_name: String,
    pub recipient_bank: String,
    pub recipient_country: String,
    pub swift_code: String,
    pub account_number: String,
    pub currency: String
}

impl ForeignPayee {
    pub fn quoted_at(self, exchange_rate: Decimal) -> InternationalTransferDetails {
        InternationalTransferDetails {
            recipient_name: self.recipient_name,
            recipient_bank: self.recipient_bank,
            recipient_country: self.recipient_country,
            swift_code: self.swift_code,
            account_number: self.account_number,
            currency: self.currency,
            exchange_rate
        }
    }
}

/// Checks a request against the caller's current state without touching it.
///
/// Rules run in a fixed order: amount, type tag, funds, type-specific metadata, then
/// the transfer recipient and the fixed deposit minimum.
pub struct TransactionValidator {
    minimum_fixed_deposit: Monetary
}

impl TransactionValidator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            minimum_fixed_deposit: config.minimum_fixed_deposit
        }
    }

    /// `recipient` is the account resolved from `recipientEmail`, if any.
    pub fn validate(&self, request: &TransactionRequest, sender: &Account, recipient: Option<&Account>) -> Result<ValidatedTransaction, TransactionError> {
        let amount = match request.parsed_amount() {
            Some(amount) if amount.is_positive() => amount,
            _ => return Err(TransactionError::invalid_amount(&sender.email, request))
        };

        let transaction_type = TransactionType::parse(&request.transaction_type)
            .ok_or_else(|| TransactionError::unknown_transaction_type(&sender.email, request))?;

        if transaction_type.is_debit() && sender.balance < amount {
            return Err(TransactionError::insufficient_funds(sender, transaction_type, amount));
        }

        let empty = RequestMetadata::default();
        let metadata = request.metadata.as_ref().unwrap_or(&empty);

        let instruction = match transaction_type {
            TransactionType::Deposit => Instruction::Deposit,
            TransactionType::Withdrawal => Instruction::Withdrawal,
            TransactionType::Transfer => Self::transfer(request, sender, recipient)?,
            TransactionType::FixedDeposit => self.fixed_deposit(metadata, sender, amount)?,
            TransactionType::InternationalTransfer => Self::international_transfer(metadata)?,
            TransactionType::BillPayment => Self::bill_payment(metadata)?,
            TransactionType::TaxPayment => Self::tax_payment(metadata)?
        };

        Ok(ValidatedTransaction {
            transaction_type,
            amount,
            description: request.description.clone(),
            status: request.status.unwrap_or_default(),
            instruction
        })
    }

    fn transfer(request: &TransactionRequest, sender: &Account, recipient: Option<&Account>) -> Result<Instruction, TransactionError> {
        let transaction_type = TransactionType::Transfer;
        let recipient_email = match request.recipient_email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => email,
            _ => return Err(TransactionError::invalid_metadata(transaction_type, "recipientEmail is required"))
        };

        if recipient_email == sender.email {
            return Err(TransactionError::invalid_metadata(transaction_type, "cannot transfer to the same account"));
        }

        match recipient {
            Some(recipient) if recipient.email == recipient_email => Ok(Instruction::Transfer { recipient: recipient.clone() }),
            _ => Err(TransactionError::recipient_not_found(recipient_email))
        }
    }

    fn fixed_deposit(&self, metadata: &RequestMetadata, sender: &Account, amount: Monetary) -> Result<Instruction, TransactionError> {
        let transaction_type = TransactionType::FixedDeposit;

        let duration = positive_integer(&metadata.duration)
            .and_then(|duration| u32::try_from(duration).ok())
            .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, "duration must be a positive number of months"))?;

        let interest_rate = metadata.interest_rate.as_ref()
            .and_then(decimal)
            .filter(|rate| !rate.is_sign_negative())
            .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, "interestRate must be zero or more"))?;

        if amount < self.minimum_fixed_deposit {
            return Err(TransactionError::below_minimum_principal(sender, amount, self.minimum_fixed_deposit));
        }

        Ok(Instruction::FixedDeposit { duration, interest_rate })
    }

    fn international_transfer(metadata: &RequestMetadata) -> Result<Instruction, TransactionError> {
        let transaction_type = TransactionType::InternationalTransfer;

        let payee = ForeignPayee {
            recipient_name: required(&metadata.recipient_name, transaction_type, "recipientName")?,
            recipient_bank: required(&metadata.recipient_bank, transaction_type, "recipientBank")?,
            recipient_country: required(&metadata.recipient_country, transaction_type, "recipientCountry")?,
            swift_code: required(&metadata.swift_code, transaction_type, "swiftCode")?,
            account_number: required(&metadata.account_number, transaction_type, "accountNumber")?,
            currency: required(&metadata.currency, transaction_type, "currency")?
        };

        let exchange_rate = match &metadata.exchange_rate {
            None | Some(Value::Null) => None,
            Some(rate) => Some(decimal(rate)
                .filter(|rate| *rate > Decimal::ZERO)
                .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, "exchangeRate must be a positive number"))?)
        };

        Ok(Instruction::InternationalTransfer { payee, exchange_rate })
    }

    fn bill_payment(metadata: &RequestMetadata) -> Result<Instruction, TransactionError> {
        let transaction_type = TransactionType::BillPayment;

        let bill_type = required(&metadata.bill_type, transaction_type, "billType")?;
        let bill_type = BillType::parse(&bill_type)
            .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, format!("unsupported billType [{bill_type}]")))?;

        Ok(Instruction::BillPayment(BillPaymentDetails {
            bill_type,
            provider_id: required(&metadata.provider_id, transaction_type, "providerId")?,
            bill_number: required(&metadata.bill_number, transaction_type, "billNumber")?
        }))
    }

    fn tax_payment(metadata: &RequestMetadata) -> Result<Instruction, TransactionError> {
        let transaction_type = TransactionType::TaxPayment;

        let tax_type = required(&metadata.tax_type, transaction_type, "taxType")?;
        let tax_type = TaxType::parse(&tax_type)
            .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, format!("unsupported taxType [{tax_type}]")))?;

        let tax_year = positive_integer(&metadata.tax_year)
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| TransactionError::invalid_metadata(transaction_type, "taxYear must be a positive year"))?;

        Ok(Instruction::TaxPayment(TaxPaymentDetails {
            tax_type,
            tax_year,
            tax_reference: required(&metadata.tax_reference, transaction_type, "taxReference")?
        }))
    }
}

/// A non-blank string, recorded exactly as supplied.
fn required(value: &Option<Value>, transaction_type: TransactionType, field: &str) -> Result<String, TransactionError> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(TransactionError::invalid_metadata(transaction_type, format!("{field} is required")))
        }
        Some(_) => Err(TransactionError::invalid_metadata(transaction_type, format!("{field} must be a string")))
    }
}

//NOTE: Integers only; "6" and 2024.5 are both rejected.
fn positive_integer(value: &Option<Value>) -> Option<i64> {
    value.as_ref()
        .and_then(Value::as_i64)
        .filter(|value| *value > 0)
}

fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
        _ => None
    }
}
