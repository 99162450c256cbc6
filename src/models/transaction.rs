use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Monetary, TransactionId};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
    Failed
}

/// The discriminant of a ledger entry, as it appears in the `type` field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    FixedDeposit,
    InternationalTransfer,
    BillPayment,
    TaxPayment
}

impl TransactionType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "transfer" => Some(Self::Transfer),
            "fixed_deposit" => Some(Self::FixedDeposit),
            "international_transfer" => Some(Self::InternationalTransfer),
            "bill_payment" => Some(Self::BillPayment),
            "tax_payment" => Some(Self::TaxPayment),
            _ => None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
            Self::FixedDeposit => "fixed_deposit",
            Self::InternationalTransfer => "international_transfer",
            Self::BillPayment => "bill_payment",
            Self::TaxPayment => "tax_payment"
        }
    }

    /// Every type except a deposit takes money out of the requesting account.
    pub fn is_debit(self) -> bool {
        !matches!(self, Self::Deposit)
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedDepositTerms {
    /// Term length in months.
    pub duration: u32,
    /// Annual rate in percent.
    pub interest_rate: Decimal,
    pub maturity_date: DateTime<Utc>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalTransferDetails {
    pub recipient_name: String,
    pub recipient_bank: String,
    pub recipient_country: String,
    pub swift_code: String,
    pub account_number: String,
    pub currency: String,
    pub exchange_rate: Decimal
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    Electricity,
    Water,
    Gas,
    Internet,
    Phone
}

impl BillType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "electricity" => Some(Self::Electricity),
            "water" => Some(Self::Water),
            "gas" => Some(Self::Gas),
            "internet" => Some(Self::Internet),
            "phone" => Some(Self::Phone),
            _ => None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPaymentDetails {
    pub bill_type: BillType,
    pub provider_id: String,
    pub bill_number: String
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    Income,
    Property,
    Sales,
    Corporate
}

impl TaxType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "income" => Some(Self::Income),
            "property" => Some(Self::Property),
            "sales" => Some(Self::Sales),
            "corporate" => Some(Self::Corporate),
            _ => None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPaymentDetails {
    pub tax_type: TaxType,
    pub tax_year: i32,
    pub tax_reference: String
}

/// Per-type payload of a ledger entry.
///
/// Serialized inline with the owning [`Transaction`]: the variant becomes the `type`
/// field, transfers carry `recipientEmail` and the remaining services carry `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer {
        #[serde(rename = "recipientEmail")]
        recipient_email: String
    },
    FixedDeposit {
        metadata: FixedDepositTerms
    },
    InternationalTransfer {
        metadata: InternationalTransferDetails
    },
    BillPayment {
        metadata: BillPaymentDetails
    },
    TaxPayment {
        metadata: TaxPaymentDetails
    }
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Deposit => TransactionType::Deposit,
            Self::Withdrawal => TransactionType::Withdrawal,
            Self::Transfer { .. } => TransactionType::Transfer,
            Self::FixedDeposit { .. } => TransactionType::FixedDeposit,
            Self::InternationalTransfer { .. } => TransactionType::InternationalTransfer,
            Self::BillPayment { .. } => TransactionType::BillPayment,
            Self::TaxPayment { .. } => TransactionType::TaxPayment
        }
    }
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Monetary,
    pub description: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    #[serde(flatten)]
    pub kind: TransactionKind
}

impl Transaction {
    /// Stamps a new entry with a fresh identifier.
    pub fn new(kind: TransactionKind, amount: Monetary, description: String, status: TransactionStatus, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description,
            date,
            status,
            kind
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }
}
