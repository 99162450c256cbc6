use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{TransactionError, TransactionStatus};
use crate::types::Monetary;

/// A transaction submission as received from the request-handling layer.
///
/// Only the envelope is typed here. `amount` and the metadata values are kept as raw
/// JSON so a wrongly-typed field reaches the validator and is rejected with its own
/// code instead of failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub amount: Option<Value>,
    pub description: String,
    pub status: Option<TransactionStatus>,
    pub metadata: Option<RequestMetadata>,
    pub recipient_email: Option<String>
}

impl TransactionRequest {
    pub fn from_json(value: Value) -> Result<Self, TransactionError> {
        serde_json::from_value(value).map_err(TransactionError::malformed_request)
    }

    /// The amount as money; `None` when missing or not a number.
    pub fn parsed_amount(&self) -> Option<Monetary> {
        match self.amount.as_ref()? {
            Value::Number(number) => number.to_string().parse().ok(),
            Value::String(text) => text.parse().ok(),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestMetadata {
    // fixed_deposit
    pub duration: Option<Value>,
    pub interest_rate: Option<Value>,
    // international_transfer
    pub recipient_name: Option<Value>,
    pub recipient_bank: Option<Value>,
    pub recipient_country: Option<Value>,
    pub swift_code: Option<Value>,
    pub account_number: Option<Value>,
    pub currency: Option<Value>,
    pub exchange_rate: Option<Value>,
    // bill_payment
    pub bill_type: Option<Value>,
    pub provider_id: Option<Value>,
    pub bill_number: Option<Value>,
    // tax_payment
    pub tax_type: Option<Value>,
    pub tax_year: Option<Value>,
    pub tax_reference: Option<Value>
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenAccountRequest {
    pub name: String,
    pub email: String,
    /// Produced and verified by the authentication layer; stored as-is.
    pub credential_hash: Option<String>
}
