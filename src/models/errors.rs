use crate::models::{Account, TransactionRequest, TransactionType};
use crate::storage::StorageError;
use crate::types::{AccountId, Monetary};
use thiserror::Error;

/// Broad classification of a failure, independent of the concrete variant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    InsufficientFunds,
    Conflict,
    Storage
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Amount must be present and positive for [{transaction_type}] requested by [{email}]")]
    InvalidAmount {
        email: String,
        transaction_type: String
    },
    #[error("Fixed deposit of [{amount}] is below the minimum principal of [{minimum}] for [{email}]")]
    BelowMinimumPrincipal {
        email: String,
        amount: Monetary,
        minimum: Monetary
    },
    #[error("Malformed request: {reason}")]
    MalformedRequest {
        reason: String
    },
    #[error("Unknown transaction type [{transaction_type}] requested by [{email}]")]
    UnknownTransactionType {
        email: String,
        transaction_type: String
    },
    #[error("Invalid {transaction_type} data: {reason}")]
    InvalidMetadata {
        transaction_type: TransactionType,
        reason: String
    },
    #[error("Insufficient funds for [{transaction_type}] by [{email}]: balance [{balance}], requested [{requested}]")]
    InsufficientFunds {
        email: String,
        transaction_type: TransactionType,
        balance: Monetary,
        requested: Monetary
    },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Account [{caller}] may not access account [{email}]")]
    Forbidden {
        caller: String,
        email: String
    },
    #[error("User [{email}] not found")]
    AccountNotFound {
        email: String
    },
    #[error("Recipient [{email}] not found")]
    RecipientNotFound {
        email: String
    },
    #[error("Email [{email}] is already registered")]
    EmailAlreadyRegistered {
        email: String
    },
    #[error("Invalid account details: {reason}")]
    InvalidAccountDetails {
        reason: String
    },
    #[error("Numeric overflow applying [{transaction_type}] to account [{account_id}]")]
    Overflow {
        account_id: AccountId,
        transaction_type: TransactionType
    },
    #[error(transparent)]
    Storage(#[from] StorageError)
}

impl TransactionError {
    pub fn invalid_amount(email: &str, request: &TransactionRequest) -> Self {
        Self::InvalidAmount {
            email: email.to_string(),
            transaction_type: request.transaction_type.clone()
        }
    }

    pub fn below_minimum_principal(account: &Account, amount: Monetary, minimum: Monetary) -> Self {
        Self::BelowMinimumPrincipal {
            email: account.email.clone(),
            amount,
            minimum
        }
    }

    pub fn malformed_request(reason: impl std::fmt::Display) -> Self {
        Self::MalformedRequest { reason: reason.to_string() }
    }

    pub fn unknown_transaction_type(email: &str, request: &TransactionRequest) -> Self {
        Self::UnknownTransactionType {
            email: email.to_string(),
            transaction_type: request.transaction_type.clone()
        }
    }

    pub fn invalid_metadata(transaction_type: TransactionType, reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            transaction_type,
            reason: reason.into()
        }
    }

    pub fn insufficient_funds(account: &Account, transaction_type: TransactionType, requested: Monetary) -> Self {
        Self::InsufficientFunds {
            email: account.email.clone(),
            transaction_type,
            balance: account.balance,
            requested
        }
    }

    pub fn forbidden(caller: &str, email: &str) -> Self {
        Self::Forbidden {
            caller: caller.to_string(),
            email: email.to_string()
        }
    }

    pub fn account_not_found(email: &str) -> Self {
        Self::AccountNotFound { email: email.to_string() }
    }

    pub fn recipient_not_found(email: &str) -> Self {
        Self::RecipientNotFound { email: email.to_string() }
    }

    pub fn email_already_registered(email: &str) -> Self {
        Self::EmailAlreadyRegistered { email: email.to_string() }
    }

    pub fn invalid_account_details(reason: impl Into<String>) -> Self {
        Self::InvalidAccountDetails { reason: reason.into() }
    }

    pub fn overflow(account: &Account, transaction_type: TransactionType) -> Self {
        Self::Overflow {
            account_id: account.id,
            transaction_type
        }
    }

    /// Machine-readable rejection code reported to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } | Self::BelowMinimumPrincipal { .. } => "INVALID_AMOUNT",
            Self::MalformedRequest { .. } => "INVALID_REQUEST",
            Self::UnknownTransactionType { .. } => "UNKNOWN_TRANSACTION_TYPE",
            Self::InvalidMetadata { .. } => "INVALID_METADATA",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::AccountNotFound { .. } => "USER_NOT_FOUND",
            Self::RecipientNotFound { .. } => "RECIPIENT_NOT_FOUND",
            Self::EmailAlreadyRegistered { .. } => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidAccountDetails { .. } => "INVALID_ACCOUNT_DETAILS",
            Self::Overflow { .. } => "OVERFLOW",
            Self::Storage(_) => "STORAGE_ERROR"
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. }
            | Self::BelowMinimumPrincipal { .. }
            | Self::MalformedRequest { .. }
            | Self::UnknownTransactionType { .. }
            | Self::InvalidMetadata { .. }
            | Self::InvalidAccountDetails { .. }
            | Self::Overflow { .. } => ErrorKind::Validation,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Unauthorized | Self::Forbidden { .. } => ErrorKind::Authorization,
            Self::AccountNotFound { .. } | Self::RecipientNotFound { .. } => ErrorKind::NotFound,
            Self::EmailAlreadyRegistered { .. } => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage
        }
    }

    /// HTTP-style status for the request-handling layer.
    pub fn status(&self) -> u16 {
        match self {
            Self::Forbidden { .. } => 403,
            _ => match self.kind() {
                ErrorKind::Validation | ErrorKind::InsufficientFunds => 400,
                ErrorKind::Authorization => 401,
                ErrorKind::NotFound => 404,
                ErrorKind::Conflict => 409,
                ErrorKind::Storage => 500
            }
        }
    }
}
