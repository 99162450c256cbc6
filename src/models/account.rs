use std::fmt;
use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::errors::TransactionError;
use crate::models::{FixedDeposit, Transaction, TransactionType};
use crate::types::{AccountId, Monetary};

/// A persisted account document.
///
/// Balance, ledger and fixed deposits are only changed through the engine's commit; the
/// `version` counter is bumped by the store on every committed write.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub credential_hash: String,
    pub balance: Monetary,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub fixed_deposits: Vec<FixedDeposit>,
    #[serde(default)]
    pub version: u64
}

impl Account {
    /// Creates an empty account with a zero balance.
    pub fn open(name: impl Into<String>, email: impl Into<String>, credential_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            balance: Monetary::ZERO,
            transactions: Vec::new(),
            fixed_deposits: Vec::new(),
            version: 0
        }
    }

    pub fn credit(&mut self, amount: Monetary, transaction_type: TransactionType) -> Result<(), TransactionError> {
        self.balance = self.balance.checked_add(amount)
            .ok_or_else(|| TransactionError::overflow(self, transaction_type))?;

        Ok(())
    }

    /// Takes `amount` out of the balance. Funds are checked here as well as in the
    /// validator so a debit can never be applied against a stale read.
    pub fn debit(&mut self, amount: Monetary, transaction_type: TransactionType) -> Result<(), TransactionError> {
        if self.balance < amount {
            return Err(TransactionError::insufficient_funds(self, transaction_type, amount));
        }

        self.balance = self.balance.checked_sub(amount)
            .ok_or_else(|| TransactionError::overflow(self, transaction_type))?;

        Ok(())
    }

    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn record_fixed_deposit(&mut self, fixed_deposit: FixedDeposit) {
        self.fixed_deposits.push(fixed_deposit);
    }

    /// The caller-facing view of the account, without the credential hash.
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            balance: self.balance,
            transactions: self.transactions.clone(),
            fixed_deposits: self.fixed_deposits.clone()
        }
    }
}

impl Debug for Account {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("credential_hash", &"<redacted>")
            .field("balance", &self.balance)
            .field("transactions", &self.transactions.len())
            .field("fixed_deposits", &self.fixed_deposits.len())
            .field("version", &self.version)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Monetary,
    pub transactions: Vec<Transaction>,
    pub fixed_deposits: Vec<FixedDeposit>
}
