mod account_storage;
mod errors;

use crate::models::Account;
#[cfg(test)]
use crate::models::{FixedDeposit, Transaction};
use crate::types::AccountId;
#[cfg(test)]
use crate::types::Monetary;

pub use account_storage::AccountStorage;
pub use errors::StorageError;

/// Persistence seam for account documents.
///
/// Every write goes through [`AccountStore::commit`], which applies a whole
/// [`WriteBatch`] or nothing. The single-document helpers are expressed on top of it.
pub trait AccountStore: Send + Sync + 'static {
    fn find_by_id(&self, account_id: AccountId) -> Result<Option<Account>, StorageError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError>;
    fn insert(&self, account: Account) -> Result<Account, StorageError>;
    fn commit(&self, batch: WriteBatch) -> Result<Vec<Account>, StorageError>;

    #[cfg(test)]
    fn update_balance(&self, account_id: AccountId, balance: Monetary) -> Result<Option<Account>, StorageError> {
        let Some(mut account) = self.find_by_id(account_id)? else {
            return Ok(None)
        };

        account.balance = balance;

        Ok(self.commit(WriteBatch::single(account))?.pop())
    }

    #[cfg(test)]
    fn append_transaction(&self, account_id: AccountId, transaction: Transaction, fixed_deposit: Option<FixedDeposit>) -> Result<Option<Account>, StorageError> {
        let Some(mut account) = self.find_by_id(account_id)? else {
            return Ok(None)
        };

        account.record(transaction);

        if let Some(fixed_deposit) = fixed_deposit {
            account.record_fixed_deposit(fixed_deposit);
        }

        Ok(self.commit(WriteBatch::single(account))?.pop())
    }
}

/// A set of full-document replacements committed atomically.
///
/// Each staged document still carries the version it was read at; the store rejects
/// the whole batch if any of those versions is stale.
#[derive(Debug, Default)]
pub struct WriteBatch {
    accounts: Vec<Account>
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn single(account: Account) -> Self {
        Self { accounts: vec![account] }
    }

    pub fn stage(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts
    }
}
