use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use dashmap::DashMap;
use tracing::debug;

use crate::models::Account;
use crate::storage::{AccountStore, StorageError, WriteBatch};
use crate::types::AccountId;

/// In-memory document store keyed by account id with a unique email index.
pub struct AccountStorage {
    accounts: DashMap<AccountId, Account>,
    emails: DashMap<String, AccountId>,
    //NOTE: Serializes writers so a batch is checked and applied as one step.
    write_lock: Mutex<()>
}

impl AccountStorage {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            write_lock: Mutex::new(())
        }
    }

    /// Loads every account document from a JSON file written by [`AccountStorage::save`].
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let reader = BufReader::new(File::open(path)?);
        let documents: Vec<Account> = serde_json::from_reader(reader)?;
        let storage = Self::new();

        for account in documents {
            storage.insert(account)?;
        }

        debug!("Loaded [{}] accounts from {}", storage.accounts.len(), path.display());

        Ok(storage)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let mut writer = BufWriter::new(File::create(path)?);

        serde_json::to_writer_pretty(&mut writer, &self.accounts())?;
        writer.flush()?;

        Ok(())
    }

    /// All accounts ordered by email.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|item| item.value().clone()).collect();
        accounts.sort_by(|left, right| left.email.cmp(&right.email));
        accounts
    }

    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_batch(&self, batch: &WriteBatch) -> Result<(), StorageError> {
        let mut seen = HashSet::new();

        for staged in batch.accounts() {
            if !seen.insert(staged.id) {
                return Err(StorageError::DuplicateWrite(staged.id));
            }

            let current = self.accounts.get(&staged.id)
                .ok_or(StorageError::AccountNotFound(staged.id))?;

            if current.version != staged.version {
                return Err(StorageError::VersionConflict {
                    account_id: staged.id,
                    expected: staged.version,
                    found: current.version
                });
            }

            if current.email != staged.email {
                return Err(StorageError::Unavailable(format!("email of account [{}] is immutable", staged.id)));
            }
        }

        Ok(())
    }
}

impl Default for AccountStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for AccountStorage {
    fn find_by_id(&self, account_id: AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.accounts.get(&account_id).map(|item| item.value().clone()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        let Some(account_id) = self.emails.get(email).map(|item| *item.value()) else {
            return Ok(None)
        };

        self.find_by_id(account_id)
    }

    fn insert(&self, account: Account) -> Result<Account, StorageError> {
        let _guard = self.lock_writes();

        if self.emails.contains_key(&account.email) {
            return Err(StorageError::DuplicateEmail(account.email));
        }

        self.emails.insert(account.email.clone(), account.id);
        self.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    fn commit(&self, batch: WriteBatch) -> Result<Vec<Account>, StorageError> {
        let _guard = self.lock_writes();

        self.check_batch(&batch)?;

        let mut committed = Vec::with_capacity(batch.accounts().len());

        for mut account in batch.into_accounts() {
            account.version += 1;
            self.accounts.insert(account.id, account.clone());
            committed.push(account);
        }

        Ok(committed)
    }
}
