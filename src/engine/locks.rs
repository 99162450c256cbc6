use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::types::AccountId;

/// One async mutex per account.
///
/// Locks for several accounts are always taken in ascending id order, so two transfers
/// between the same pair of accounts in opposite directions cannot deadlock.
#[derive(Default)]
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>
}

pub struct AccountGuards {
    _guards: Vec<OwnedMutexGuard<()>>
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, account_ids: &[AccountId]) -> AccountGuards {
        let mut account_ids = account_ids.to_vec();
        account_ids.sort_unstable();
        account_ids.dedup();

        let mut guards = Vec::with_capacity(account_ids.len());

        for account_id in account_ids {
            let lock = self.locks.entry(account_id).or_default().clone();
            guards.push(lock.lock_owned().await);
        }

        AccountGuards { _guards: guards }
    }
}
