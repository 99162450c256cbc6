use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error};

use crate::config::EngineConfig;
use crate::engine::applicator::TransactionApplicator;
use crate::engine::locks::AccountLocks;
use crate::engine::validator::TransactionValidator;
use crate::models::{
    Account, AccountSnapshot, OpenAccountRequest, TransactionError, TransactionRequest, TransactionType
};
use crate::rates::RateProvider;
use crate::storage::{AccountStore, StorageError};
use crate::types::AccountId;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Entry point used by the request-handling layer.
///
/// A submission runs as: caller lookup, lock acquisition, validation against a fresh
/// read, application on staged copies, then a single atomic commit. Requests touching
/// the same account are serialized; requests on unrelated accounts run in parallel.
pub struct BankEngine<S: AccountStore> {
    store: Arc<S>,
    locks: AccountLocks,
    validator: TransactionValidator,
    applicator: TransactionApplicator,
    clock: Clock
}

impl<S: AccountStore> BankEngine<S> {
    pub fn new(store: Arc<S>, rates: Arc<dyn RateProvider>, config: EngineConfig) -> Self {
        Self {
            store,
            locks: AccountLocks::new(),
            validator: TransactionValidator::new(&config),
            applicator: TransactionApplicator::new(rates, &config),
            clock: Arc::new(Utc::now)
        }
    }

    /// Replaces the wall clock used to timestamp transactions.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Registers a new account with a zero balance.
    pub fn open_account(&self, request: OpenAccountRequest) -> Result<AccountSnapshot, TransactionError> {
        let name = request.name.trim();
        let email = request.email.trim();

        if name.is_empty() {
            return Err(TransactionError::invalid_account_details("name is required"));
        }

        if !EMAIL_PATTERN.is_match(email) {
            return Err(TransactionError::invalid_account_details(format!("invalid email format [{email}]")));
        }

        let account = Account::open(name, email, request.credential_hash.unwrap_or_default());

        match self.store.insert(account) {
            Ok(account) => {
                debug!("Opened account [{}] for [{}]", account.id, account.email);
                Ok(account.snapshot())
            }
            Err(StorageError::DuplicateEmail(email)) => Err(TransactionError::email_already_registered(&email)),
            Err(error) => Err(error.into())
        }
    }

    /// Returns an account's snapshot; callers may only read their own account.
    pub fn account(&self, caller: Option<&str>, email: &str) -> Result<AccountSnapshot, TransactionError> {
        let caller = caller.ok_or(TransactionError::Unauthorized)?;

        if caller != email {
            return Err(TransactionError::forbidden(caller, email));
        }

        self.store.find_by_email(email)?
            .map(|account| account.snapshot())
            .ok_or_else(|| TransactionError::account_not_found(email))
    }

    /// Validates and applies one transaction for the authenticated `caller`.
    pub async fn submit(&self, caller: Option<&str>, request: TransactionRequest) -> Result<AccountSnapshot, TransactionError> {
        let result = self.process(caller, &request).await;

        match &result {
            Ok(snapshot) => {
                debug!("Transaction [{}] for [{}] applied, balance [{}]", request.transaction_type, snapshot.email, snapshot.balance);
            }
            Err(error @ TransactionError::Storage(_)) => {
                error!("Transaction [{}] failed: {error}", request.transaction_type);
            }
            Err(error) => {
                debug!("Transaction [{}] rejected [{}]: {error}", request.transaction_type, error.code());
            }
        }

        result
    }

    async fn process(&self, caller: Option<&str>, request: &TransactionRequest) -> Result<AccountSnapshot, TransactionError> {
        let caller = caller.ok_or(TransactionError::Unauthorized)?;

        let sender_id = self.find_id(caller)?
            .ok_or_else(|| TransactionError::account_not_found(caller))?;
        let recipient_id = self.recipient_id(request)?;

        let mut account_ids = vec![sender_id];
        account_ids.extend(recipient_id);

        let _guards = self.locks.acquire(&account_ids).await;

        //NOTE: Re-read under the lock; anything read before it may be stale.
        let sender = self.store.find_by_id(sender_id)?
            .ok_or_else(|| TransactionError::account_not_found(caller))?;
        let recipient = match recipient_id {
            Some(recipient_id) => self.store.find_by_id(recipient_id)?,
            None => None
        };

        let validated = self.validator.validate(request, &sender, recipient.as_ref())?;
        let batch = self.applicator.apply(validated, sender, (self.clock)())?;
        let committed = self.store.commit(batch)?;

        committed.into_iter()
            .find(|account| account.id == sender_id)
            .map(|account| account.snapshot())
            .ok_or_else(|| TransactionError::account_not_found(caller))
    }

    fn find_id(&self, email: &str) -> Result<Option<AccountId>, TransactionError> {
        Ok(self.store.find_by_email(email)?.map(|account| account.id))
    }

    fn recipient_id(&self, request: &TransactionRequest) -> Result<Option<AccountId>, TransactionError> {
        if TransactionType::parse(&request.transaction_type) != Some(TransactionType::Transfer) {
            return Ok(None);
        }

        match request.recipient_email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => self.find_id(email),
            _ => Ok(None)
        }
    }
}
