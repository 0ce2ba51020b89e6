use crate::types::account::{Account, InsufficientFunds};
use crate::types::bank::{AccountId, Bank};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct StorageError {
    pub reason: String,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Storage error, reason: {}", self.reason)
    }
}

impl Error for StorageError {}

// a transfer can fail on storage grounds (unknown account id) or on domain
// grounds (insufficient funds); callers map them to different responses
#[derive(Debug)]
pub enum TransferError {
    Storage(StorageError),
    Funds(InsufficientFunds),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferError::Storage(err) => err.fmt(f),
            TransferError::Funds(err) => err.fmt(f),
        }
    }
}

impl Error for TransferError {}

impl From<StorageError> for TransferError {
    fn from(err: StorageError) -> TransferError {
        TransferError::Storage(err)
    }
}

pub trait Storage {
    async fn add_account(
        &mut self,
        user_id: &str,
        account: Account,
    ) -> Result<AccountId, StorageError>;

    async fn load_accounts(&self, user_id: &str) -> Result<Vec<Account>, StorageError>;

    async fn load_account(
        &self,
        user_id: &str,
        id: AccountId,
    ) -> Result<Option<Account>, StorageError>;

    async fn transfer(
        &mut self,
        user_id: &str,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}

// implementations

pub struct InmemoryStorage {
    // one bank per user, created lazily and named after its user
    banks: HashMap<String, Bank>,
}

impl InmemoryStorage {
    pub fn new() -> InmemoryStorage {
        InmemoryStorage {
            banks: HashMap::new(),
        }
    }
}

impl Storage for InmemoryStorage {
    async fn add_account(
        &mut self,
        user_id: &str,
        account: Account,
    ) -> Result<AccountId, StorageError> {
        if !self.banks.contains_key(user_id) {
            self.banks.insert(user_id.to_owned(), Bank::new(user_id));
        }
        let bank = self.banks.get_mut(user_id).ok_or(StorageError {
            reason: "conflict, user id not found".to_owned(),
        })?;
        Ok(bank.add_account(account))
    }

    async fn load_accounts(&self, user_id: &str) -> Result<Vec<Account>, StorageError> {
        let maybe_bank = self.banks.get(user_id);
        if let Some(bank) = maybe_bank {
            return Ok(bank.accounts().to_vec());
        } else {
            return Ok(Vec::new());
        }
    }

    async fn load_account(
        &self,
        user_id: &str,
        id: AccountId,
    ) -> Result<Option<Account>, StorageError> {
        Ok(self
            .banks
            .get(user_id)
            .and_then(|bank| bank.account(id).cloned()))
    }

    async fn transfer(
        &mut self,
        user_id: &str,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let bank = self.banks.get_mut(user_id).ok_or(StorageError {
            reason: "no accounts stored for user".to_owned(),
        })?;
        // Bank::transfer expects ids it handed out itself, so screen
        // caller-provided ids here
        let known = bank.accounts().len();
        if source >= known || destination >= known {
            return Err(StorageError {
                reason: format!("unknown account id, bank holds {} accounts", known),
            }
            .into());
        }
        bank.transfer(source, destination, amount)
            .map_err(TransferError::Funds)
    }
}

// cloneable handle for sharing one storage across axum handlers; the single
// lock serializes concurrent transfers, which the domain types do not
#[derive(Clone)]
pub struct SharedInmemoryStorage {
    inner: Arc<RwLock<InmemoryStorage>>,
}

impl SharedInmemoryStorage {
    pub fn new() -> SharedInmemoryStorage {
        SharedInmemoryStorage {
            inner: Arc::new(RwLock::new(InmemoryStorage::new())),
        }
    }
}

impl Storage for SharedInmemoryStorage {
    async fn add_account(
        &mut self,
        user_id: &str,
        account: Account,
    ) -> Result<AccountId, StorageError> {
        self.inner.write().await.add_account(user_id, account).await
    }

    async fn load_accounts(&self, user_id: &str) -> Result<Vec<Account>, StorageError> {
        self.inner.read().await.load_accounts(user_id).await
    }

    async fn load_account(
        &self,
        user_id: &str,
        id: AccountId,
    ) -> Result<Option<Account>, StorageError> {
        self.inner.read().await.load_account(user_id, id).await
    }

    async fn transfer(
        &mut self,
        user_id: &str,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        self.inner
            .write()
            .await
            .transfer(user_id, source, destination, amount)
            .await
    }
}
