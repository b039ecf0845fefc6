use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::domain::Account;
use crate::modules::account::application::ports::outgoing::{
    AccountCursor, AccountRepository, AccountRepositoryError,
};

/// Account store kept in a map. Behaves like the Postgres repository for the
/// lookups the service relies on.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
    failure: Mutex<Option<AccountRepositoryError>>,
}

impl InMemoryAccountRepository {
    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: AccountRepositoryError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn mark_logically_deleted(&self, id: Uuid) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(&id) {
            account.is_logical_deleted = true;
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<(), AccountRepositoryError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<Uuid, AccountRepositoryError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        let taken = accounts.values().any(|a| {
            a.is_live() && a.username == account.username && a.tenant_id == account.tenant_id
        });
        if taken || accounts.contains_key(&account.id) {
            return Err(AccountRepositoryError::AlreadyExists);
        }
        accounts.insert(account.id, account.clone());
        Ok(account.id)
    }

    async fn get(&self, id: Uuid) -> Result<Account, AccountRepositoryError> {
        self.check_failure()?;
        self.accounts
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(AccountRepositoryError::NotFound)
    }

    async fn get_by_username_and_tenant(
        &self,
        username: &str,
        tenant_id: &str,
    ) -> Result<Account, AccountRepositoryError> {
        self.check_failure()?;
        let accounts = self.accounts.lock().unwrap();
        let mut matches: Vec<&Account> = accounts
            .values()
            .filter(|a| a.username == username && a.tenant_id == tenant_id)
            .collect();
        // Live records win over logically deleted ones.
        matches.sort_by_key(|a| a.is_logical_deleted);
        matches
            .first()
            .map(|a| (*a).clone())
            .ok_or(AccountRepositoryError::NotFound)
    }

    async fn get_all(&self) -> Result<AccountCursor, AccountRepositoryError> {
        self.check_failure()?;
        let accounts: Vec<Account> = self.accounts.lock().unwrap().values().cloned().collect();
        Ok(accounts.into_iter())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(AccountRepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccountRepositoryError> {
        self.check_failure()?;
        self.accounts
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AccountRepositoryError::NotFound)
    }
}
