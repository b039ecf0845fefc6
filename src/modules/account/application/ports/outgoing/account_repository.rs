use crate::modules::account::application::domain::Account;
use async_trait::async_trait;
use uuid::Uuid;

/// Consume-once iteration over every stored account, in no particular order.
pub type AccountCursor = std::vec::IntoIter<Account>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Account not found")]
    NotFound,

    #[error("Account already exists")]
    AlreadyExists,

    #[error("Store operation timed out")]
    Timeout,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Durable access to the `users` collection. Every call is bounded by the
/// implementation's own timeout.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Returns the storage key assigned to the new record.
    async fn insert(&self, account: &Account) -> Result<Uuid, AccountRepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Account, AccountRepositoryError>;

    async fn get_by_username_and_tenant(
        &self,
        username: &str,
        tenant_id: &str,
    ) -> Result<Account, AccountRepositoryError>;

    async fn get_all(&self) -> Result<AccountCursor, AccountRepositoryError>;

    /// Full-document replace keyed by `account.id`.
    async fn update(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Hard delete. `NotFound` when nothing was removed.
    async fn delete(&self, id: Uuid) -> Result<(), AccountRepositoryError>;
}
