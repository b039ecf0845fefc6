use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::modules::account::application::domain::Account;
use crate::modules::account::application::ports::outgoing::{
    AccountCursor, AccountRepository, AccountRepositoryError,
};

use super::sea_orm_entity::accounts::{
    ActiveModel as AccountActiveModel, Column as AccountColumn, Entity as AccountEntity,
    Model as AccountModel,
};

/// Bound applied to every store call unless configured otherwise.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
    op_timeout: Duration,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self::with_timeout(db, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn with_timeout(db: Arc<DatabaseConnection>, op_timeout: Duration) -> Self {
        Self { db, op_timeout }
    }

    /// Runs one store call under the operation timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, AccountRepositoryError>
    where
        F: Future<Output = Result<T, AccountRepositoryError>>,
    {
        tokio::time::timeout(self.op_timeout, call)
            .await
            .map_err(|_| AccountRepositoryError::Timeout)?
    }

    fn to_active_model(account: &Account) -> AccountActiveModel {
        AccountActiveModel {
            id: Set(account.id),
            tenant_id: Set(account.tenant_id.clone()),
            username: Set(account.username.clone()),
            name_key: Set(account.name_key.clone()),
            slug: Set(account.slug.clone()),
            password_digest: Set(account.password_digest.clone()),
            email: Set(account.email.clone()),
            description: Set(account.description.clone()),
            given_name: Set(account.given_name.clone()),
            middle_names: Set(account.middle_names.clone()),
            family_name: Set(account.family_name.clone()),
            is_active: Set(account.is_active),
            is_logical_deleted: Set(account.is_logical_deleted),
            created_by: Set(account.created_by),
            updated_by: Set(account.updated_by),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        }
    }
}

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: model.id,
            name_key: model.name_key,
            slug: model.slug,
            tenant_id: model.tenant_id,
            username: model.username,
            password_digest: model.password_digest,
            email: model.email,
            description: model.description,
            given_name: model.given_name,
            middle_names: model.middle_names,
            family_name: model.family_name,
            is_active: model.is_active,
            is_logical_deleted: model.is_logical_deleted,
            created_by: model.created_by,
            updated_by: model.updated_by,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

fn map_write_error(e: DbErr) -> AccountRepositoryError {
    if matches!(e, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) {
        return AccountRepositoryError::NotFound;
    }
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
    {
        return AccountRepositoryError::AlreadyExists;
    }
    AccountRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn insert(&self, account: &Account) -> Result<Uuid, AccountRepositoryError> {
        let active = Self::to_active_model(account);

        self.bounded(async {
            let inserted = active.insert(&*self.db).await.map_err(map_write_error)?;
            Ok(inserted.id)
        })
        .await
    }

    async fn get(&self, id: Uuid) -> Result<Account, AccountRepositoryError> {
        self.bounded(async {
            AccountEntity::find_by_id(id)
                .one(&*self.db)
                .await
                .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?
                .map(Account::from)
                .ok_or(AccountRepositoryError::NotFound)
        })
        .await
    }

    async fn get_by_username_and_tenant(
        &self,
        username: &str,
        tenant_id: &str,
    ) -> Result<Account, AccountRepositoryError> {
        self.bounded(async {
            // Live rows sort first; logically deleted ones are only returned
            // when nothing live matches.
            AccountEntity::find()
                .filter(AccountColumn::Username.eq(username))
                .filter(AccountColumn::TenantId.eq(tenant_id))
                .order_by_asc(AccountColumn::IsLogicalDeleted)
                .one(&*self.db)
                .await
                .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?
                .map(Account::from)
                .ok_or(AccountRepositoryError::NotFound)
        })
        .await
    }

    async fn get_all(&self) -> Result<AccountCursor, AccountRepositoryError> {
        self.bounded(async {
            let models = AccountEntity::find()
                .all(&*self.db)
                .await
                .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

            Ok(models
                .into_iter()
                .map(Account::from)
                .collect::<Vec<_>>()
                .into_iter())
        })
        .await
    }

    async fn update(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let active = Self::to_active_model(account);

        self.bounded(async {
            active.update(&*self.db).await.map_err(map_write_error)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccountRepositoryError> {
        self.bounded(async {
            let result = AccountEntity::delete_by_id(id)
                .exec(&*self.db)
                .await
                .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

            if result.rows_affected == 0 {
                return Err(AccountRepositoryError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
