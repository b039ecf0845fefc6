use async_trait::async_trait;

use crate::modules::account::application::domain::Account;
use crate::modules::account::application::ports::outgoing::{
    AccountRepositoryError, HashError,
};

/// Replaces passwords in every logged input.
pub const PASSWORD_MASK: &str = "********";

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INTERNAL_ERROR: &str = "Internal server error";

// ========================= Requests =========================

#[derive(Debug, Clone, Default)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub email_confirmation: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct SignOutRequest {
    pub username: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct CancelRequest {
    pub username: String,
    pub password: String,
    pub tenant_id: String,
}

/// Profile fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub username: String,
    pub tenant_id: String,
    pub current_password: String,
    /// Blank keeps the stored digest.
    pub new_password: String,
    pub new_password_confirmation: String,
    pub email: Option<String>,
    pub email_confirmation: Option<String>,
    pub description: Option<String>,
    pub given_name: Option<String>,
    pub middle_names: Option<String>,
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RemoveRequest {
    pub username: String,
    /// Blank skips the email check.
    pub email: String,
    pub tenant_id: String,
}

/// Input summary safe to write to logs.
pub trait Redacted {
    fn redacted(&self) -> String;
}

impl Redacted for SignUpRequest {
    fn redacted(&self) -> String {
        format!(
            "{{{}, {}, {}, {}, {}}}",
            self.username, PASSWORD_MASK, self.email, self.email_confirmation, self.tenant_id
        )
    }
}

impl Redacted for CreateRequest {
    fn redacted(&self) -> String {
        format!(
            "{{{}, {}, {}, {}}}",
            self.username, PASSWORD_MASK, self.email, self.tenant_id
        )
    }
}

impl Redacted for SignInRequest {
    fn redacted(&self) -> String {
        format!("{{{}, {}, {}}}", self.username, PASSWORD_MASK, self.tenant_id)
    }
}

impl Redacted for SignOutRequest {
    fn redacted(&self) -> String {
        format!("{{{}, {}}}", self.username, self.tenant_id)
    }
}

impl Redacted for CancelRequest {
    fn redacted(&self) -> String {
        format!("{{{}, {}, {}}}", self.username, PASSWORD_MASK, self.tenant_id)
    }
}

impl Redacted for UpdateRequest {
    fn redacted(&self) -> String {
        let new_password = if self.new_password.trim().is_empty() {
            ""
        } else {
            PASSWORD_MASK
        };
        format!(
            "{{{}, {}, {}, {}, {}}}",
            self.username,
            PASSWORD_MASK,
            new_password,
            self.email.as_deref().unwrap_or_default(),
            self.tenant_id
        )
    }
}

impl Redacted for RemoveRequest {
    fn redacted(&self) -> String {
        format!("{{{}, {}, {}}}", self.username, self.email, self.tenant_id)
    }
}

// ========================= Errors =========================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountError {
    #[error("Account not found")]
    NotFound,

    #[error("Password doesn't match")]
    CredentialMismatch,

    #[error("Username already registered for this tenant")]
    AlreadyExists,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Credential processing failed")]
    Hashing,
}

impl AccountError {
    /// Message safe to hand to callers. Unknown accounts and wrong passwords
    /// read the same.
    pub fn public_message(&self) -> String {
        match self {
            AccountError::NotFound | AccountError::CredentialMismatch => {
                INVALID_CREDENTIALS.to_string()
            }
            AccountError::StoreUnavailable(_) | AccountError::Hashing => {
                INTERNAL_ERROR.to_string()
            }
            AccountError::AlreadyExists | AccountError::Validation(_) => self.to_string(),
        }
    }
}

impl From<AccountRepositoryError> for AccountError {
    fn from(err: AccountRepositoryError) -> Self {
        match err {
            AccountRepositoryError::NotFound => AccountError::NotFound,
            AccountRepositoryError::AlreadyExists => AccountError::AlreadyExists,
            AccountRepositoryError::Timeout => {
                AccountError::StoreUnavailable("operation timed out".to_string())
            }
            AccountRepositoryError::DatabaseError(msg) => AccountError::StoreUnavailable(msg),
        }
    }
}

impl From<HashError> for AccountError {
    fn from(_: HashError) -> Self {
        AccountError::Hashing
    }
}

// ========================= Service =========================

/// Account lifecycle operations. Implemented by the base service and by every
/// decorator wrapping it.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AccountError>;
    async fn sign_in(&self, request: SignInRequest) -> Result<Account, AccountError>;
    async fn sign_out(&self, request: SignOutRequest) -> Result<(), AccountError>;
    async fn cancel(&self, request: CancelRequest) -> Result<(), AccountError>;
    async fn create(&self, request: CreateRequest) -> Result<Account, AccountError>;
    async fn update(&self, request: UpdateRequest) -> Result<(), AccountError>;
    async fn remove(&self, request: RemoveRequest) -> Result<(), AccountError>;
}
