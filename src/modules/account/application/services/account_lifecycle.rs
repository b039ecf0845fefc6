use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::modules::account::application::domain::identity::MAX_USERNAME_LENGTH;
use crate::modules::account::application::domain::{Account, Actor, NewAccount};
use crate::modules::account::application::ports::incoming::{
    AccountError, AccountService, CancelRequest, CreateRequest, RemoveRequest, SignInRequest,
    SignOutRequest, SignUpRequest, UpdateRequest,
};
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, CredentialHasher,
};

/// Plaintext behind the digest checked when no account matches.
const DECOY_PASSWORD: &str = "decoy-credential";

/// Base implementation of the account lifecycle. Knows nothing about logging
/// or metrics decorators wrapped around it.
#[derive(Clone)]
pub struct AccountLifecycleService {
    repository: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    decoy_digest: Arc<OnceCell<String>>,
}

impl AccountLifecycleService {
    pub fn new(repository: Arc<dyn AccountRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            repository,
            hasher,
            decoy_digest: Arc::new(OnceCell::new()),
        }
    }

    async fn register(
        &self,
        username: String,
        password: String,
        email: String,
        tenant_id: String,
        actor: Actor,
    ) -> Result<Account, AccountError> {
        let username = validate_username(&username)?;
        let password = validate_password(&password)?;
        let email = validate_email(&email)?;

        // Lookup-before-insert; the store's unique index is the final arbiter.
        match self
            .repository
            .get_by_username_and_tenant(&username, &tenant_id)
            .await
        {
            Ok(existing) if existing.is_live() => return Err(AccountError::AlreadyExists),
            Ok(_) | Err(AccountRepositoryError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_digest = self.hasher.hash(&password).await?;
        let account = Account::create(
            NewAccount {
                username,
                password_digest,
                email,
                tenant_id,
            },
            actor,
        );

        self.repository.insert(&account).await?;
        Ok(account)
    }

    /// Loads the live account for `(username, tenant)` and checks the password.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        tenant_id: &str,
    ) -> Result<Account, AccountError> {
        let account = match self.live_account(username, tenant_id).await {
            Ok(account) => account,
            Err(AccountError::NotFound) => {
                // Unknown accounts pay the same hashing cost as a wrong password.
                self.verify_decoy(password).await;
                return Err(AccountError::NotFound);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(&account.password_digest, password).await {
            return Err(AccountError::CredentialMismatch);
        }

        Ok(account)
    }

    async fn verify_decoy(&self, password: &str) {
        let digest = self
            .decoy_digest
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;

        if let Ok(digest) = digest {
            self.hasher.verify(digest, password).await;
        }
    }

    async fn live_account(&self, username: &str, tenant_id: &str) -> Result<Account, AccountError> {
        let account = self
            .repository
            .get_by_username_and_tenant(username.trim(), tenant_id)
            .await?;

        if !account.is_live() {
            return Err(AccountError::NotFound);
        }

        Ok(account)
    }
}

#[async_trait]
impl AccountService for AccountLifecycleService {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AccountError> {
        let confirmation = request.email_confirmation.trim();
        if !confirmation.is_empty() && !confirmation.eq_ignore_ascii_case(request.email.trim()) {
            return Err(AccountError::Validation(
                "email confirmation does not match".to_string(),
            ));
        }

        self.register(
            request.username,
            request.password,
            request.email,
            request.tenant_id,
            Actor::SelfService,
        )
        .await
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Account, AccountError> {
        self.authenticate(&request.username, &request.password, &request.tenant_id)
            .await
    }

    async fn sign_out(&self, request: SignOutRequest) -> Result<(), AccountError> {
        // Stateless: there is no session to invalidate.
        debug!(username = %request.username, tenant_id = %request.tenant_id, "Sign out");
        Ok(())
    }

    async fn cancel(&self, request: CancelRequest) -> Result<(), AccountError> {
        let account = self
            .authenticate(&request.username, &request.password, &request.tenant_id)
            .await?;

        self.repository.delete(account.id).await?;
        Ok(())
    }

    async fn create(&self, request: CreateRequest) -> Result<Account, AccountError> {
        self.register(
            request.username,
            request.password,
            request.email,
            request.tenant_id,
            Actor::System,
        )
        .await
    }

    async fn update(&self, request: UpdateRequest) -> Result<(), AccountError> {
        let mut account = self
            .authenticate(
                &request.username,
                &request.current_password,
                &request.tenant_id,
            )
            .await?;

        if let Some(email) = request.email.as_deref() {
            let email = validate_email(email)?;
            if let Some(confirmation) = request.email_confirmation.as_deref() {
                let confirmation = confirmation.trim();
                if !confirmation.is_empty() && !confirmation.eq_ignore_ascii_case(&email) {
                    return Err(AccountError::Validation(
                        "email confirmation does not match".to_string(),
                    ));
                }
            }
            account.email = email;
        }

        let new_password = request.new_password.as_str();
        if !new_password.trim().is_empty() {
            let confirmation = request.new_password_confirmation.as_str();
            if !confirmation.is_empty() && confirmation != new_password {
                return Err(AccountError::Validation(
                    "password confirmation does not match".to_string(),
                ));
            }
            account.password_digest = self.hasher.hash(new_password).await?;
        }

        if let Some(description) = request.description {
            account.description = description;
        }
        if let Some(given_name) = request.given_name {
            account.given_name = given_name;
        }
        if let Some(middle_names) = request.middle_names {
            account.middle_names = middle_names;
        }
        if let Some(family_name) = request.family_name {
            account.family_name = family_name;
        }

        account.touch(Actor::SelfService);
        self.repository.update(&account).await?;
        Ok(())
    }

    async fn remove(&self, request: RemoveRequest) -> Result<(), AccountError> {
        let account = self
            .live_account(&request.username, &request.tenant_id)
            .await?;

        let email = request.email.trim();
        if !email.is_empty() && !email.eq_ignore_ascii_case(&account.email) {
            return Err(AccountError::NotFound);
        }

        self.repository.delete(account.id).await?;
        Ok(())
    }
}

// ------------------------
// Validation helpers
// ------------------------

fn validate_username(username: &str) -> Result<String, AccountError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AccountError::Validation("username cannot be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AccountError::Validation("username is too long".to_string()));
    }
    Ok(username.to_string())
}

/// Blank passwords are rejected; otherwise the password is kept byte for byte.
fn validate_password(password: &str) -> Result<String, AccountError> {
    if password.trim().is_empty() {
        return Err(AccountError::Validation("password cannot be empty".to_string()));
    }
    Ok(password.to_string())
}

fn validate_email(email: &str) -> Result<String, AccountError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AccountError::Validation("email cannot be empty".to_string()));
    }
    if !EmailAddress::is_valid(email) {
        return Err(AccountError::Validation("invalid email format".to_string()));
    }
    Ok(email.to_lowercase())
}
