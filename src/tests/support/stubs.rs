use async_trait::async_trait;
use mockall::mock;

use crate::modules::account::application::domain::{Account, Actor, NewAccount};
use crate::modules::account::application::ports::incoming::{
    AccountError, AccountService, CancelRequest, CreateRequest, RemoveRequest, SignInRequest,
    SignOutRequest, SignUpRequest, UpdateRequest,
};

pub fn sample_account() -> Account {
    Account::create(
        NewAccount {
            username: "aquaman".to_string(),
            password_digest: "$2b$04$stub".to_string(),
            email: "a@x.com".to_string(),
            tenant_id: "t1".to_string(),
        },
        Actor::SelfService,
    )
}

/// Answers every call with the same outcome.
#[derive(Clone)]
pub struct ScriptedAccountService {
    pub account: Account,
    pub failure: Option<AccountError>,
}

impl ScriptedAccountService {
    pub fn succeeding() -> Self {
        Self {
            account: sample_account(),
            failure: None,
        }
    }

    pub fn failing(err: AccountError) -> Self {
        Self {
            account: sample_account(),
            failure: Some(err),
        }
    }

    fn account(&self) -> Result<Account, AccountError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.account.clone()),
        }
    }

    fn unit(&self) -> Result<(), AccountError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountService for ScriptedAccountService {
    async fn sign_up(&self, _request: SignUpRequest) -> Result<Account, AccountError> {
        self.account()
    }

    async fn sign_in(&self, _request: SignInRequest) -> Result<Account, AccountError> {
        self.account()
    }

    async fn sign_out(&self, _request: SignOutRequest) -> Result<(), AccountError> {
        self.unit()
    }

    async fn cancel(&self, _request: CancelRequest) -> Result<(), AccountError> {
        self.unit()
    }

    async fn create(&self, _request: CreateRequest) -> Result<Account, AccountError> {
        self.account()
    }

    async fn update(&self, _request: UpdateRequest) -> Result<(), AccountError> {
        self.unit()
    }

    async fn remove(&self, _request: RemoveRequest) -> Result<(), AccountError> {
        self.unit()
    }
}

mock! {
    pub Accounts {}

    #[async_trait]
    impl AccountService for Accounts {
        async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AccountError>;
        async fn sign_in(&self, request: SignInRequest) -> Result<Account, AccountError>;
        async fn sign_out(&self, request: SignOutRequest) -> Result<(), AccountError>;
        async fn cancel(&self, request: CancelRequest) -> Result<(), AccountError>;
        async fn create(&self, request: CreateRequest) -> Result<Account, AccountError>;
        async fn update(&self, request: UpdateRequest) -> Result<(), AccountError>;
        async fn remove(&self, request: RemoveRequest) -> Result<(), AccountError>;
    }
}
