use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::Dispatch;
use uuid::Uuid;

use crate::modules::account::application::domain::Account;
use crate::modules::account::application::ports::incoming::{
    AccountError, AccountService, CancelRequest, CreateRequest, Redacted, RemoveRequest,
    SignInRequest, SignOutRequest, SignUpRequest, UpdateRequest,
};

/// Emits one structured event per call. Passwords never reach the log.
pub struct LoggingDecorator {
    next: Arc<dyn AccountService>,
    dispatch: Dispatch,
}

impl LoggingDecorator {
    pub fn new(next: Arc<dyn AccountService>, dispatch: Dispatch) -> Self {
        Self { next, dispatch }
    }

    fn record(
        &self,
        method: &'static str,
        input: String,
        output: Option<Uuid>,
        err: Option<&AccountError>,
        started: Instant,
    ) {
        let output = output.map(|id| id.to_string()).unwrap_or_default();
        let err = err.map(|e| e.to_string()).unwrap_or_default();
        let took_ms = started.elapsed().as_millis() as u64;

        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::info!(
                method,
                input = %input,
                output = %output,
                err = %err,
                took_ms,
                "account call"
            );
        });
    }

    fn record_account(
        &self,
        method: &'static str,
        input: String,
        result: &Result<Account, AccountError>,
        started: Instant,
    ) {
        match result {
            Ok(account) => self.record(method, input, Some(account.id), None, started),
            Err(e) => self.record(method, input, None, Some(e), started),
        }
    }

    fn record_unit(
        &self,
        method: &'static str,
        input: String,
        result: &Result<(), AccountError>,
        started: Instant,
    ) {
        self.record(method, input, None, result.as_ref().err(), started);
    }
}

#[async_trait]
impl AccountService for LoggingDecorator {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.sign_up(request).await;
        self.record_account("sign_up", input, &result, started);
        result
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.sign_in(request).await;
        self.record_account("sign_in", input, &result, started);
        result
    }

    async fn sign_out(&self, request: SignOutRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.sign_out(request).await;
        self.record_unit("sign_out", input, &result, started);
        result
    }

    async fn cancel(&self, request: CancelRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.cancel(request).await;
        self.record_unit("cancel", input, &result, started);
        result
    }

    async fn create(&self, request: CreateRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.create(request).await;
        self.record_account("create", input, &result, started);
        result
    }

    async fn update(&self, request: UpdateRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.update(request).await;
        self.record_unit("update", input, &result, started);
        result
    }

    async fn remove(&self, request: RemoveRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let input = request.redacted();
        let result = self.next.remove(request).await;
        self.record_unit("remove", input, &result, started);
        result
    }
}
