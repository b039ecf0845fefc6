use async_trait::async_trait;
use metrics::Recorder;
use std::sync::Arc;
use std::time::Instant;

use crate::modules::account::application::domain::Account;
use crate::modules::account::application::ports::incoming::{
    AccountError, AccountService, CancelRequest, CreateRequest, RemoveRequest, SignInRequest,
    SignOutRequest, SignUpRequest, UpdateRequest,
};

pub const REQUEST_COUNT: &str = "accounts_request_count";
pub const REQUEST_LATENCY: &str = "accounts_request_latency_seconds";

/// Counts calls and records their latency, labelled by method and outcome.
pub struct InstrumentingDecorator {
    next: Arc<dyn AccountService>,
    recorder: Arc<dyn Recorder + Send + Sync>,
}

impl InstrumentingDecorator {
    pub fn new(next: Arc<dyn AccountService>, recorder: Arc<dyn Recorder + Send + Sync>) -> Self {
        Self { next, recorder }
    }

    fn observe<T>(&self, method: &'static str, result: &Result<T, AccountError>, started: Instant) {
        let error = if result.is_err() { "true" } else { "false" };
        let elapsed = started.elapsed().as_secs_f64();

        metrics::with_local_recorder(self.recorder.as_ref(), || {
            metrics::counter!(REQUEST_COUNT, "method" => method, "error" => error).increment(1);
            metrics::histogram!(REQUEST_LATENCY, "method" => method, "error" => error)
                .record(elapsed);
        });
    }
}

#[async_trait]
impl AccountService for InstrumentingDecorator {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let result = self.next.sign_up(request).await;
        self.observe("sign_up", &result, started);
        result
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let result = self.next.sign_in(request).await;
        self.observe("sign_in", &result, started);
        result
    }

    async fn sign_out(&self, request: SignOutRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let result = self.next.sign_out(request).await;
        self.observe("sign_out", &result, started);
        result
    }

    async fn cancel(&self, request: CancelRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let result = self.next.cancel(request).await;
        self.observe("cancel", &result, started);
        result
    }

    async fn create(&self, request: CreateRequest) -> Result<Account, AccountError> {
        let started = Instant::now();
        let result = self.next.create(request).await;
        self.observe("create", &result, started);
        result
    }

    async fn update(&self, request: UpdateRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let result = self.next.update(request).await;
        self.observe("update", &result, started);
        result
    }

    async fn remove(&self, request: RemoveRequest) -> Result<(), AccountError> {
        let started = Instant::now();
        let result = self.next.remove(request).await;
        self.observe("remove", &result, started);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::build_metrics;
    use crate::tests::support::stubs::ScriptedAccountService;

    /// The exposition line for `metric` carrying every label in `labels`.
    fn sample_line<'a>(rendered: &'a str, metric: &str, labels: &[&str]) -> Option<&'a str> {
        rendered.lines().find(|line| {
            line.starts_with(&format!("{metric}{{")) && labels.iter().all(|l| line.contains(l))
        })
    }

    #[tokio::test]
    async fn test_counts_and_times_each_call() {
        let (recorder, handle) = build_metrics();
        let service =
            InstrumentingDecorator::new(Arc::new(ScriptedAccountService::succeeding()), recorder);

        service.sign_in(SignInRequest::default()).await.unwrap();
        service.sign_in(SignInRequest::default()).await.unwrap();

        let rendered = handle.render();
        let count = sample_line(
            &rendered,
            REQUEST_COUNT,
            &["method=\"sign_in\"", "error=\"false\""],
        )
        .expect("request counter rendered");
        assert!(count.ends_with(" 2"), "{count}");

        let latency_count = sample_line(
            &rendered,
            &format!("{REQUEST_LATENCY}_count"),
            &["method=\"sign_in\""],
        )
        .expect("latency summary rendered");
        assert!(latency_count.ends_with(" 2"), "{latency_count}");
    }

    #[tokio::test]
    async fn test_failures_are_labelled() {
        let (recorder, handle) = build_metrics();
        let service = InstrumentingDecorator::new(
            Arc::new(ScriptedAccountService::failing(AccountError::NotFound)),
            recorder,
        );

        let result = service.cancel(CancelRequest::default()).await;

        assert_eq!(result, Err(AccountError::NotFound));
        let rendered = handle.render();
        let count = sample_line(
            &rendered,
            REQUEST_COUNT,
            &["method=\"cancel\"", "error=\"true\""],
        )
        .expect("failed call counted");
        assert!(count.ends_with(" 1"), "{count}");
        assert!(sample_line(&rendered, REQUEST_COUNT, &["error=\"false\""]).is_none());
    }
}
