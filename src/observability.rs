use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Dispatch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber and returns a dispatch pointing at it.
#[cfg(not(tarpaulin_include))]
pub fn init_tracing() -> Dispatch {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::dispatcher::get_default(|dispatch| dispatch.clone())
}

/// Prometheus recorder handed to the instrumentation decorator, plus the
/// handle `/metrics` renders from. Nothing is installed globally.
pub fn build_metrics() -> (Arc<PrometheusRecorder>, PrometheusHandle) {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    (Arc::new(recorder), handle)
}

/// Drains histogram buckets periodically until shutdown.
#[cfg(not(tarpaulin_include))]
pub fn spawn_upkeep(handle: PrometheusHandle, shutdown: CancellationToken) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = interval.tick() => handle.run_upkeep(),
            }
        }
    });
}
