use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::backoff::{BackoffPolicy, ExponentialBackoff};
use crate::modules::account::application::ports::outgoing::StoreConnector;

/// Delivered once: a live handle, or `None` when every attempt failed or
/// shutdown was requested first.
pub type HandleReceiver<H> = oneshot::Receiver<Option<H>>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BootstrapError {
    #[error("No store connection: attempts exhausted or shutdown requested")]
    Exhausted,

    #[error("Bootstrap task ended without delivering a result")]
    Abandoned,
}

/// Connects to the store in the background, retrying with exponential
/// backoff, and hands the result to exactly one receiver.
pub struct ConnectionBootstrapper<C: StoreConnector> {
    connector: Arc<C>,
    policy: BackoffPolicy,
    shutdown: CancellationToken,
}

impl<C: StoreConnector> ConnectionBootstrapper<C> {
    pub fn new(connector: Arc<C>, policy: BackoffPolicy, shutdown: CancellationToken) -> Self {
        Self {
            connector,
            policy,
            shutdown,
        }
    }

    /// Spawns the connection loop and returns the receiving end right away.
    pub fn start(self) -> HandleReceiver<C::Handle> {
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let handle = self.connect_with_retry().await;
            if tx.send(handle).is_err() {
                warn!("Store handle receiver dropped before delivery");
            }
        });

        rx
    }

    pub async fn connect_with_retry(&self) -> Option<C::Handle> {
        if self.shutdown.is_cancelled() {
            return None;
        }

        let mut backoff = ExponentialBackoff::new(self.policy.clone());
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let result = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => {
                    info!(attempt, "Shutdown requested, store connection abandoned");
                    return None;
                }
                result = self.connector.connect() => result,
            };

            let err = match result {
                Ok(handle) => {
                    info!(attempt, "Connected to store");
                    return Some(handle);
                }
                Err(err) => err,
            };

            if attempt >= max_attempts {
                warn!(attempt, error = %err, "Giving up on store connection");
                return None;
            }

            let delay = backoff.next_delay();
            warn!(
                attempt,
                max_attempts,
                retry_in_ms = delay.as_millis() as u64,
                error = %err,
                "Store connection failed, retrying"
            );

            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => {
                    info!(attempt, "Shutdown requested, store connection abandoned");
                    return None;
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Starts connecting in the background and returns where the handle will land.
pub fn establish<C: StoreConnector>(
    connector: Arc<C>,
    policy: BackoffPolicy,
    shutdown: CancellationToken,
) -> HandleReceiver<C::Handle> {
    ConnectionBootstrapper::new(connector, policy, shutdown).start()
}

/// Waits for the bootstrap outcome. Startup cannot continue on error.
pub async fn require_handle<H>(receiver: HandleReceiver<H>) -> Result<H, BootstrapError> {
    match receiver.await {
        Ok(Some(handle)) => Ok(handle),
        Ok(None) => Err(BootstrapError::Exhausted),
        Err(_) => Err(BootstrapError::Abandoned),
    }
}
