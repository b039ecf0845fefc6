use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectError {
    #[error("Store unreachable: {0}")]
    Unreachable(String),
}

/// One connection attempt against the backing store.
#[async_trait]
pub trait StoreConnector: Send + Sync + 'static {
    type Handle: Send + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectError>;
}
