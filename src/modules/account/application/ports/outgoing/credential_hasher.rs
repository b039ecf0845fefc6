use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Invalid hasher parameters")]
    InvalidParams,

    #[error("Background task failed")]
    TaskFailed,
}

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// `false` for a wrong password and for a malformed digest alike.
    async fn verify(&self, digest: &str, plaintext: &str) -> bool;
}
