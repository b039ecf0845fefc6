use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::modules::account::application::ports::outgoing::{CredentialHasher, HashError};

/// Salted bcrypt digests, computed off the async runtime.
#[derive(Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Lower costs are only meant for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            hash(plaintext, cost).map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let plaintext = plaintext.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || verify(plaintext, &digest).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}
