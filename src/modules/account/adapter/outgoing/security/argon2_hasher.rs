use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use rand_core::OsRng;

use crate::modules::account::application::ports::outgoing::{CredentialHasher, HashError};

/// Argon2id digests in PHC string format.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    #[cfg(test)]
    salt_override: Option<SaltString>,
}

impl Argon2Hasher {
    /// Budget VPS friendly: 4MB memory, 3 iterations, 1 thread.
    pub fn new() -> Result<Self, HashError> {
        Self::with_params(4 * 1024, 3, 1)
    }

    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|_| HashError::InvalidParams)?;

        Ok(Self {
            params,
            #[cfg(test)]
            salt_override: None,
        })
    }

    #[cfg(test)]
    pub fn with_fixed_salt(salt: &str) -> Self {
        Self {
            params: Params::new(4 * 1024, 3, 1, None).expect("Invalid params"),
            salt_override: Some(SaltString::from_b64(salt).expect("Invalid salt")),
        }
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_string();
        let params = self.params.clone();

        #[cfg(test)]
        let salt_override = self.salt_override.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            #[cfg(test)]
            let salt = salt_override.unwrap_or_else(|| SaltString::generate(&mut OsRng));

            #[cfg(not(test))]
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|digest| digest.to_string())
                .map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let plaintext = plaintext.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || {
            // Parameters travel inside the PHC string.
            PasswordHash::new(&digest)
                .map(|parsed| {
                    Argon2::default()
                        .verify_password(plaintext.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }
}
