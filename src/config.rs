use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which credential hasher to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialAlgorithm {
    Bcrypt,
    Argon2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub op_timeout: Duration,
}

impl StoreConfig {
    /// Connection URL with user and password percent-encoded.
    pub fn url(&self) -> Result<String, ConfigError> {
        let invalid = |key: &'static str, value: &str| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        };

        let mut url = Url::parse(&format!("postgres://{}", self.host))
            .map_err(|_| invalid("STORE_HOST", &self.host))?;
        url.set_port(Some(self.port))
            .map_err(|_| invalid("STORE_PORT", &self.port.to_string()))?;
        url.set_username(&self.user)
            .map_err(|_| invalid("STORE_USER", &self.user))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("STORE_PASSWORD", "<redacted>"))?;
        url.set_path(&self.database);

        Ok(url.into())
    }
}

/// Argon2id cost parameters, used when `CREDENTIAL_ALGORITHM=argon2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: 4 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    pub bootstrap_max_attempts: u32,
    pub credential_algorithm: CredentialAlgorithm,
    pub argon2: Argon2Config,
    pub logging_enabled: bool,
    pub instrumentation_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let credential_algorithm = match text("CREDENTIAL_ALGORITHM", "bcrypt")
            .to_lowercase()
            .as_str()
        {
            "bcrypt" => CredentialAlgorithm::Bcrypt,
            "argon2" => CredentialAlgorithm::Argon2,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "CREDENTIAL_ALGORITHM",
                    value: other.to_string(),
                })
            }
        };

        let defaults = Argon2Config::default();
        let argon2 = Argon2Config {
            memory_kib: parse(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse(&lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse(&lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        let config = Self {
            host: text("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 8080)?,
            store: StoreConfig {
                host: text("STORE_HOST", "localhost"),
                port: parse(&lookup, "STORE_PORT", 5432)?,
                database: text("STORE_DB", "accounts"),
                user: text("STORE_USER", "accounts"),
                password: text("STORE_PASSWORD", "accounts"),
                op_timeout: Duration::from_secs(parse(&lookup, "STORE_TIMEOUT_SECS", 5)?),
            },
            bootstrap_max_attempts: parse(&lookup, "BOOTSTRAP_MAX_ATTEMPTS", 20)?,
            credential_algorithm,
            argon2,
            logging_enabled: flag(&lookup, "LOGGING_ENABLED", true)?,
            instrumentation_enabled: flag(&lookup, "INSTRUMENTATION_ENABLED", true)?,
        };

        config.store.url()?;
        Ok(config)
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value }),
        },
        None => Ok(default),
    }
}
