pub mod account_repository;
pub mod credential_hasher;
pub mod store_connector;

pub use account_repository::{AccountCursor, AccountRepository, AccountRepositoryError};
pub use credential_hasher::{CredentialHasher, HashError};
pub use store_connector::{ConnectError, StoreConnector};
