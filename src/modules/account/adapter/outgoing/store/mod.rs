pub mod backoff;
pub mod bootstrap;
pub mod postgres_connector;

pub use backoff::{BackoffPolicy, ExponentialBackoff};
pub use bootstrap::{
    establish, require_handle, BootstrapError, ConnectionBootstrapper, HandleReceiver,
};
pub use postgres_connector::PostgresConnector;
