use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::modules::account::application::ports::outgoing::{ConnectError, StoreConnector};

/// Opens a pooled Postgres connection and pings it before handing it out.
#[derive(Clone, Debug)]
pub struct PostgresConnector {
    url: String,
    connect_timeout: Duration,
}

impl PostgresConnector {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }

    fn options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(50)
            .min_connections(1)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);
        opt
    }
}

#[async_trait]
impl StoreConnector for PostgresConnector {
    type Handle = DatabaseConnection;

    async fn connect(&self) -> Result<DatabaseConnection, ConnectError> {
        let db = Database::connect(self.options())
            .await
            .map_err(|e| ConnectError::Unreachable(e.to_string()))?;

        db.ping()
            .await
            .map_err(|e| ConnectError::Unreachable(e.to_string()))?;

        Ok(db)
    }
}
