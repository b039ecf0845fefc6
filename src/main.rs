pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod observability;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::config::{AppConfig, CredentialAlgorithm};
use crate::modules::account::adapter::outgoing::account_repository_postgres::AccountRepositoryPostgres;
use crate::modules::account::adapter::outgoing::security::{Argon2Hasher, BcryptHasher};
use crate::modules::account::adapter::outgoing::store::{
    establish, require_handle, BackoffPolicy, PostgresConnector,
};
use crate::modules::account::application::decorators::{build_chain, ChainConfig};
use crate::modules::account::application::ports::incoming::AccountService;
use crate::modules::account::application::ports::outgoing::CredentialHasher;
use crate::modules::account::application::services::AccountLifecycleService;

use actix_web::{web, App, HttpServer};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

const STORE_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountService>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> io::Result<()> {
    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let dispatch = observability::init_tracing();

    info!(environment = %env, "Starting application...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    // Store bootstrap; startup stops here if no handle arrives.
    let store_url = config.store.url().map_err(|e| {
        error!(error = %e, "Invalid store configuration");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let connector = Arc::new(PostgresConnector::new(store_url, STORE_CONNECT_TIMEOUT));
    let policy = BackoffPolicy {
        max_attempts: config.bootstrap_max_attempts,
        ..Default::default()
    };
    let db = match require_handle(establish(connector, policy, shutdown.clone())).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!(error = %e, "Startup aborted");
            return Err(io::Error::other(e));
        }
    };

    let hasher: Arc<dyn CredentialHasher> = match config.credential_algorithm {
        CredentialAlgorithm::Bcrypt => Arc::new(BcryptHasher::new()),
        CredentialAlgorithm::Argon2 => {
            let params = config.argon2;
            Arc::new(
                Argon2Hasher::with_params(params.memory_kib, params.iterations, params.parallelism)
                    .map_err(|e| {
                        error!(error = %e, "Invalid argon2 parameters");
                        io::Error::new(io::ErrorKind::InvalidInput, e)
                    })?,
            )
        }
    };

    let repository = Arc::new(AccountRepositoryPostgres::with_timeout(
        Arc::clone(&db),
        config.store.op_timeout,
    ));
    let base: Arc<dyn AccountService> = Arc::new(AccountLifecycleService::new(repository, hasher));

    let (recorder, metrics_handle) = observability::build_metrics();
    observability::spawn_upkeep(metrics_handle.clone(), shutdown.clone());

    let mut chain_config = ChainConfig::disabled();
    if config.instrumentation_enabled {
        chain_config = chain_config.with_instrumentation(recorder);
    }
    if config.logging_enabled {
        chain_config = chain_config.with_logging(dispatch);
    }

    let state = AppState {
        account_service: build_chain(base, chain_config),
    };

    let server_url = config.server_url();
    info!(address = %server_url, "Server listening");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(metrics_handle.clone()))
            .app_data(crate::shared::api::custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .disable_signals()
    .bind(server_url)?
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        info!("Stopping HTTP server");
        server_handle.stop(true).await;
    });

    server.await
}

/// Cancels `shutdown` on SIGINT or SIGTERM.
#[cfg(not(tarpaulin_include))]
fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("Shutdown signal received");
        shutdown.cancel();
    });
}

#[cfg(all(unix, not(tarpaulin_include)))]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                () = signal_or_pending(tokio::signal::ctrl_c(), "SIGINT") => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            error!(signal = "SIGTERM", error = %e, "Cannot listen for signal");
            signal_or_pending(tokio::signal::ctrl_c(), "SIGINT").await;
        }
    }
}

#[cfg(all(not(unix), not(tarpaulin_include)))]
async fn wait_for_signal() {
    signal_or_pending(tokio::signal::ctrl_c(), "SIGINT").await;
}

/// Resolves when `signal` fires. A listener that could not be installed
/// never resolves, so it cannot trigger shutdown.
async fn signal_or_pending<F>(signal: F, name: &'static str)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(signal = name, error = %e, "Cannot listen for signal");
        std::future::pending::<()>().await;
    }
}

fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::account::adapter::incoming::web::routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    cfg.service(crate::health::prometheus_metrics);
    // Accounts
    cfg.service(routes::sign_up_handler);
    cfg.service(routes::sign_in_handler);
    cfg.service(routes::sign_out_handler);
    cfg.service(routes::cancel_handler);
    cfg.service(routes::create_handler);
    cfg.service(routes::update_handler);
    cfg.service(routes::remove_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
