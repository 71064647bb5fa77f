//! Storefront JSON API Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use storefront_app::{
    context::{AppContext, AppInitError},
    database::Db,
    domain::instrumented::StoreMetrics,
};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod brands;
mod config;
mod envelope;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod validation;

/// Connect the pool, optionally migrate, and wire the services over it.
async fn init_app(config: &ServerConfig) -> Result<(Db, AppContext), AppInitError> {
    let metrics = StoreMetrics::new(observability::registry()).map_err(AppInitError::Metrics)?;

    let db = Db::connect(&config.database.pool_settings())
        .await
        .map_err(AppInitError::Database)?;

    if config.database.db_run_migrations {
        info!("running database migrations");

        db.migrate().await.map_err(AppInitError::Migrations)?;
    }

    let app = AppContext::from_db(&db, metrics);

    Ok((db, app))
}

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing output would be lost"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let (db, app) = match init_app(&config).await {
        Ok(initialized) => initialized,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();
            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server
        .serve(router::app_router(
            State::from_app_context(app),
            config.server.request_timeout(),
        ))
        .await;

    info!("server stopped, closing database pool");

    shutdown::within_grace("closing the database pool", grace, db.close()).await;
    observability.shutdown();
}
