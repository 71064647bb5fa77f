//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront catalog JSON API server", long_about = None)]
pub struct ServerConfig {
    /// Server network and lifecycle settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        ServerConfig::command().debug_assert();
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.server.shutdown_grace(), Duration::from_secs(10));
        assert_eq!(config.database.db_max_connections, 25);
        assert_eq!(config.database.db_min_connections, 5);
        assert!(!config.database.db_run_migrations);

        Ok(())
    }
}
