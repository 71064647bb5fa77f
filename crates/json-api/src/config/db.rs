//! Database Config

use std::time::Duration;

use clap::Args;
use storefront_app::database::PoolSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 25_u32)]
    pub db_max_connections: u32,

    /// Connections kept open while idle
    #[arg(long, env = "DB_MIN_CONNECTIONS", default_value_t = 5_u32)]
    pub db_min_connections: u32,

    /// Maximum connection lifetime in seconds
    #[arg(long, env = "DB_MAX_LIFETIME_SECONDS", default_value_t = 300_u64)]
    pub db_max_lifetime_seconds: u64,

    /// Maximum wait for a pooled connection in seconds
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub db_acquire_timeout_seconds: u64,

    /// Apply pending migrations at startup
    #[arg(long, env = "DB_RUN_MIGRATIONS", default_value_t = false)]
    pub db_run_migrations: bool,
}

impl DatabaseConfig {
    /// Pool bounds for [`storefront_app::database::Db::connect`].
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            max_lifetime: Duration::from_secs(self.db_max_lifetime_seconds),
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_seconds),
        }
    }
}
