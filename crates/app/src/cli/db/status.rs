use std::collections::HashSet;

use clap::Args;
use sqlx::migrate::Migrate;
use storefront_app::database::{self, MIGRATOR};

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: StatusArgs) -> Result<(), String> {
    let db = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let applied = applied_versions(&db).await;

    db.close().await;

    let applied = applied?;

    for migration in MIGRATOR.iter() {
        if migration.migration_type.is_down_migration() {
            continue;
        }

        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };

        println!("{} {state:<8} {}", migration.version, migration.description);
    }

    Ok(())
}

async fn applied_versions(db: &database::Db) -> Result<HashSet<i64>, String> {
    let mut conn = db
        .pool()
        .acquire()
        .await
        .map_err(|error| format!("failed to acquire connection: {error}"))?;

    conn.ensure_migrations_table()
        .await
        .map_err(|error| format!("failed to read migration history: {error}"))?;

    let applied = conn
        .list_applied_migrations()
        .await
        .map_err(|error| format!("failed to read migration history: {error}"))?;

    Ok(applied.into_iter().map(|migration| migration.version).collect())
}
