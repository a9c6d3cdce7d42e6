use crate::data::migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};

/// Opens the connection and brings the schema up to date.
#[instrument(skip(url))]
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    if url.contains(":memory:") || url.contains("mode=memory") {
        // Every pooled connection would otherwise see its own empty database.
        options.max_connections(1).min_connections(1);
    }

    info!(backend = backend_name(url), "Connecting to database");
    let db = Database::connect(options).await?;

    info!("Running migrations");
    Migrator::up(&db, None).await?;
    info!("Database ready");

    Ok(db)
}

fn backend_name(url: &str) -> &'static str {
    if url.starts_with("postgres") {
        "postgres"
    } else if url.starts_with("sqlite") {
        "sqlite"
    } else {
        "unknown"
    }
}
