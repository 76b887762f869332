//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! fernhill-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_DATABASE_URL` - `PostgreSQL` connection string for the portal
//!   (falls back to `DATABASE_URL`, as set by managed postgres attach)
//!
//! # Migration Files
//!
//! Portal migrations: `crates/portal/migrations/`

use sqlx::PgPool;

/// Errors that can occur while running migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run portal database migrations.
pub async fn portal() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PORTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("PORTAL_DATABASE_URL"))?;

    tracing::info!("Connecting to portal database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running portal migrations...");
    sqlx::migrate!("../portal/migrations").run(&pool).await?;

    tracing::info!("Portal migrations complete!");
    Ok(())
}
