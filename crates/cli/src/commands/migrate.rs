//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ml-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string for the site
//!
//! Migration files live in `crates/site/migrations/`.

use sqlx::PgPool;

use super::CommandError;

/// Run the site database migrations.
///
/// # Errors
///
/// Returns an error if `SITE_DATABASE_URL` is unset, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))?;

    tracing::info!("Connecting to site database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running site migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Site migrations complete!");
    Ok(())
}
