//! Database operations for the site `PostgreSQL` instance.
//!
//! # Database: `meadowlark`
//!
//! The catalog and customer data live here; the session store shares the
//! same database (tower-sessions table, created via migration).
//!
//! ## Tables
//!
//! - `vacations` - The vacation product catalog
//! - `vacation_in_season_listeners` - "Notify me when in season" signups
//! - `customers` / `orders` - Customer records and their orders
//! - `attractions` - User-submitted attractions (REST API)
//! - `newsletter_signups` - Newsletter subscriptions
//! - `tower_sessions.session` - Session storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p meadowlark-cli -- migrate
//! ```
//!
//! Queries use runtime binding (`query_as`) rather than the compile-time
//! checked macros so the workspace builds without a live database.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod attractions;
pub mod customers;
pub mod newsletter;
pub mod vacations;

pub use attractions::AttractionRepository;
pub use customers::CustomerRepository;
pub use newsletter::NewsletterRepository;
pub use vacations::VacationRepository;

/// Errors returned by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value failed domain validation on the way out.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
