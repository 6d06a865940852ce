//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::db::vacations::{Vacation, VacationRepository};
use crate::db::RepositoryError;
use crate::services::email::{EmailClient, EmailError};

/// How long a catalog entry may be served from cache.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum number of cached catalog entries.
const CATALOG_CACHE_CAPACITY: u64 = 1_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    email: EmailClient,
    vacation_cache: Cache<String, Vacation>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the email client cannot be built.
    pub fn new(config: SiteConfig, pool: PgPool) -> Result<Self, EmailError> {
        let email = EmailClient::new(&config.email)?;
        let vacation_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                email,
                vacation_cache,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the email client.
    #[must_use]
    pub fn email(&self) -> &EmailClient {
        &self.inner.email
    }

    /// Look up a vacation by SKU, through the catalog cache.
    ///
    /// Lookups are asynchronous and non-blocking; on cache miss the catalog
    /// is queried and a hit is cached for a short TTL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the catalog query fails.
    pub async fn vacation_by_sku(&self, sku: &str) -> Result<Option<Vacation>, RepositoryError> {
        if let Some(vacation) = self.inner.vacation_cache.get(sku).await {
            return Ok(Some(vacation));
        }

        let vacation = VacationRepository::new(self.pool()).get_by_sku(sku).await?;

        if let Some(vacation) = &vacation {
            self.inner
                .vacation_cache
                .insert(sku.to_owned(), vacation.clone())
                .await;
        }

        Ok(vacation)
    }
}
