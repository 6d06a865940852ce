//! Vacation catalog repository.

use sqlx::PgPool;

use super::RepositoryError;

/// A vacation product as stored in the catalog.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Vacation {
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Price in US cents (the canonical minor unit).
    pub price_in_cents: i64,
    pub tags: Vec<String>,
    pub in_season: bool,
    pub requires_waiver: bool,
    pub maximum_guests: i32,
    pub qty: i32,
    pub available: bool,
    pub packages_sold: i32,
    pub notes: Option<String>,
}

/// Repository for vacation catalog operations.
pub struct VacationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VacationRepository<'a> {
    /// Create a new vacation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all vacations currently available for booking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<Vacation>, RepositoryError> {
        let vacations = sqlx::query_as::<_, Vacation>(
            r"
            SELECT sku, slug, name, category, description, price_in_cents,
                   tags, in_season, requires_waiver, maximum_guests, qty,
                   available, packages_sold, notes
            FROM vacations
            WHERE available = TRUE
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(vacations)
    }

    /// Look up a vacation by SKU.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_sku(&self, sku: &str) -> Result<Option<Vacation>, RepositoryError> {
        let vacation = sqlx::query_as::<_, Vacation>(
            r"
            SELECT sku, slug, name, category, description, price_in_cents,
                   tags, in_season, requires_waiver, maximum_guests, qty,
                   available, packages_sold, notes
            FROM vacations
            WHERE sku = $1
            ",
        )
        .bind(sku)
        .fetch_optional(self.pool)
        .await?;

        Ok(vacation)
    }

    /// Look up a vacation by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Vacation>, RepositoryError> {
        let vacation = sqlx::query_as::<_, Vacation>(
            r"
            SELECT sku, slug, name, category, description, price_in_cents,
                   tags, in_season, requires_waiver, maximum_guests, qty,
                   available, packages_sold, notes
            FROM vacations
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(vacation)
    }

    /// Register an email to be notified when a vacation comes into season.
    ///
    /// Upserts by email: an existing listener gets the SKU appended (without
    /// duplicates), a new email gets a fresh row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_in_season_listener(
        &self,
        email: &str,
        sku: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO vacation_in_season_listeners (email, skus)
            VALUES ($1, ARRAY[$2])
            ON CONFLICT (email) DO UPDATE
            SET skus = (
                SELECT ARRAY(
                    SELECT DISTINCT unnest(vacation_in_season_listeners.skus || $2)
                )
            )
            ",
        )
        .bind(email)
        .bind(sku)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
