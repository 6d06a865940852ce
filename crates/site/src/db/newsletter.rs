//! Newsletter signup repository.

use sqlx::PgPool;

use super::RepositoryError;

/// Repository for newsletter signups.
pub struct NewsletterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsletterRepository<'a> {
    /// Create a new newsletter repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a signup. Signing up twice is treated as success; the
    /// subscriber is already in the system.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn signup(&self, name: &str, email: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO newsletter_signups (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(name)
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
