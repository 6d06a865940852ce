//! Attraction repository for the REST API.
//!
//! Attractions are user-submitted and start out unapproved; only approved
//! attractions are listed publicly. Approval itself happens out of band.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;

/// A point-of-interest submitted through the API.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Attraction {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    /// Email of the submitter, kept for the audit trail.
    pub submitter_email: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A new attraction submission.
#[derive(Debug, Clone)]
pub struct NewAttraction {
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub submitter_email: String,
}

/// Repository for attraction database operations.
pub struct AttractionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttractionRepository<'a> {
    /// Create a new attraction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List approved attractions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_approved(&self) -> Result<Vec<Attraction>, RepositoryError> {
        let attractions = sqlx::query_as::<_, Attraction>(
            r"
            SELECT id, name, description, lat, lng, submitter_email,
                   approved, created_at
            FROM attractions
            WHERE approved = TRUE
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(attractions)
    }

    /// Get an attraction by ID, approved or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: Uuid) -> Result<Option<Attraction>, RepositoryError> {
        let attraction = sqlx::query_as::<_, Attraction>(
            r"
            SELECT id, name, description, lat, lng, submitter_email,
                   approved, created_at
            FROM attractions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(attraction)
    }

    /// Store a new, unapproved attraction and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, attraction: &NewAttraction) -> Result<Uuid, RepositoryError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO attractions
                (id, name, description, lat, lng, submitter_email, approved)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            ",
        )
        .bind(id)
        .bind(&attraction.name)
        .bind(&attraction.description)
        .bind(attraction.lat)
        .bind(attraction.lng)
        .bind(&attraction.submitter_email)
        .execute(self.pool)
        .await?;

        Ok(id)
    }
}
