//! Customer and order repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use meadowlark_core::{CustomerId, Email, OrderId};

use super::RepositoryError;

/// A customer record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// An order placed by a customer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_number: String,
    pub date: DateTime<Utc>,
    pub status: String,
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, first_name, last_name, email, address1, address2,
                   city, state, zip, phone
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Fetch a customer's orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn orders_for(&self, id: CustomerId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, customer_id, order_number, date, status
            FROM orders
            WHERE customer_id = $1
            ORDER BY date
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Update a customer's first name.
    ///
    /// Returns `false` if the customer does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_first_name(
        &self,
        id: CustomerId,
        first_name: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customers
            SET first_name = $2
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(first_name)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
