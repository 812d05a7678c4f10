//! Customer repository for `PostgreSQL`.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crm_core::AccountId;

use super::{CustomerStore, EMAIL_UNIQUE_INDEX, RepositoryError};
use crate::models::{Customer, CustomerDetails};

/// Repository for customer database operations.
///
/// Holds no per-record state: every call reads or writes the current
/// persisted row.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, singling out the unique email index.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
        && db_err.constraint() == Some(EMAIL_UNIQUE_INDEX)
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(
            r"
            SELECT account_id, first_name, last_name, email, phone_number,
                   address, city, state, country, date_created
            FROM customers
            ORDER BY date_created DESC, account_id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT account_id, first_name, last_name, email, phone_number,
                   address, city, state, country, date_created
            FROM customers
            WHERE account_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT account_id, first_name, last_name, email, phone_number,
                   address, city, state, country, date_created
            FROM customers
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn create(&self, details: &CustomerDetails) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            INSERT INTO customers (
                first_name, last_name, email, phone_number,
                address, city, state, country, date_created
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING account_id, first_name, last_name, email, phone_number,
                      address, city, state, country, date_created
            ",
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.phone_number)
        .bind(&details.address)
        .bind(&details.city)
        .bind(&details.state)
        .bind(&details.country)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        // date_created is never written after insert.
        let updated = sqlx::query_as::<_, Customer>(
            r"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                address = $6,
                city = $7,
                state = $8,
                country = $9
            WHERE account_id = $1
            RETURNING account_id, first_name, last_name, email, phone_number,
                      address, city, state, country, date_created
            ",
        )
        .bind(customer.account_id)
        .bind(&customer.details.first_name)
        .bind(&customer.details.last_name)
        .bind(&customer.details.email)
        .bind(&customer.details.phone_number)
        .bind(&customer.details.address)
        .bind(&customer.details.city)
        .bind(&customer.details.state)
        .bind(&customer.details.country)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        updated.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: AccountId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM customers
            WHERE account_id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS(
                SELECT 1 FROM customers
                WHERE email = $1
                  AND ($2::INTEGER IS NULL OR account_id <> $2)
            )
            ",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
