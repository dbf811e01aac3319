//! User queries against PostgreSQL.

use crate::error::AppError;
use crate::models::{User, UserInput};
use crate::store::USERS_TABLE;
use async_trait::async_trait;
use sqlx::PgPool;

/// One method per SQL statement. Handlers compose these; no method spans a transaction.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Insert and return the row with its assigned id.
    async fn create(&self, input: &UserInput) -> Result<User, AppError>;

    /// Overwrite name and email. Returns the number of rows affected (0 when absent).
    async fn update(&self, id: i32, input: &UserInput) -> Result<u64, AppError>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: i32) -> Result<u64, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Columns are nullable in the table; decode NULL as empty text.
const SELECT_COLUMNS: &str = "id, COALESCE(name, '') AS name, COALESCE(email, '') AS email";

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", SELECT_COLUMNS, USERS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, USERS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &UserInput) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email) VALUES ($1, $2) RETURNING {}",
            USERS_TABLE, SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: &UserInput) -> Result<u64, AppError> {
        let sql = format!("UPDATE {} SET name = $1, email = $2 WHERE id = $3", USERS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", USERS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
