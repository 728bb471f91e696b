use std::future::Future;
use std::time::Duration;

use axum::async_trait;
use sqlx::postgres::{PgPoolOptions, Postgres};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::{Stock, StockInput},
};

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
}

/// Persistence for the `stocks` table. Every method runs exactly one statement.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Inserts a row and returns the id the database generated for it.
    async fn insert(&self, stock: &StockInput) -> Result<i64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Stock>, AppError>;

    /// All rows, in whatever order the database returns them.
    async fn find_all(&self) -> Result<Vec<Stock>, AppError>;

    /// Returns the number of rows affected, 0 when `id` does not exist.
    async fn update_by_id(&self, id: i64, stock: &StockInput) -> Result<u64, AppError>;

    /// Returns the number of rows deleted, 0 when `id` does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError>;
}

// Integer columns are cast so INTEGER and BIGINT schemas both decode into i64.
const SELECT_STOCKS: &str =
    "SELECT stockid::BIGINT AS stockid, name, price::BIGINT AS price, company FROM stocks";

/// Runs one statement under `timeout`. The pooled connection is returned
/// when the statement future completes or is dropped.
pub async fn bounded<T, F>(timeout: Duration, statement: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(timeout, statement)
        .await
        .map_err(|_| AppError::Timeout)?
        .map_err(AppError::from)
}

#[derive(Clone)]
pub struct PgStockRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgStockRepository {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            statement_timeout: config.statement_timeout,
        }
    }

    async fn timed<T, F>(&self, statement: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        bounded(self.statement_timeout, statement).await
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn insert(&self, stock: &StockInput) -> Result<i64, AppError> {
        let id = self
            .timed(
                sqlx::query_scalar::<Postgres, i64>(
                    "INSERT INTO stocks (name, price, company) VALUES ($1, $2, $3) RETURNING stockid::BIGINT",
                )
                .bind(&stock.name)
                .bind(stock.price)
                .bind(&stock.company)
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::info!(stockid = id, "inserted stock");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Stock>, AppError> {
        let sql = format!("{SELECT_STOCKS} WHERE stockid = $1");
        let stock = self
            .timed(
                sqlx::query_as::<Postgres, Stock>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        if stock.is_none() {
            tracing::debug!(stockid = id, "no stock row returned");
        }
        Ok(stock)
    }

    async fn find_all(&self) -> Result<Vec<Stock>, AppError> {
        self.timed(sqlx::query_as::<Postgres, Stock>(SELECT_STOCKS).fetch_all(&self.pool))
            .await
    }

    async fn update_by_id(&self, id: i64, stock: &StockInput) -> Result<u64, AppError> {
        let rows = self
            .timed(
                sqlx::query("UPDATE stocks SET name = $2, price = $3, company = $4 WHERE stockid = $1")
                    .bind(id)
                    .bind(&stock.name)
                    .bind(stock.price)
                    .bind(&stock.company)
                    .execute(&self.pool),
            )
            .await?
            .rows_affected();

        tracing::info!(stockid = id, rows, "updated stock");
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        let rows = self
            .timed(
                sqlx::query("DELETE FROM stocks WHERE stockid = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?
            .rows_affected();

        tracing::info!(stockid = id, rows, "deleted stock");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stalled_statement_times_out() {
        let result = bounded(
            Duration::from_millis(20),
            std::future::pending::<Result<(), sqlx::Error>>(),
        )
        .await;

        assert!(matches!(result, Err(AppError::Timeout)));
    }

    #[tokio::test]
    async fn prompt_statement_passes_through() {
        let rows = bounded(Duration::from_secs(5), async { Ok::<u64, sqlx::Error>(3) }).await;
        assert_eq!(rows.unwrap(), 3);

        let err = bounded(Duration::from_secs(5), async {
            Err::<u64, sqlx::Error>(sqlx::Error::PoolTimedOut)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[tokio::test]
    async fn slow_statement_within_budget_completes() {
        let result = bounded(Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<&str, sqlx::Error>("done")
        })
        .await;

        assert_eq!(result.unwrap(), "done");
    }
}
