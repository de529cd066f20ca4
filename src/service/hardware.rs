//! Hardware inventory and the checkout/return ledger.
//!
//! A transaction is CHECKED_OUT while `return_date` is null and RETURNED once it
//! is stamped. Both transitions are a single conditional UPDATE inside a database
//! transaction, so two requests can never take the last unit or return the same
//! loan twice.

use crate::error::AppError;
use crate::models::{HardwareItem, HardwareTransaction};
use sqlx::{PgConnection, PgPool};

const TRANSACTION_COLUMNS: &str = "transaction_id, item_id, user_id, checkout_date, return_date";

pub struct HardwareService;

impl HardwareService {
    pub async fn list(pool: &PgPool) -> Result<Vec<HardwareItem>, AppError> {
        let items = sqlx::query_as::<_, HardwareItem>(
            "SELECT item_id, name, quantity_available FROM hardware ORDER BY item_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn get(pool: &PgPool, item_id: i32) -> Result<Option<HardwareItem>, AppError> {
        let item = sqlx::query_as::<_, HardwareItem>(
            "SELECT item_id, name, quantity_available FROM hardware WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_optional(pool)
        .await?;
        Ok(item)
    }

    pub async fn create(conn: &mut PgConnection, name: &str, quantity: i32) -> Result<HardwareItem, AppError> {
        let item = sqlx::query_as::<_, HardwareItem>(
            "INSERT INTO hardware (name, quantity_available) VALUES ($1, $2) \
             RETURNING item_id, name, quantity_available",
        )
        .bind(name)
        .bind(quantity)
        .fetch_one(&mut *conn)
        .await?;
        Ok(item)
    }

    /// Take one unit of `item_id` for `user_id`.
    pub async fn checkout(pool: &PgPool, item_id: i32, user_id: i32) -> Result<HardwareTransaction, AppError> {
        let mut tx = pool.begin().await?;

        let user: Option<(i32,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_none() {
            return Err(AppError::NotFound("user does not exist".into()));
        }

        let taken = sqlx::query(
            "UPDATE hardware SET quantity_available = quantity_available - 1 \
             WHERE item_id = $1 AND quantity_available > 0",
        )
        .bind(item_id)
        .execute(&mut *tx)
        .await?;
        if taken.rows_affected() == 0 {
            let exists: Option<(i32,)> = sqlx::query_as("SELECT item_id FROM hardware WHERE item_id = $1")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?;
            return Err(match exists {
                None => AppError::NotFound("item requested does not exist".into()),
                Some(_) => AppError::Unavailable("selected hardware item is unavailable right now".into()),
            });
        }

        let transaction = sqlx::query_as::<_, HardwareTransaction>(&format!(
            "INSERT INTO hardware_transactions (item_id, user_id, checkout_date) \
             VALUES ($1, $2, clock_timestamp()) RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            transaction_id = transaction.transaction_id,
            item_id,
            user_id,
            state = ?transaction.state(),
            "hardware checked out"
        );
        Ok(transaction)
    }

    /// Close an open loan and put the unit back.
    pub async fn return_item(pool: &PgPool, transaction_id: i32) -> Result<HardwareTransaction, AppError> {
        let mut tx = pool.begin().await?;

        let closed = sqlx::query_as::<_, HardwareTransaction>(&format!(
            "UPDATE hardware_transactions SET return_date = clock_timestamp() \
             WHERE transaction_id = $1 AND return_date IS NULL RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(transaction) = closed else {
            let exists: Option<(i32,)> =
                sqlx::query_as("SELECT transaction_id FROM hardware_transactions WHERE transaction_id = $1")
                    .bind(transaction_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match exists {
                None => AppError::NotFound("transaction does not exist".into()),
                Some(_) => AppError::AlreadyReturned,
            });
        };

        sqlx::query("UPDATE hardware SET quantity_available = quantity_available + 1 WHERE item_id = $1")
            .bind(transaction.item_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            transaction_id,
            item_id = transaction.item_id,
            state = ?transaction.state(),
            "hardware returned"
        );
        Ok(transaction)
    }

    /// Open loans first, then by most recent return.
    pub async fn history(pool: &PgPool, user_id: Option<i32>) -> Result<Vec<HardwareTransaction>, AppError> {
        let filter = if user_id.is_some() { " WHERE user_id = $1" } else { "" };
        let sql = format!(
            "SELECT {} FROM hardware_transactions{} \
             ORDER BY return_date DESC NULLS FIRST, transaction_id DESC",
            TRANSACTION_COLUMNS, filter
        );
        tracing::debug!(sql = %sql, user_id = ?user_id, "query");
        let mut query = sqlx::query_as::<_, HardwareTransaction>(&sql);
        if let Some(id) = user_id {
            query = query.bind(id);
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows)
    }
}
