//! SQLite PositionRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{DbError, DbResult, Position, PositionRepository};

/// SQLx-backed position repository.
pub struct SqlitePositionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_position(row: &sqlx::sqlite::SqliteRow) -> Position {
    Position {
        id: row.get("id"),
        account_id: row.get("account_id"),
        symbol: row.get("symbol"),
        name: row.get("name"),
        quantity: row.get("quantity"),
        price: row.get("price"),
        average_cost: row.get("average_cost"),
        currency: row.get("currency"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> PositionRepository for SqlitePositionRepository<'a> {
    async fn replace_for_account(
        &self,
        account_id: &str,
        positions: &[Position],
    ) -> DbResult<usize> {
        let mut tx = self.pool.begin().await.map_err(DbError::database)?;

        sqlx::query("DELETE FROM position WHERE account_id = ?")
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::database)?;

        let now = current_timestamp();
        for position in positions {
            let id = if position.id.is_empty() {
                format!("{}-{}", generate_entity_id(), position.symbol)
            } else {
                position.id.clone()
            };

            sqlx::query(
                "INSERT INTO position (id, account_id, symbol, name, quantity, price, average_cost, currency, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(account_id)
            .bind(&position.symbol)
            .bind(&position.name)
            .bind(position.quantity)
            .bind(position.price)
            .bind(position.average_cost)
            .bind(&position.currency)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::database)?;
        }

        tx.commit().await.map_err(DbError::database)?;
        Ok(positions.len())
    }

    async fn list_by_account(&self, account_id: &str) -> DbResult<Vec<Position>> {
        let rows = sqlx::query("SELECT * FROM position WHERE account_id = ? ORDER BY symbol ASC")
            .bind(account_id)
            .fetch_all(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(rows.iter().map(row_to_position).collect())
    }
}
