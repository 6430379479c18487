//! SQLite ActivityRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_order_clause};
use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{Activity, ActivityRepository, DbError, DbResult, ListQuery, ListResult};

/// SQLx-backed activity repository.
pub struct SqliteActivityRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> Activity {
    Activity {
        id: row.get("id"),
        account_id: row.get("account_id"),
        external_ref: row.get("external_ref"),
        activity_type: row.get("activity_type"),
        symbol: row.get("symbol"),
        symbol_name: row.get("symbol_name"),
        quantity: row.get("quantity"),
        price: row.get("price"),
        amount: row.get("amount"),
        fee: row.get("fee"),
        currency: row.get("currency"),
        trade_date: row.get("trade_date"),
        settlement_date: row.get("settlement_date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

impl<'a> ActivityRepository for SqliteActivityRepository<'a> {
    async fn upsert(&self, activity: &Activity) -> DbResult<Activity> {
        let id = if activity.id.is_empty() {
            generate_entity_id()
        } else {
            activity.id.clone()
        };
        let created_at = current_timestamp();

        // The partial unique index on (account_id, external_ref) makes
        // re-synced broker rows update in place; rows without a broker
        // reference always insert.
        sqlx::query(
            "INSERT INTO activity (id, account_id, external_ref, activity_type, symbol, symbol_name,
                                   quantity, price, amount, fee, currency, trade_date,
                                   settlement_date, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(account_id, external_ref) WHERE external_ref IS NOT NULL DO UPDATE SET
                 activity_type = excluded.activity_type,
                 symbol = excluded.symbol,
                 symbol_name = excluded.symbol_name,
                 quantity = excluded.quantity,
                 price = excluded.price,
                 amount = excluded.amount,
                 fee = excluded.fee,
                 currency = excluded.currency,
                 trade_date = excluded.trade_date,
                 settlement_date = excluded.settlement_date,
                 description = excluded.description",
        )
        .bind(&id)
        .bind(&activity.account_id)
        .bind(&activity.external_ref)
        .bind(&activity.activity_type)
        .bind(&activity.symbol)
        .bind(&activity.symbol_name)
        .bind(activity.quantity)
        .bind(activity.price)
        .bind(activity.amount)
        .bind(activity.fee)
        .bind(&activity.currency)
        .bind(&activity.trade_date)
        .bind(&activity.settlement_date)
        .bind(&activity.description)
        .bind(&created_at)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        // Re-read by the upsert key so callers see the stored row.
        let row = match &activity.external_ref {
            Some(external_ref) => sqlx::query(
                "SELECT * FROM activity WHERE account_id = ? AND external_ref = ?",
            )
            .bind(&activity.account_id)
            .bind(external_ref)
            .fetch_one(self.pool)
            .await
            .map_err(DbError::database)?,
            None => sqlx::query("SELECT * FROM activity WHERE id = ?")
                .bind(&id)
                .fetch_one(self.pool)
                .await
                .map_err(DbError::database)?,
        };

        Ok(row_to_activity(&row))
    }

    async fn list_paginated(
        &self,
        account_id: &str,
        query: &ListQuery,
    ) -> DbResult<ListResult<Activity>> {
        let allowed_fields = ["trade_date", "settlement_date", "activity_type", "amount"];
        let order_clause = build_order_clause(query, &allowed_fields, "trade_date");
        let limit_clause = build_limit_offset_clause(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activity WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(self.pool)
            .await
            .map_err(DbError::database)?;

        let sql = format!(
            "SELECT * FROM activity WHERE account_id = ? {}{}",
            order_clause, limit_clause
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .fetch_all(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(ListResult {
            items: rows.iter().map(row_to_activity).collect(),
            total: total as usize,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        })
    }
}
