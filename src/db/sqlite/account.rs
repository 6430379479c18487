//! SQLite AccountRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{Account, AccountRepository, DbError, DbResult};

/// SQLx-backed account repository.
pub struct SqliteAccountRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
    Account {
        id: row.get("id"),
        name: row.get("name"),
        account_number: row.get("account_number"),
        currency: row.get("currency"),
        status: row.get("status"),
        institution: row.get("institution"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> AccountRepository for SqliteAccountRepository<'a> {
    async fn upsert(&self, account: &Account) -> DbResult<Account> {
        let now = current_timestamp();

        sqlx::query(
            "INSERT INTO account (id, name, account_number, currency, status, institution, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 account_number = excluded.account_number,
                 currency = excluded.currency,
                 status = excluded.status,
                 institution = excluded.institution,
                 updated_at = excluded.updated_at",
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.account_number)
        .bind(&account.currency)
        .bind(&account.status)
        .bind(&account.institution)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        self.get(&account.id).await
    }

    async fn get(&self, id: &str) -> DbResult<Account> {
        let row = sqlx::query(
            "SELECT id, name, account_number, currency, status, institution, created_at, updated_at
             FROM account WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::database)?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "Account".to_string(),
            id: id.to_string(),
        })?;

        Ok(row_to_account(&row))
    }

    async fn list(&self) -> DbResult<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, name, account_number, currency, status, institution, created_at, updated_at
             FROM account ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(rows.iter().map(row_to_account).collect())
    }
}
