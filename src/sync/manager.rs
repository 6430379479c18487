//! Sync manager - high-level broker pull orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::broker::{ActivityQuery, BrokerClient, BrokerError};
use crate::db::utils::current_timestamp;
use crate::db::{
    Account, AccountRepository, Activity, ActivityRepository, Database, Position,
    PositionRepository, SyncRunRepository, SyncRunStatus,
};

/// Activities fetched per page from the broker.
const ACTIVITY_PAGE_SIZE: i64 = 100;

/// Errors that can occur during a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),
}

/// Entity counts from a completed sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub accounts: usize,
    pub activities: usize,
    pub positions: usize,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.accounts + self.activities + self.positions
    }
}

/// Orchestrates a full broker pull.
///
/// Generic over [`BrokerClient`] so tests can script broker responses.
/// Cloning is cheap; the broker client is shared.
pub struct SyncManager<B: BrokerClient> {
    broker: Arc<B>,
}

impl<B: BrokerClient> Clone for SyncManager<B> {
    fn clone(&self) -> Self {
        Self {
            broker: Arc::clone(&self.broker),
        }
    }
}

impl<B: BrokerClient> SyncManager<B> {
    pub fn new(broker: B) -> Self {
        Self {
            broker: Arc::new(broker),
        }
    }

    /// Execute an accepted sync run to completion.
    ///
    /// The `running` sync_run row for `run_id` must already exist; this
    /// finishes it as `completed` (with counts) or `failed` (with the
    /// error message). Idempotent with respect to broker data: accounts
    /// and activities upsert, positions are replaced per account, so
    /// overlapping runs converge on the same state.
    pub async fn run<D: Database>(
        &self,
        db: &D,
        run_id: &str,
    ) -> Result<SyncSummary, SyncError> {
        let result = self.pull(db).await;

        let mut run = db.sync_runs().get(run_id).await?;
        run.finished_at = Some(current_timestamp());

        match &result {
            Ok(summary) => {
                run.status = SyncRunStatus::Completed;
                run.accounts = summary.accounts;
                run.activities = summary.activities;
                run.positions = summary.positions;
                info!(
                    run_id,
                    accounts = summary.accounts,
                    activities = summary.activities,
                    positions = summary.positions,
                    "Broker sync completed"
                );
            }
            Err(e) => {
                run.status = SyncRunStatus::Failed;
                run.message = Some(e.to_string());
                warn!(run_id, error = %e, "Broker sync failed");
            }
        }

        db.sync_runs().update(&run).await?;
        result
    }

    /// Pull everything the broker reports: accounts, then per-account
    /// activity pages and holdings.
    async fn pull<D: Database>(&self, db: &D) -> Result<SyncSummary, SyncError> {
        let mut summary = SyncSummary::default();

        let broker_accounts = self.broker.list_accounts().await?;
        info!("Broker reported {} account(s)", broker_accounts.len());

        for broker_account in broker_accounts {
            let account = Account {
                id: broker_account.id.clone(),
                name: broker_account
                    .name
                    .unwrap_or_else(|| broker_account.id.clone()),
                account_number: broker_account.account_number,
                currency: broker_account.currency.unwrap_or_else(|| "TZS".to_string()),
                status: broker_account.status,
                institution: "DSE".to_string(),
                ..Default::default()
            };
            let account = db.accounts().upsert(&account).await?;
            summary.accounts += 1;

            summary.activities += self.pull_activities(db, &account.id).await?;
            summary.positions += self.pull_positions(db, &account.id).await?;
        }

        Ok(summary)
    }

    async fn pull_activities<D: Database>(
        &self,
        db: &D,
        account_id: &str,
    ) -> Result<usize, SyncError> {
        let mut count = 0usize;
        let mut offset = 0i64;

        loop {
            let query = ActivityQuery {
                offset: Some(offset),
                limit: Some(ACTIVITY_PAGE_SIZE),
                ..Default::default()
            };
            let page = self.broker.account_activities(account_id, &query).await?;
            let fetched = page.activities.len();

            for broker_activity in page.activities {
                let activity = Activity {
                    account_id: account_id.to_string(),
                    external_ref: broker_activity.external_ref,
                    activity_type: broker_activity
                        .activity_type
                        .unwrap_or_else(|| "UNKNOWN".to_string()),
                    symbol: broker_activity.symbol,
                    symbol_name: broker_activity.symbol_name,
                    quantity: broker_activity.quantity,
                    price: broker_activity.price,
                    amount: broker_activity.amount,
                    fee: broker_activity.fee,
                    currency: broker_activity.currency,
                    trade_date: broker_activity.trade_date,
                    settlement_date: broker_activity.settlement_date,
                    description: broker_activity.description,
                    ..Default::default()
                };
                db.activities().upsert(&activity).await?;
                count += 1;
            }

            let has_more = page
                .pagination
                .and_then(|p| p.has_more)
                .unwrap_or(false);
            if !has_more || fetched == 0 {
                break;
            }
            offset += fetched as i64;
        }

        Ok(count)
    }

    async fn pull_positions<D: Database>(
        &self,
        db: &D,
        account_id: &str,
    ) -> Result<usize, SyncError> {
        let holdings = self.broker.account_holdings(account_id).await?;

        let positions: Vec<Position> = holdings
            .positions
            .into_iter()
            .filter_map(|p| {
                let symbol = p.symbol?;
                Some(Position {
                    account_id: account_id.to_string(),
                    symbol,
                    name: p.name,
                    quantity: p.quantity.unwrap_or_default(),
                    price: p.price,
                    average_cost: p.average_cost,
                    currency: p.currency,
                    ..Default::default()
                })
            })
            .collect();

        Ok(db
            .positions()
            .replace_for_account(account_id, &positions)
            .await?)
    }
}
