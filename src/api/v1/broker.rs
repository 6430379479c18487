//! Broker sync endpoints.
//!
//! Starting a sync is a two-phase operation: the request is accepted
//! (a `running` sync run is persisted and 202 is returned) and the pull
//! itself happens in a spawned task. Completion and failure are surfaced
//! over the WebSocket as `SyncCompleted`/`SyncFailed`, never in the
//! start response.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::notifier::UpdateMessage;
use crate::broker::BrokerClient;
use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{Database, DbError, SyncRun, SyncRunRepository};

use super::ErrorResponse;

/// Response returned when a sync run is accepted
#[derive(Serialize, ToSchema)]
pub struct SyncStartedResponse {
    /// Identifier of the accepted run (8-character hex)
    #[schema(example = "a1b2c3d4")]
    pub run_id: String,
    /// Run status at acceptance time, always "running"
    #[schema(example = "running")]
    pub status: String,
}

/// Status of the most recent sync run
#[derive(Serialize, ToSchema)]
pub struct SyncStatusResponse {
    /// Run identifier, absent when no sync has run yet
    pub run_id: Option<String>,
    /// Run status ("running", "completed", "failed") or "never_synced"
    #[schema(example = "completed")]
    pub status: String,
    /// Failure message for failed runs
    pub message: Option<String>,
    /// Accounts written by the run
    pub accounts: usize,
    /// Activities written by the run
    pub activities: usize,
    /// Positions written by the run
    pub positions: usize,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

impl From<SyncRun> for SyncStatusResponse {
    fn from(run: SyncRun) -> Self {
        Self {
            run_id: Some(run.id),
            status: run.status.to_string(),
            message: run.message,
            accounts: run.accounts,
            activities: run.activities,
            positions: run.positions,
            started_at: Some(run.started_at),
            finished_at: run.finished_at,
        }
    }
}

/// Start a broker sync
///
/// Persists a `running` sync run, spawns the pull in the background, and
/// returns 202 immediately. Progress is broadcast over `/ws`.
#[utoipa::path(
    post,
    path = "/api/v1/sync",
    tag = "sync",
    responses(
        (status = 202, description = "Sync run accepted", body = SyncStartedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn trigger_sync<D: Database + 'static, B: BrokerClient + 'static>(
    State(state): State<AppState<D, B>>,
) -> Result<(StatusCode, Json<SyncStartedResponse>), (StatusCode, Json<ErrorResponse>)> {
    let run_id = generate_entity_id();
    let run = SyncRun::started(run_id.clone(), current_timestamp());

    // Acceptance means the run row is durable. If this fails the request
    // fails and no task is spawned.
    state.db().sync_runs().create(&run).await.map_err(|e| {
        error!("Failed to record sync run: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    info!("Accepted sync run {}", run_id);
    state.notifier().notify(UpdateMessage::SyncStarted {
        run_id: run_id.clone(),
    });

    let db = state.db_arc();
    let manager = state.sync_manager().clone();
    let notifier = state.notifier().clone();
    let task_run_id = run_id.clone();

    tokio::spawn(async move {
        match manager.run(db.as_ref(), &task_run_id).await {
            Ok(summary) => {
                notifier.notify(UpdateMessage::SyncCompleted {
                    run_id: task_run_id,
                    accounts: summary.accounts,
                    activities: summary.activities,
                    positions: summary.positions,
                });
            }
            Err(e) => {
                notifier.notify(UpdateMessage::SyncFailed {
                    run_id: task_run_id,
                    message: e.to_string(),
                });
            }
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(SyncStartedResponse {
            run_id,
            status: "running".to_string(),
        }),
    ))
}

/// Get sync status
///
/// Returns the most recent sync run, or a `never_synced` placeholder.
#[utoipa::path(
    get,
    path = "/api/v1/sync/status",
    tag = "sync",
    responses(
        (status = 200, description = "Sync status retrieved", body = SyncStatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sync_status<D: Database, B: BrokerClient>(
    State(state): State<AppState<D, B>>,
) -> Result<Json<SyncStatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let latest = state.db().sync_runs().latest().await.map_err(|e| match e {
        DbError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    match latest {
        Some(run) => Ok(Json(SyncStatusResponse::from(run))),
        None => Ok(Json(SyncStatusResponse {
            run_id: None,
            status: "never_synced".to_string(),
            message: None,
            accounts: 0,
            activities: 0,
            positions: 0,
            started_at: None,
            finished_at: None,
        })),
    }
}
