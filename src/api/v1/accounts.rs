//! Account and position handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::broker::BrokerClient;
use crate::db::{Account, AccountRepository, Database, DbError, Position, PositionRepository};

use super::ErrorResponse;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Account response DTO
#[derive(Serialize, ToSchema)]
pub struct AccountResponse {
    /// Broker-assigned account id
    #[schema(example = "acc-001")]
    pub id: String,
    /// Display name
    #[schema(example = "CDS Account")]
    pub name: String,
    /// Broker account number
    #[schema(example = "123456")]
    pub account_number: Option<String>,
    /// ISO currency code
    #[schema(example = "TZS")]
    pub currency: String,
    /// Broker-side status
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Institution name
    #[schema(example = "DSE")]
    pub institution: String,
    /// Last update timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            account_number: a.account_number,
            currency: a.currency,
            status: a.status,
            institution: a.institution,
            updated_at: a.updated_at,
        }
    }
}

/// Position response DTO
#[derive(Serialize, ToSchema)]
pub struct PositionResponse {
    /// Ticker symbol
    #[schema(example = "CRDB")]
    pub symbol: String,
    /// Instrument name
    #[schema(example = "CRDB Bank Plc")]
    pub name: Option<String>,
    pub quantity: f64,
    /// Latest market price
    pub price: Option<f64>,
    /// Average acquisition cost
    pub average_cost: Option<f64>,
    /// ISO currency code
    #[schema(example = "TZS")]
    pub currency: Option<String>,
    pub updated_at: String,
}

impl From<Position> for PositionResponse {
    fn from(p: Position) -> Self {
        Self {
            symbol: p.symbol,
            name: p.name,
            quantity: p.quantity,
            price: p.price,
            average_cost: p.average_cost,
            currency: p.currency,
            updated_at: p.updated_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all accounts
///
/// Returns all synced accounts, ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "List of accounts", body = Vec<AccountResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_accounts<D: Database, B: BrokerClient>(
    State(state): State<AppState<D, B>>,
) -> Result<Json<Vec<AccountResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let accounts = state.db().accounts().list().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(
        accounts.into_iter().map(AccountResponse::from).collect(),
    ))
}

/// Get an account by ID
///
/// Returns a single account by its broker id
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Broker account id")
    ),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_account<D: Database, B: BrokerClient>(
    State(state): State<AppState<D, B>>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, (StatusCode, Json<ErrorResponse>)> {
    let account = state.db().accounts().get(&id).await.map_err(|e| match e {
        DbError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Account '{}' not found", id),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    Ok(Json(AccountResponse::from(account)))
}

/// List an account's positions
///
/// Returns the current open positions of one account, ordered by symbol
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/positions",
    tag = "accounts",
    params(
        ("id" = String, Path, description = "Broker account id")
    ),
    responses(
        (status = 200, description = "List of positions", body = Vec<PositionResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_account_positions<D: Database, B: BrokerClient>(
    State(state): State<AppState<D, B>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PositionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    // 404 for unknown accounts rather than an empty list.
    state.db().accounts().get(&id).await.map_err(|e| match e {
        DbError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Account '{}' not found", id),
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
    })?;

    let positions = state.db().positions().list_by_account(&id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(
        positions.into_iter().map(PositionResponse::from).collect(),
    ))
}
