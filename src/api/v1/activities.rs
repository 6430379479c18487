//! Activity handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::broker::BrokerClient;
use crate::db::{Activity, ActivityRepository, Database, ListQuery, SortOrder};

use super::ErrorResponse;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Activity response DTO
#[derive(Serialize, ToSchema)]
pub struct ActivityResponse {
    /// Unique identifier (8-character hex)
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    /// Owning account id
    #[schema(example = "acc-001")]
    pub account_id: String,
    /// Broker-side reference id
    pub external_ref: Option<String>,
    /// Activity type (buy, sell, dividend, ...)
    #[schema(example = "buy")]
    pub activity_type: String,
    /// Ticker symbol
    #[schema(example = "CRDB")]
    pub symbol: Option<String>,
    pub symbol_name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub fee: Option<f64>,
    pub currency: Option<String>,
    /// Trade date (RFC 3339)
    #[schema(example = "2025-01-01T00:00:00Z")]
    pub trade_date: Option<String>,
    pub settlement_date: Option<String>,
    pub description: Option<String>,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id,
            account_id: a.account_id,
            external_ref: a.external_ref,
            activity_type: a.activity_type,
            symbol: a.symbol,
            symbol_name: a.symbol_name,
            quantity: a.quantity,
            price: a.price,
            amount: a.amount,
            fee: a.fee,
            currency: a.currency,
            trade_date: a.trade_date,
            settlement_date: a.settlement_date,
            description: a.description,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListActivitiesQuery {
    /// Maximum number of items to return
    #[param(example = 20)]
    pub limit: Option<usize>,
    /// Number of items to skip
    #[param(example = 0)]
    pub offset: Option<usize>,
    /// Field to sort by (trade_date, activity_type, symbol, amount)
    #[param(example = "trade_date")]
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    #[param(example = "desc")]
    pub order: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedActivities {
    pub items: Vec<ActivityResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List an account's activities
///
/// Returns a paginated list of activities with optional sorting
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/activities",
    tag = "activities",
    params(
        ("id" = String, Path, description = "Broker account id"),
        ListActivitiesQuery
    ),
    responses(
        (status = 200, description = "Paginated list of activities", body = PaginatedActivities),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_account_activities<D: Database, B: BrokerClient>(
    State(state): State<AppState<D, B>>,
    Path(id): Path<String>,
    Query(query): Query<ListActivitiesQuery>,
) -> Result<Json<PaginatedActivities>, (StatusCode, Json<ErrorResponse>)> {
    let db_query = ListQuery {
        limit: query.limit,
        offset: query.offset,
        sort_by: query.sort.clone(),
        sort_order: match query.order.as_deref() {
            Some("desc") => Some(SortOrder::Desc),
            Some("asc") => Some(SortOrder::Asc),
            _ => None,
        },
    };

    let result = state
        .db()
        .activities()
        .list_paginated(&id, &db_query)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    let items: Vec<ActivityResponse> = result.items.into_iter().map(ActivityResponse::from).collect();

    Ok(Json(PaginatedActivities {
        items,
        total: result.total,
        limit: result.limit.unwrap_or(50),
        offset: result.offset,
    }))
}
