//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::static_assets::serve_frontend;
use super::v1::{
    self, AccountResponse, ActivityResponse, ErrorResponse, HealthResponse, PaginatedActivities,
    PositionResponse, SyncStartedResponse, SyncStatusResponse,
};
use super::websocket;
use crate::broker::BrokerClient;
use crate::db::Database;

/// Build routes with generic database and broker types.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database and BrokerClient traits. It applies the turbofish
/// operator automatically.
macro_rules! routes {
    ($D:ty, $B:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D, $B>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "folio API",
        version = "0.3.0",
        description = "Self-hosted DSE portfolio tracker",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::root,
        v1::health,
        v1::trigger_sync,
        v1::sync_status,
        v1::list_accounts,
        v1::get_account,
        v1::list_account_positions,
        v1::list_account_activities,
    ),
    components(
        schemas(
            HealthResponse,
            SyncStartedResponse,
            SyncStatusResponse,
            AccountResponse,
            PositionResponse,
            ActivityResponse,
            PaginatedActivities,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "sync", description = "Broker sync endpoints"),
        (name = "accounts", description = "Account and position endpoints"),
        (name = "activities", description = "Activity endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with WebSocket, embedded frontend, and optional docs
pub fn create_router<D, B>(state: AppState<D, B>, enable_docs: bool) -> Router
where
    D: Database + 'static,
    B: BrokerClient + 'static,
{
    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/api", get(v1::root))
        .route("/api/health", get(v1::health));

    // V1 routes (generic over Database and BrokerClient)
    let v1_routes = routes!(D, B => {
        post "/sync" => v1::trigger_sync,
        get "/sync/status" => v1::sync_status,
        get "/accounts" => v1::list_accounts,
        get "/accounts/{id}" => v1::get_account,
        get "/accounts/{id}/positions" => v1::list_account_positions,
        get "/accounts/{id}/activities" => v1::list_account_activities,
    });

    let mut router = system_routes
        .nest("/api/v1", v1_routes)
        .route("/ws", get(websocket::ws_handler::<D, B>))
        .fallback(serve_frontend);

    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router.with_state(state)
}
