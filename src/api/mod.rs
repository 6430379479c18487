pub mod notifier;
mod routes;
mod state;
mod static_assets;
mod v1;
mod websocket;


use std::net::IpAddr;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use state::AppState;

use crate::broker::BrokerClient;
use crate::db::Database;
use crate::sync::SyncManager;

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Serve interactive API docs at /docs
    pub enable_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".parse().unwrap(),
            port: 3737,
            enable_docs: false,
        }
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration.
///
/// The caller provides the concrete database and broker client; the API
/// layer stays agnostic of both.
pub async fn run<D, B>(config: Config, db: D, broker: B) -> Result<(), Box<dyn std::error::Error>>
where
    D: Database + 'static,
    B: BrokerClient + 'static,
{
    init_tracing();

    let state = AppState::new(db, SyncManager::new(broker), notifier::ChangeNotifier::new());
    let app =
        routes::create_router(state, config.enable_docs).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
