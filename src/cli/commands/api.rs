//! API server command - starts REST API + WebSocket + embedded frontend

use std::net::IpAddr;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use crate::api::{self, Config};
use crate::broker::DseClient;
use crate::db::paths::get_db_path;
use crate::db::{Database, SqliteDatabase};

/// Run the API server
pub async fn run(
    host: IpAddr,
    port: u16,
    db: Option<PathBuf>,
    api_key: Option<String>,
    enable_docs: bool,
) -> Result<()> {
    let db_path = db.unwrap_or_else(get_db_path);

    println!("Opening database at {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }

    let database = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    database.migrate().await?;
    println!("Database migrations complete");

    let api_key = api_key
        .or_else(|| std::env::var("DSE_API_KEY").ok())
        .unwrap_or_default();
    let broker = DseClient::new(api_key);

    // Print startup banner BEFORE starting server (before logging is initialized)
    println!();
    println!("🚀 folio API server starting...");
    println!("   API:      http://{}:{}/api/v1", host, port);
    println!("   Events:   ws://{}:{}/ws", host, port);
    println!("   Frontend: http://{}:{}/", host, port);
    if enable_docs {
        println!("   Docs:     http://{}:{}/docs", host, port);
    }
    println!();
    println!("   Database: {}", db_path.display());
    println!("   Broker:   {}", broker.base_url());
    println!();

    // Pass the abstract Database and BrokerClient to the API layer
    api::run(
        Config {
            host,
            port,
            enable_docs,
        },
        database,
        broker,
    )
    .await
    .map_err(|e| miette::miette!("API server error: {}", e))?;

    Ok(())
}
