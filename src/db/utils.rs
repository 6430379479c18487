//! Small helpers shared by the repositories.

use sqlx::types::chrono::Utc;

/// 8-character hex id for locally created rows (sync runs). Broker-owned
/// entities keep the broker's ids instead.
pub fn generate_entity_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:08x}", (now.as_secs() as u32) ^ now.subsec_nanos())
}

/// Current UTC time in the `YYYY-MM-DD HH:MM:SS` form the schema stores.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
