use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{Account, Activity, ApiError, Paginated, Position, SyncStarted, SyncStatus};

const API_BASE: &str = "/api/v1";

/// API client error type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ApiClientError {
    Network(String),
    Server(ApiError),
    Deserialization(String),
}

impl ApiClientError {
    /// Human-readable message, used for error toasts
    pub fn message(&self) -> String {
        match self {
            ApiClientError::Network(msg) => msg.clone(),
            ApiClientError::Server(err) => err.error.clone(),
            ApiClientError::Deserialization(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiClientError::Server(err) => write!(f, "Server error: {}", err.error),
            ApiClientError::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

type Result<T> = std::result::Result<T, ApiClientError>;

/// Helper function to handle API responses
async fn handle_response<T: DeserializeOwned>(
    request: gloo_net::http::RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiClientError::Network(e.to_string()))?;

    let status = response.status();

    if (200..300).contains(&status) {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiClientError::Deserialization(e.to_string()))
    } else {
        let error = response
            .json::<ApiError>()
            .await
            .map_err(|e| ApiClientError::Deserialization(e.to_string()))?;
        Err(ApiClientError::Server(error))
    }
}

/// Sync API
pub mod sync {
    use super::*;

    pub async fn start() -> Result<SyncStarted> {
        let url = format!("{}/sync", API_BASE);
        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let status = response.status();

        if (200..300).contains(&status) {
            response
                .json::<SyncStarted>()
                .await
                .map_err(|e| ApiClientError::Deserialization(e.to_string()))
        } else {
            let error = response
                .json::<ApiError>()
                .await
                .map_err(|e| ApiClientError::Deserialization(e.to_string()))?;
            Err(ApiClientError::Server(error))
        }
    }

    pub async fn status() -> Result<SyncStatus> {
        let url = format!("{}/sync/status", API_BASE);
        handle_response(Request::get(&url)).await
    }
}

/// Accounts API
pub mod accounts {
    use super::*;

    pub async fn list() -> Result<Vec<Account>> {
        let url = format!("{}/accounts", API_BASE);
        handle_response(Request::get(&url)).await
    }

    pub async fn get(id: &str) -> Result<Account> {
        let url = format!("{}/accounts/{}", API_BASE, id);
        handle_response(Request::get(&url)).await
    }

    pub async fn positions(id: &str) -> Result<Vec<Position>> {
        let url = format!("{}/accounts/{}/positions", API_BASE, id);
        handle_response(Request::get(&url)).await
    }
}

/// Activities API
pub mod activities {
    use super::*;

    pub async fn list(
        account_id: &str,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Paginated<Activity>> {
        let mut url = format!("{}/accounts/{}/activities", API_BASE, account_id);
        let mut query_params = vec![];

        if let Some(lim) = limit {
            query_params.push(format!("limit={}", lim));
        }
        if let Some(off) = offset {
            query_params.push(format!("offset={}", off));
        }

        if !query_params.is_empty() {
            url = format!("{}?{}", url, query_params.join("&"));
        }

        handle_response(Request::get(&url)).await
    }
}
