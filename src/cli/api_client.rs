use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

const DEFAULT_API_URL: &str = "http://localhost:3737";

/// Thin wrapper over reqwest for talking to a running folio API.
///
/// Base URL resolution: explicit `--api-url` flag, then the
/// `FOLIO_API_URL` environment variable, then localhost.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var("FOLIO_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    /// Deserialize a successful body, or map a non-2xx status and its
    /// body text onto [`CliError::ApiError`].
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CliError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Install a crypto provider before building any reqwest client.
    fn init_crypto() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    #[test]
    fn explicit_url_wins() {
        init_crypto();
        let client = ApiClient::new(Some("http://custom:8080".to_string()));
        assert_eq!(client.base_url(), "http://custom:8080");
    }

    #[test]
    fn falls_back_to_a_usable_default() {
        init_crypto();
        // FOLIO_API_URL may be set in the environment; either way the
        // resolved URL must be non-empty.
        let client = ApiClient::new(None);
        assert!(!client.base_url().is_empty());
    }

    #[test]
    fn builders_join_base_and_path() {
        init_crypto();
        let client = ApiClient::new(Some("http://host:1".to_string()));
        let _get = client.get("/api/v1/accounts");
        let _post = client.post("/api/v1/sync");
    }
}
