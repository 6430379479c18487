//! DSE (Dar es Salaam Stock Exchange) broker API client.
//!
//! Talks to the user's local DSE API service. Auth is an `X-API-Key`
//! header; base URL comes from `DSE_API_URL`, default
//! `http://localhost:9090`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{
    ActivityQuery, BrokerAccount, BrokerActivity, BrokerActivityPage, BrokerBalance, BrokerClient,
    BrokerError, BrokerHoldings, BrokerPagination, BrokerPosition, BrokerResult,
};

const DEFAULT_BASE_URL: &str = "http://localhost:9090";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    #[serde(default)]
    accounts: Vec<WireAccount>,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    id: String,
    name: Option<String>,
    account_number: Option<String>,
    currency: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActivitiesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    data: Vec<WireActivity>,
    pagination: Option<WirePagination>,
}

#[derive(Debug, Deserialize)]
struct WireActivity {
    id: Option<String>,
    activity_type: Option<String>,
    symbol: Option<String>,
    symbol_name: Option<String>,
    quantity: Option<f64>,
    price: Option<f64>,
    amount: Option<f64>,
    fee: Option<f64>,
    currency: Option<String>,
    trade_date: Option<String>,
    settlement_date: Option<String>,
    description: Option<String>,
    external_reference_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WirePagination {
    offset: Option<i64>,
    limit: Option<i64>,
    total: Option<i64>,
    has_more: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct HoldingsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    balances: Vec<WireBalance>,
    #[serde(default, deserialize_with = "null_as_empty")]
    positions: Vec<WirePosition>,
}

#[derive(Debug, Deserialize)]
struct WireBalance {
    currency: Option<String>,
    cash: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WirePosition {
    symbol: Option<String>,
    name: Option<String>,
    quantity: Option<f64>,
    price: Option<f64>,
    average_cost: Option<f64>,
    currency: Option<String>,
}

/// Error payload the DSE service returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(alias = "message")]
    error: Option<String>,
}

/// The DSE service sends `null` instead of `[]` for empty collections.
pub(super) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Option::<Vec<T>>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

// =============================================================================
// Helpers
// =============================================================================

/// Pick the base URL: explicit value beats env beats default. Trailing
/// slashes are stripped so path concatenation stays predictable.
pub(super) fn resolve_base_url(explicit: Option<String>, env_value: Option<String>) -> String {
    explicit
        .or(env_value)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// The DSE service reports plain `YYYY-MM-DD` dates; storage and the API
/// use RFC 3339, so pin them to midnight UTC.
pub(super) fn normalize_date(date: Option<String>) -> Option<String> {
    date.map(|d| format!("{}T00:00:00Z", d))
}

/// Extract a human-readable message from a non-2xx body. Prefers the
/// structured `error`/`message` field, falls back to the raw body.
pub(super) fn api_error_message(body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<WireError>(body)
        && let Some(message) = err.error
    {
        return message;
    }
    body.to_string()
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the local DSE broker API service.
pub struct DseClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DseClient {
    /// Create a client with the base URL from `DSE_API_URL` (or the
    /// default).
    pub fn new(api_key: String) -> Self {
        let base_url = resolve_base_url(None, std::env::var("DSE_API_URL").ok());
        Self::with_base_url(api_key, base_url)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: resolve_base_url(Some(base_url), None),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> BrokerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DSE request: {}", path);

        let mut request = self.client.get(&url);
        if !self.api_key.is_empty() {
            request = request.header("X-API-Key", &self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BrokerError::Timeout
            } else {
                BrokerError::Request {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        debug!("DSE response status: {} for {}", status, path);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        response.json::<T>().await.map_err(|e| BrokerError::Parse {
            message: e.to_string(),
        })
    }
}

impl BrokerClient for DseClient {
    async fn list_accounts(&self) -> BrokerResult<Vec<BrokerAccount>> {
        let resp: AccountsResponse = self.get("/api/v1/broker/accounts").await?;

        Ok(resp
            .accounts
            .into_iter()
            .map(|a| BrokerAccount {
                id: a.id,
                name: a.name,
                account_number: a.account_number,
                currency: a.currency,
                status: a.status,
            })
            .collect())
    }

    async fn account_activities(
        &self,
        account_id: &str,
        query: &ActivityQuery,
    ) -> BrokerResult<BrokerActivityPage> {
        let mut path = format!("/api/v1/broker/accounts/{}/activities?", account_id);
        if let Some(s) = &query.start_date {
            path.push_str(&format!("start_date={}&", s));
        }
        if let Some(e) = &query.end_date {
            path.push_str(&format!("end_date={}&", e));
        }
        if let Some(o) = query.offset {
            path.push_str(&format!("offset={}&", o));
        }
        if let Some(l) = query.limit {
            path.push_str(&format!("limit={}&", l));
        }
        let path = path.trim_end_matches(['&', '?']).to_string();

        let resp: ActivitiesResponse = self.get(&path).await?;

        let activities = resp
            .data
            .into_iter()
            .map(|a| BrokerActivity {
                external_ref: a.external_reference_id.or(a.id),
                activity_type: a.activity_type,
                symbol: a.symbol,
                symbol_name: a.symbol_name,
                quantity: a.quantity,
                price: a.price,
                amount: a.amount,
                fee: a.fee,
                currency: a.currency,
                trade_date: normalize_date(a.trade_date),
                settlement_date: normalize_date(a.settlement_date),
                description: a.description,
            })
            .collect();

        let pagination = resp.pagination.map(|p| BrokerPagination {
            offset: p.offset,
            limit: p.limit,
            total: p.total,
            has_more: p.has_more,
        });

        Ok(BrokerActivityPage {
            activities,
            pagination,
        })
    }

    async fn account_holdings(&self, account_id: &str) -> BrokerResult<BrokerHoldings> {
        let resp: HoldingsResponse = self
            .get(&format!("/api/v1/broker/accounts/{}/holdings", account_id))
            .await?;

        Ok(BrokerHoldings {
            balances: resp
                .balances
                .into_iter()
                .map(|b| BrokerBalance {
                    currency: b.currency,
                    cash: b.cash,
                })
                .collect(),
            positions: resp
                .positions
                .into_iter()
                .map(|p| BrokerPosition {
                    symbol: p.symbol,
                    name: p.name,
                    quantity: p.quantity,
                    price: p.price,
                    average_cost: p.average_cost,
                    currency: p.currency,
                })
                .collect(),
        })
    }
}
