use crate::mirror::domain::RecordKind;
use crate::mirror::services::NvdQuery;
use crate::ports::outbound::{NvdPage, NvdRepository};
use crate::shared::error::SyncError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Connection settings for the NVD API
#[derive(Debug, Clone)]
pub struct NvdClientConfig {
    /// Scheme and host, e.g. `https://services.nvd.nist.gov`
    pub base_url: String,
    /// Optional NVD API key, sent in the `apiKey` header
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for NvdClientConfig {
    fn default() -> Self {
        Self {
            base_url: NvdClient::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(NvdClient::DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdResponse {
    results_per_page: u64,
    start_index: u64,
    total_results: u64,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// NvdClient adapter for the NVD REST API 2.0
///
/// This adapter implements the NvdRepository port with an async reqwest
/// client. It performs one GET per call and reports failures as typed
/// `SyncError`s; retrying is the caller's job.
pub struct NvdClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NvdClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://services.nvd.nist.gov";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

    pub fn new(config: NvdClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(SyncError::Validation {
                message: format!(
                    "API URL must start with http:// or https:// (got '{}')",
                    config.base_url
                ),
            }
            .into());
        }

        let api_key = config.api_key.filter(|key| !key.trim().is_empty());
        if let Some(key) = &api_key {
            // Reject keys that would produce an invalid header before any request is made
            reqwest::header::HeaderValue::from_str(key).map_err(|_| SyncError::Validation {
                message: "API key contains characters that are not allowed in an HTTP header"
                    .to_string(),
            })?;
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("nvd-sync/{}", version);
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the request URL; `startIndex` always comes last
    pub fn build_url(&self, kind: RecordKind, query: &NvdQuery, start_index: u64) -> String {
        let query_string = query
            .params()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .chain(std::iter::once(format!("startIndex={}", start_index)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/{}?{}", self.base_url, kind.endpoint(), query_string)
    }
}

#[async_trait]
impl NvdRepository for NvdClient {
    async fn fetch_page(
        &self,
        kind: RecordKind,
        query: &NvdQuery,
        start_index: u64,
    ) -> Result<NvdPage> {
        let url = self.build_url(kind, query, start_index);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("apiKey", key.as_str());
        }

        let response = request.send().await.map_err(|e| SyncError::TransportError {
            url: url.clone(),
            details: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            // The NVD API explains rejected requests in a `message` header
            let details = response
                .headers()
                .get("message")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

            return Err(SyncError::ApiError {
                status: status.as_u16(),
                url,
                details,
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| SyncError::TransportError {
            url: url.clone(),
            details: e.to_string(),
        })?;

        parse_page(kind, url, &body)
    }
}

/// Decodes a page body
///
/// Truncated or syntactically broken bodies are transport failures (the
/// request is worth repeating); a well-formed body of the wrong shape is a
/// malformed response.
fn parse_page(kind: RecordKind, url: String, body: &[u8]) -> Result<NvdPage> {
    let response: NvdResponse = serde_json::from_slice(body).map_err(|e| -> anyhow::Error {
        if e.is_data() {
            SyncError::MalformedRecord {
                kind: kind.to_string(),
                details: format!("unexpected page shape from {}: {}", url, e),
            }
            .into()
        } else {
            SyncError::TransportError {
                url: url.clone(),
                details: format!("unreadable response body: {}", e),
            }
            .into()
        }
    })?;

    let NvdResponse {
        results_per_page,
        start_index,
        total_results,
        mut rest,
    } = response;

    let items = match rest.remove(kind.page_key()) {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            return Err(SyncError::MalformedRecord {
                kind: kind.to_string(),
                details: format!("'{}' is not an array in {}", kind.page_key(), url),
            }
            .into())
        }
    };

    Ok(NvdPage {
        url,
        results_per_page,
        start_index,
        total_results,
        items,
    })
}
