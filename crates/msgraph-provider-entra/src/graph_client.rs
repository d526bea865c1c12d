//! Microsoft Graph API HTTP client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{EntraConfig, EntraError, EntraResult, TokenCache};

/// `OData` error response from Microsoft Graph.
#[derive(Debug, Deserialize)]
pub struct ODataError {
    pub error: ODataErrorBody,
}

/// `OData` error body.
#[derive(Debug, Deserialize)]
pub struct ODataErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "innerError")]
    pub inner_error: Option<serde_json::Value>,
}

/// One page of a Graph collection.
#[derive(Debug, Deserialize)]
pub struct ODataResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Continuation cursor; absent on the last page.
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Microsoft Graph API client.
#[derive(Debug)]
pub struct GraphClient {
    http_client: reqwest::Client,
    token_cache: Arc<TokenCache>,
    graph_endpoint: String,
    api_version: String,
}

impl GraphClient {
    /// Creates a new Graph client.
    pub fn new(
        http_client: reqwest::Client,
        token_cache: Arc<TokenCache>,
        graph_endpoint: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            token_cache,
            graph_endpoint: graph_endpoint.into(),
            api_version: api_version.into(),
        }
    }

    /// Builds the HTTP client shared by token and API requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn http_client(config: &EntraConfig) -> EntraResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EntraError::Config(format!("Failed to create HTTP client: {e}")))
    }

    /// Returns the base URL for Graph API requests.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.graph_endpoint, self.api_version)
    }

    /// Performs an authenticated GET request.
    ///
    /// Non-success responses are decoded as `OData` errors. Requests are not
    /// retried; a 401 drops the cached token so the next call requests a new one.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> EntraResult<T> {
        let token = self.token_cache.get_token().await?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            debug!(bytes = body.len(), "Graph response received");
            return serde_json::from_slice(&body).map_err(EntraError::from);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.token_cache.invalidate().await;
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Graph request failed");

        if let Ok(odata_error) = serde_json::from_str::<ODataError>(&error_body) {
            return Err(EntraError::GraphApi {
                status: status.as_u16(),
                code: odata_error.error.code,
                message: odata_error.error.message,
                inner_error: odata_error.error.inner_error.map(|v| v.to_string()),
            });
        }

        Err(EntraError::GraphApi {
            status: status.as_u16(),
            code: status.to_string(),
            message: error_body,
            inner_error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odata_error_parsing() {
        let json = r#"{
            "error": {
                "code": "Request_ResourceNotFound",
                "message": "Resource not found",
                "innerError": {"date": "2024-01-15"}
            }
        }"#;

        let error: ODataError = serde_json::from_str(json).unwrap();
        assert_eq!(error.error.code, "Request_ResourceNotFound");
        assert_eq!(error.error.message, "Resource not found");
        assert!(error.error.inner_error.is_some());
    }

    #[test]
    fn test_odata_response_parsing() {
        let json = r#"{
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#groups",
            "value": [{"id": "1"}, {"id": "2"}],
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/groups?$skiptoken=xxx"
        }"#;

        let response: ODataResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(response.value.len(), 2);
        assert_eq!(
            response.next_link.as_deref(),
            Some("https://graph.microsoft.com/v1.0/groups?$skiptoken=xxx")
        );
    }

    #[test]
    fn test_odata_response_without_value() {
        let response: ODataResponse<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(response.value.is_empty());
        assert!(response.next_link.is_none());
    }
}
