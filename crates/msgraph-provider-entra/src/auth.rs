//! OAuth2 client-credentials authentication for Microsoft Graph.

use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{EntraCredentials, EntraError, EntraResult};

/// OAuth2 token response from Azure AD.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Cached OAuth2 access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is expired or will expire within the grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Token cache for Graph access tokens.
#[derive(Debug)]
pub struct TokenCache {
    credentials: EntraCredentials,
    token_url: String,
    scope: String,
    http_client: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
    /// Grace period before expiry to trigger refresh (default: 5 minutes).
    grace_period: Duration,
}

impl TokenCache {
    /// Creates a token cache for `tenant_id` on the given authority and Graph hosts.
    pub fn new(
        credentials: EntraCredentials,
        http_client: reqwest::Client,
        login_endpoint: &str,
        graph_endpoint: &str,
        tenant_id: &str,
    ) -> Self {
        Self {
            credentials,
            token_url: format!("{login_endpoint}/{tenant_id}/oauth2/v2.0/token"),
            scope: format!("{graph_endpoint}/.default"),
            http_client,
            cached_token: RwLock::new(None),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid access token, requesting a new one if necessary.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> EntraResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Requesting access token");
        let new_token = self.acquire_token().await?;

        let mut cache = self.cached_token.write().await;
        *cache = Some(new_token.clone());

        Ok(new_token.access_token)
    }

    async fn acquire_token(&self) -> EntraResult<CachedToken> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            (
                "client_secret",
                self.credentials.client_secret.expose_secret(),
            ),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| EntraError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EntraError::Auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| EntraError::Auth(format!("Failed to parse token response: {e}")))?;

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in);
        debug!(%expires_at, "Acquired access token");

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }

    /// Invalidates the cached token, forcing a new request on next use.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_cached_token_expiry() {
        let token = CachedToken {
            access_token: "test".to_string(),
            expires_at: Utc::now() + Duration::minutes(10),
        };

        assert!(!token.is_expired(Duration::minutes(5)));
        assert!(token.is_expired(Duration::minutes(15)));
    }

    #[test]
    fn test_token_url_and_scope() {
        let cache = TokenCache::new(
            EntraCredentials {
                client_id: "app".to_string(),
                client_secret: SecretString::from("secret".to_string()),
            },
            reqwest::Client::new(),
            "https://login.microsoftonline.us",
            "https://graph.microsoft.us",
            "contoso",
        );
        assert_eq!(
            cache.token_url,
            "https://login.microsoftonline.us/contoso/oauth2/v2.0/token"
        );
        assert_eq!(cache.scope, "https://graph.microsoft.us/.default");
    }
}
