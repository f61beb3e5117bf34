//! Authentication handling for the Battle.net API.
//!
//! Exchanges a client ID and secret for a Bearer token using the OAuth2
//! client-credentials grant. The token is fetched once at startup and never
//! refreshed.

use anyhow::Result;
use reqwest::Client;
use crate::client::types::{Credentials, TokenResponse};

/// # Battle.net Authentication Handler
///
/// Posts `grant_type=client_credentials` with HTTP Basic auth to the token
/// endpoint and decodes the `access_token` field of the JSON response.
pub struct BattleNetAuth {
    /// Full URL of the OAuth token endpoint
    token_url: String,
    /// HTTP client for token requests
    client: Client,
}

impl BattleNetAuth {
    pub fn new(token_url: String) -> Self {
        Self::with_client(token_url, Client::new())
    }

    pub fn with_client(token_url: String, client: Client) -> Self {
        Self { token_url, client }
    }

    pub async fn get_access_token(&self, credentials: &Credentials) -> Result<String> {
        tracing::info!("Requesting access token for client: {}", credentials.client_id);
        tracing::debug!("Making token request to: {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error during token request: {}", e);
                anyhow::anyhow!("Failed to connect to token endpoint at {}: {}", self.token_url, e)
            })?;

        let status = response.status();
        tracing::debug!("Token response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!("Token request failed with status {}: {}", status, error_body);

            match status.as_u16() {
                400 => anyhow::bail!("Token request rejected: {}", error_body),
                401 => anyhow::bail!("Authentication failed: invalid client ID or secret"),
                403 => anyhow::bail!("Access denied: client is not allowed to use the client-credentials grant"),
                404 => anyhow::bail!("Token endpoint not found. Check your token URL: {}", self.token_url),
                500..=599 => anyhow::bail!("Token endpoint server error ({}): {}", status, error_body),
                _ => anyhow::bail!("Token request failed with status {}: {}", status, error_body),
            }
        }

        let token: TokenResponse = response.json().await
            .map_err(|e| {
                tracing::error!("Failed to parse token response: {}", e);
                anyhow::anyhow!("Invalid response from token endpoint: {}", e)
            })?;

        if token.access_token.is_empty() {
            tracing::error!("Token endpoint returned an empty access token");
            anyhow::bail!("Token endpoint returned an empty access token");
        }

        tracing::info!("Access token obtained for client: {}", credentials.client_id);
        tracing::debug!("Received token: {}", token_preview(&token.access_token));

        Ok(token.access_token)
    }
}

/// First ten characters of a token followed by an ellipsis, for logs.
pub fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(10).collect();
    format!("{}...", prefix)
}
