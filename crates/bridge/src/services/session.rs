//! Session manager: bearer-token exchange with the remote service.
//!
//! One token exchange per process. The returned credential is held in memory,
//! read by every poll request, and only ever replaced wholesale. A failed
//! exchange is fatal; there is no retry.

use reqwest::Client;

use crate::config::Life360Config;
use crate::error::BridgeError;

const TOKEN_ENDPOINT: &str = "oauth2/token.json";

/// Opaque bearer credential for the remote API.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Performs the token exchange against the remote service.
pub struct SessionManager {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    auth_token: String,
}

impl SessionManager {
    pub fn new(client: Client, config: &Life360Config) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    /// Exchange account credentials for a bearer token.
    ///
    /// Form-encoded POST with grant type "password", authorized via a Basic
    /// header built from the pre-issued authorization secret. The response
    /// must carry an `access_token` string.
    pub async fn authenticate(&self) -> Result<AccessToken, BridgeError> {
        let url = format!("{}{}", self.base_url, TOKEN_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", self.auth_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("phone", self.username.as_str()),
                ("password", self.password.as_str()),
                ("countryCode", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Auth(format!(
                "token exchange rejected with status {status}: {body}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let token = body
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::Auth("response lacked access_token".to_string()))?;

        tracing::debug!("Token exchange succeeded");
        Ok(AccessToken(token.to_string()))
    }
}
