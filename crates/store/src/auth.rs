//! Client for the identity provider's token API.
//!
//! Wraps the hosted backend's GoTrue-style auth endpoints (token refresh,
//! login-code exchange, sign-out) using [`reqwest`]. Every request carries
//! the public API key; token-bearing calls add a bearer header on top.

use serde::Deserialize;

use crate::error::StoreError;

/// HTTP client for the auth endpoints of one hosted backend.
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Token pair returned by the token endpoint on refresh or code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl AuthClient {
    /// Create an auth client reusing an existing [`reqwest::Client`]
    /// (the web layer shares one connection pool across both store clients).
    ///
    /// * `base_url` - Backend base URL, e.g. `https://acme.backend.example`.
    /// * `anon_key` - The public API key sent with every request.
    pub fn new(client: reqwest::Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url,
            anon_key,
        }
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// Sends `POST /auth/v1/token?grant_type=refresh_token`. The provider
    /// rotates the refresh token; callers must persist the returned pair.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, StoreError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_request("refresh_token", &body).await
    }

    /// Exchange a one-time login code for a session.
    ///
    /// Sends `POST /auth/v1/token?grant_type=pkce`. Used by the auth
    /// callback after the provider redirects the browser back to us.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, StoreError> {
        let body = serde_json::json!({ "auth_code": code });
        self.token_request("pkce", &body).await
    }

    /// Revoke the session behind an access token.
    ///
    /// Sends `POST /auth/v1/logout`. Callers treat failure as best-effort:
    /// clearing the session cookies logs the browser out locally either way.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Probe the auth service's liveness endpoint.
    pub async fn health(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/health", self.base_url))
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    async fn token_request(
        &self,
        grant_type: &str,
        body: &serde_json::Value,
    ) -> Result<TokenPair, StoreError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, returning the status
    /// and body text as a [`StoreError::Api`] otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
