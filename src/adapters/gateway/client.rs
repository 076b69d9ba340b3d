//! HTTP client for the payment gateway's transaction API.
//!
//! Authenticates with HTTP Basic using the merchant server key as username
//! and an empty password. The status endpoint is the authoritative source of
//! truth for a transaction; webhook payloads are only ever treated as a
//! prompt to call it.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::gateway::GatewayStatus;
use crate::ports::{GatewayError, ManageAction, PaymentGatewayClient};

/// Gateway API configuration.
#[derive(Clone)]
pub struct HttpGatewayConfig {
    /// Merchant server key, used for Basic auth.
    server_key: SecretString,

    /// Base URL for the gateway API.
    base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl HttpGatewayConfig {
    pub fn new(server_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            server_key: SecretString::new(server_key.into()),
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reqwest-backed implementation of PaymentGatewayClient.
#[derive(Clone)]
pub struct HttpGatewayClient {
    config: HttpGatewayConfig,
    http_client: reqwest::Client,
}

impl HttpGatewayClient {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn decode_status(
        &self,
        order_ref: &str,
        response: reqwest::Response,
    ) -> Result<GatewayStatus, GatewayError> {
        let code = response.status();
        if code == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::TransactionNotFound(order_ref.to_string()));
        }
        if !code.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus {
                code: code.as_u16(),
                body,
            });
        }

        response
            .json::<GatewayStatus>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PaymentGatewayClient for HttpGatewayClient {
    async fn fetch_status(&self, order_ref: &str) -> Result<GatewayStatus, GatewayError> {
        let url = format!("{}/v2/{}/status", self.config.base_url, order_ref);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.server_key.expose_secret(), Some(""))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        self.decode_status(order_ref, response).await
    }

    async fn manage(
        &self,
        order_ref: &str,
        action: ManageAction,
    ) -> Result<GatewayStatus, GatewayError> {
        let url = format!(
            "{}/v2/{}/{}",
            self.config.base_url,
            order_ref,
            action.as_path()
        );

        tracing::info!(
            order_ref = %order_ref,
            action = action.as_path(),
            "Executing gateway transaction action"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.server_key.expose_secret(), Some(""))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        self.decode_status(order_ref, response).await
    }
}
