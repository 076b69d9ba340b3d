//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Pre-shared server key used for notification signatures and API auth
    pub server_key: String,

    /// Base URL for the gateway API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Status-query timeout in seconds
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

impl GatewayConfig {
    /// Check if pointing at the gateway sandbox
    pub fn is_sandbox(&self) -> bool {
        self.base_url.contains("sandbox")
    }

    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.server_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_SERVER_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server_key: String::new(),
            base_url: default_base_url(),
            status_timeout_secs: default_status_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.sandbox.midtrans.com".to_string()
}

fn default_status_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_server_key_is_rejected() {
        let config = GatewayConfig::default();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn sandbox_default_is_detected() {
        let config = GatewayConfig::default();
        assert!(config.is_sandbox());
    }

    #[test]
    fn http_url_is_rejected_in_production() {
        let config = GatewayConfig {
            server_key: "SB-Mid-server-xxx".to_string(),
            base_url: "http://gateway.internal".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::GatewayMustBeHttps)
        ));
    }

    #[test]
    fn garbage_url_is_rejected() {
        let config = GatewayConfig {
            server_key: "SB-Mid-server-xxx".to_string(),
            base_url: "gateway.internal".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidGatewayUrl)
        ));
    }
}
