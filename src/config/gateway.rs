//! Payment gateway configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Credentials and settings for the payment gateway.
///
/// `key_secret` signs the checkout confirmation path; `webhook_secret`
/// signs webhook deliveries. They are distinct secrets and neither is ever
/// logged or serialized back out.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API key id, sent as the basic auth username.
    pub key_id: String,

    /// API key secret. Also the HMAC key for checkout signatures.
    pub key_secret: SecretString,

    /// HMAC key for webhook signatures.
    pub webhook_secret: SecretString,

    /// Tag written into order notes to mark ownership on the shared
    /// gateway account.
    pub application_tag: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.gateway.example.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.trim().is_empty() {
            return Err(ValidationError::new("gateway.key_id", "must not be empty"));
        }
        if self.key_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::new(
                "gateway.key_secret",
                "must not be empty",
            ));
        }
        if self.webhook_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::new(
                "gateway.webhook_secret",
                "must not be empty",
            ));
        }
        if self.application_tag.trim().is_empty() {
            return Err(ValidationError::new(
                "gateway.application_tag",
                "must not be empty",
            ));
        }
        if !self.api_base_url.starts_with("http") {
            return Err(ValidationError::new(
                "gateway.api_base_url",
                "must be an http(s) URL",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::new(
                "gateway.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
