//! HTTP client for the payment gateway's order API.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::GatewayConfig;
use crate::domain::BillingError;
use crate::ports::{CreateGatewayOrder, GatewayOrder, GatewayOrderMeta, PaymentGateway};

/// Talks to the gateway's REST API with basic auth over the API key pair.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
}

#[derive(Serialize)]
struct WireCreateOrder<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: WireNotes<'a>,
}

#[derive(Serialize)]
struct WireNotes<'a> {
    #[serde(rename = "application")]
    application_tag: &'a str,
    #[serde(rename = "planId")]
    plan_id: &'a str,
    #[serde(rename = "userId")]
    tenant_user_id: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct WireOrder {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct WireOrderMeta {
    id: String,
    #[serde(default)]
    notes: WireMetaNotes,
}

#[derive(Deserialize, Default)]
struct WireMetaNotes {
    #[serde(rename = "application")]
    application_tag: Option<String>,
}

impl HttpPaymentGateway {
    /// Builds the client from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::GatewayUnavailable` if the HTTP client cannot
    /// be constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self, BillingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BillingError::gateway(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(
        &self,
        request: CreateGatewayOrder,
    ) -> Result<GatewayOrder, BillingError> {
        let url = format!("{}/v1/orders", self.base_url);
        let body = WireCreateOrder {
            amount: request.amount_minor_units,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: WireNotes {
                application_tag: &request.notes.application_tag,
                plan_id: &request.notes.plan_id,
                tenant_user_id: &request.notes.tenant_user_id,
                email: &request.notes.tenant_email,
            },
        };

        debug!(receipt = %request.receipt, "creating gateway order");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "gateway order creation request failed");
                BillingError::gateway(format!("order creation request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "gateway rejected order creation");
            return Err(BillingError::gateway(format!(
                "gateway returned {} for order creation",
                status
            )));
        }

        let wire: WireOrder = response.json().await.map_err(|e| {
            BillingError::gateway(format!("unparseable order creation response: {}", e))
        })?;

        Ok(GatewayOrder {
            id: wire.id,
            amount_minor_units: wire.amount,
            currency: wire.currency,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderMeta, BillingError> {
        let url = format!("{}/v1/orders/{}", self.base_url, order_id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "gateway order fetch failed");
                BillingError::gateway(format!("order fetch request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, order_id, "gateway rejected order fetch");
            return Err(BillingError::gateway(format!(
                "gateway returned {} for order fetch",
                status
            )));
        }

        let wire: WireOrderMeta = response.json().await.map_err(|e| {
            BillingError::gateway(format!("unparseable order fetch response: {}", e))
        })?;

        Ok(GatewayOrderMeta {
            id: wire.id,
            application_tag: wire.notes.application_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_wire_shape() {
        let body = WireCreateOrder {
            amount: 29900,
            currency: "INR",
            receipt: "rcpt_1",
            notes: WireNotes {
                application_tag: "menulink",
                plan_id: "pro",
                tenant_user_id: "U1",
                email: "a@b.com",
            },
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["amount"], 29900);
        assert_eq!(json["notes"]["application"], "menulink");
        assert_eq!(json["notes"]["planId"], "pro");
        assert_eq!(json["notes"]["userId"], "U1");
    }

    #[test]
    fn order_meta_tolerates_missing_notes() {
        let wire: WireOrderMeta = serde_json::from_str(r#"{"id": "order_1"}"#).unwrap();

        assert_eq!(wire.id, "order_1");
        assert!(wire.notes.application_tag.is_none());
    }
}
