//! Gateway webhook payloads and the append-only webhook audit log.
//!
//! The gateway delivers callbacks as `POST` requests with an `X-Signature`
//! header and a JSON body of the form
//! `{"event": "...", "payload": {"payment": {"entity": {...}}}}`.
//! Deliveries are at-least-once; duplicates are expected and harmless
//! because the audit log is never deduplicated and all downstream side
//! effects are idempotent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BillingError;

/// Gateway event names that confirm a completed payment.
const PAYMENT_CONFIRMATION_EVENTS: &[&str] = &["payment.captured", "payment.authorized"];

/// The payment entity embedded in a gateway callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntity {
    /// Gateway payment id.
    pub id: String,
    pub order_id: String,
    /// Gateway-side payment status string (e.g. `"captured"`).
    pub status: Option<String>,
    /// Amount in the smallest currency unit.
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// A parsed gateway webhook callback.
#[derive(Debug, Clone)]
pub struct GatewayWebhook {
    /// Gateway event name (e.g. `"payment.captured"`).
    pub event: String,
    /// The payment entity. Required for payment events; its absence makes
    /// the payload malformed.
    pub payment: PaymentEntity,
    /// The full raw payload, retained for the audit log.
    pub raw: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WirePayload {
    event: String,
    payload: Option<WireInner>,
}

#[derive(Debug, Deserialize)]
struct WireInner {
    payment: Option<WirePayment>,
}

#[derive(Debug, Deserialize)]
struct WirePayment {
    entity: Option<PaymentEntity>,
}

impl GatewayWebhook {
    /// Parses a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::MalformedWebhook` if the body is not valid
    /// JSON or the payment entity is missing.
    pub fn parse(body: &[u8]) -> Result<Self, BillingError> {
        let raw: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| BillingError::malformed(format!("invalid JSON: {}", e)))?;

        let wire: WirePayload = serde_json::from_value(raw.clone())
            .map_err(|e| BillingError::malformed(format!("unexpected shape: {}", e)))?;

        let payment = wire
            .payload
            .and_then(|p| p.payment)
            .and_then(|p| p.entity)
            .ok_or_else(|| BillingError::malformed("missing payment entity"))?;

        Ok(Self {
            event: wire.event,
            payment,
            raw,
        })
    }

    /// True if this event confirms a completed payment and should drive
    /// reconciliation.
    pub fn is_payment_confirmation(&self) -> bool {
        PAYMENT_CONFIRMATION_EVENTS.contains(&self.event.as_str())
    }
}

/// One row of the append-only webhook audit log.
///
/// Written once per received (and owned) callback, never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub order_id: String,
    pub payment_id: String,
    pub status: Option<String>,
    pub amount_minor_units: Option<i64>,
    pub currency: Option<String>,
    /// The application this service tagged the row with at ingestion time.
    pub application_tag: String,
    pub received_at: DateTime<Utc>,
    pub full_payload: serde_json::Value,
}

impl WebhookEvent {
    /// Builds an audit row from a parsed callback.
    pub fn from_gateway(
        hook: &GatewayWebhook,
        application_tag: &str,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event: hook.event.clone(),
            order_id: hook.payment.order_id.clone(),
            payment_id: hook.payment.id.clone(),
            status: hook.payment.status.clone(),
            amount_minor_units: hook.payment.amount,
            currency: hook.payment.currency.clone(),
            application_tag: application_tag.to_string(),
            received_at,
            full_payload: hook.raw.clone(),
        }
    }
}
