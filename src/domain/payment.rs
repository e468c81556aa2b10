//! Payment records: the de-duplicated, durable record of confirmed payments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::Order;

/// Which channel confirmed the payment first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentRecordStatus {
    /// Recorded by the client-side verify call.
    #[serde(rename = "verified")]
    Verified,
    /// Recorded by the gateway webhook.
    #[serde(rename = "webhook-confirmed")]
    WebhookConfirmed,
}

/// Durable record of one confirmed payment, keyed by the gateway payment id.
///
/// This is the idempotency anchor for the whole engine: at most one record
/// exists per `payment_id`, and both ingestion paths write it through an
/// atomic create-if-absent, never a blind overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Gateway-assigned payment id (primary key).
    pub payment_id: String,

    pub order_id: String,

    /// The verifying HMAC digest, stored for audit.
    pub signature: String,

    pub plan_id: String,
    pub tenant_email: String,
    pub tenant_user_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub application_tag: String,

    pub status: PaymentRecordStatus,
    pub verified_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Builds the record for a confirmed payment against its ledger order.
    pub fn from_order(
        order: &Order,
        payment_id: &str,
        signature: &str,
        status: PaymentRecordStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            payment_id: payment_id.to_string(),
            order_id: order.order_id.clone(),
            signature: signature.to_string(),
            plan_id: order.plan_id.clone(),
            tenant_email: order.tenant_email.clone(),
            tenant_user_id: order.tenant_user_id.clone(),
            amount_minor_units: order.amount_minor_units,
            currency: order.currency.clone(),
            application_tag: order.application_tag.clone(),
            status,
            verified_at: now,
        }
    }
}
