//! Order ledger entries: payment intents created before the user pays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Transitions only `Created` → `Paid`, never the reverse. Cancelled and
/// failed states are intentionally unmodeled (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order minted at the gateway, payment not yet confirmed.
    Created,
    /// Payment confirmed via verify call and/or webhook.
    Paid,
}

/// Checkout details supplied by the client when initiating payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub plan_id: String,
    pub tenant_user_id: String,
    pub tenant_email: String,
    pub phone: Option<String>,
    pub shop_id: Option<String>,
}

/// A payment intent, keyed by the gateway-assigned order id.
///
/// Exactly one Order exists per `order_id`; only `status`, `payment_id` and
/// `updated_at` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Gateway-assigned order id (primary key).
    pub order_id: String,

    /// Amount in the smallest currency unit. Never floating point.
    pub amount_minor_units: i64,

    pub currency: String,
    pub plan_id: String,
    pub tenant_user_id: String,
    pub tenant_email: String,
    pub phone: Option<String>,
    pub shop_id: Option<String>,

    /// Product line that owns this order; the gateway account is shared
    /// across products.
    pub application_tag: String,

    pub status: OrderStatus,

    /// Gateway payment id, set once the order is paid.
    pub payment_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new ledger entry for a gateway-minted order.
    pub fn create(
        order_id: impl Into<String>,
        amount_minor_units: i64,
        currency: impl Into<String>,
        application_tag: impl Into<String>,
        details: CheckoutDetails,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount_minor_units,
            currency: currency.into(),
            plan_id: details.plan_id,
            tenant_user_id: details.tenant_user_id,
            tenant_email: details.tenant_email,
            phone: details.phone,
            shop_id: details.shop_id,
            application_tag: application_tag.into(),
            status: OrderStatus::Created,
            payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the order paid. Idempotent: re-applying to an already-paid
    /// order is a no-op, never an error, and never reverses the status.
    pub fn mark_paid(&mut self, payment_id: &str, now: DateTime<Utc>) {
        if self.status == OrderStatus::Paid {
            return;
        }
        self.status = OrderStatus::Paid;
        self.payment_id = Some(payment_id.to_string());
        self.updated_at = now;
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            plan_id: "pro".to_string(),
            tenant_user_id: "U1".to_string(),
            tenant_email: "a@b.com".to_string(),
            phone: None,
            shop_id: None,
        }
    }

    #[test]
    fn new_order_starts_created() {
        let order = Order::create("order_1", 29900, "INR", "menulink", details(), Utc::now());

        assert_eq!(order.status, OrderStatus::Created);
        assert!(order.payment_id.is_none());
        assert_eq!(order.amount_minor_units, 29900);
    }

    #[test]
    fn mark_paid_transitions_and_records_payment_id() {
        let mut order = Order::create("order_1", 29900, "INR", "menulink", details(), Utc::now());

        order.mark_paid("pay_1", Utc::now());

        assert!(order.is_paid());
        assert_eq!(order.payment_id.as_deref(), Some("pay_1"));
    }

    #[test]
    fn mark_paid_twice_is_a_noop() {
        let mut order = Order::create("order_1", 29900, "INR", "menulink", details(), Utc::now());

        order.mark_paid("pay_1", Utc::now());
        let first_update = order.updated_at;
        order.mark_paid("pay_other", Utc::now());

        // Still paid, first payment id and timestamp retained.
        assert!(order.is_paid());
        assert_eq!(order.payment_id.as_deref(), Some("pay_1"));
        assert_eq!(order.updated_at, first_update);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Created).unwrap(),
            "\"created\""
        );
        assert_eq!(serde_json::to_string(&OrderStatus::Paid).unwrap(), "\"paid\"");
    }
}
