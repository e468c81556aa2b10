//! Wire types for the billing API. All client-facing JSON is camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::{Order, SubscriptionStatus, SubscriptionView};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Amount in major currency units.
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub plan_id: String,
    pub user_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub shop_id: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub success: bool,
    pub order_id: String,
    /// Amount in the smallest currency unit, as the gateway expects at
    /// checkout.
    pub amount: i64,
    pub currency: String,
    pub plan_id: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            success: true,
            order_id: order.order_id,
            amount: order.amount_minor_units,
            currency: order.currency,
            plan_id: order.plan_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    /// Accepted for interface compatibility but never trusted; the ledger
    /// order from checkout is authoritative.
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
    pub plan_id: String,
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub success: bool,
    pub subscription: SubscriptionDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub plan_id: String,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub start_date: String,
    pub end_date: Option<String>,
    pub days_remaining: Option<i64>,
    pub features: FeaturesDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesDto {
    pub max_menus: Option<u32>,
    pub max_orders_per_month: Option<u32>,
    pub max_tables: Option<u32>,
    pub qr_menus: bool,
    pub online_ordering: bool,
    pub table_booking: bool,
    pub ai_menu_extraction: bool,
    pub priority_support: bool,
}

impl From<SubscriptionView> for SubscriptionDto {
    fn from(view: SubscriptionView) -> Self {
        Self {
            plan_id: view.plan_id,
            plan_name: view.plan_name,
            status: view.status,
            start_date: view.start_date.to_rfc3339(),
            end_date: view.end_date.map(|d| d.to_rfc3339()),
            days_remaining: view.days_remaining,
            features: FeaturesDto {
                max_menus: view.features.max_menus,
                max_orders_per_month: view.features.max_orders_per_month,
                max_tables: view.features.max_tables,
                qr_menus: view.features.qr_menus,
                online_ordering: view.features.online_ordering,
                table_booking: view.features.table_booking,
                ai_menu_extraction: view.features.ai_menu_extraction,
                priority_support: view.features.priority_support,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_request_is_camel_case() {
        let json = r#"{
            "amount": 299.0,
            "planId": "pro",
            "userId": "U1",
            "email": "a@b.com",
            "shopId": "S1"
        }"#;

        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.plan_id, "pro");
        assert_eq!(request.user_id, "U1");
        assert_eq!(request.shop_id.as_deref(), Some("S1"));
        assert_eq!(request.currency, "INR");
    }

    #[test]
    fn verify_request_tolerates_missing_untrusted_fields() {
        let json = r#"{"orderId": "o1", "paymentId": "p1", "signature": "ab"}"#;

        let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();

        assert!(request.plan_id.is_none());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
    }
}
