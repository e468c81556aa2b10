//! Mock payment gateway for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::BillingError;
use crate::ports::{CreateGatewayOrder, GatewayOrder, GatewayOrderMeta, PaymentGateway};

#[derive(Default)]
struct MockState {
    sequence: u64,
    /// order id -> application tag from the order's notes.
    order_tags: HashMap<String, Option<String>>,
    calls: Vec<String>,
    fail_create: Option<String>,
    fail_fetch: Option<String>,
}

/// In-memory [`PaymentGateway`] that mints deterministic order ids and
/// records every call for assertions.
#[derive(Default)]
pub struct MockPaymentGateway {
    state: Mutex<MockState>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `create_order` calls fail with the given message.
    pub fn fail_create_with(&self, message: impl Into<String>) {
        self.state.lock().unwrap().fail_create = Some(message.into());
    }

    /// Makes subsequent `fetch_order` calls fail with the given message.
    pub fn fail_fetch_with(&self, message: impl Into<String>) {
        self.state.lock().unwrap().fail_fetch = Some(message.into());
    }

    /// Registers an order id with an application tag, as if it had been
    /// minted through another channel.
    pub fn set_order_tag(&self, order_id: impl Into<String>, tag: Option<String>) {
        self.state
            .lock()
            .unwrap()
            .order_tags
            .insert(order_id.into(), tag);
    }

    /// Number of orders minted through `create_order`.
    pub fn created_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state
            .calls
            .iter()
            .filter(|c| c.starts_with("create_order"))
            .count()
    }

    /// The recorded call log.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        request: CreateGatewayOrder,
    ) -> Result<GatewayOrder, BillingError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create_order:{}", request.receipt));

        if let Some(message) = &state.fail_create {
            return Err(BillingError::gateway(message.clone()));
        }

        state.sequence += 1;
        let order_id = format!("order_MOCK{}", state.sequence);
        state
            .order_tags
            .insert(order_id.clone(), Some(request.notes.application_tag.clone()));

        debug!(order_id, "mock gateway minted order");

        Ok(GatewayOrder {
            id: order_id,
            amount_minor_units: request.amount_minor_units,
            currency: request.currency,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderMeta, BillingError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("fetch_order:{}", order_id));

        if let Some(message) = &state.fail_fetch {
            return Err(BillingError::gateway(message.clone()));
        }

        match state.order_tags.get(order_id) {
            Some(tag) => Ok(GatewayOrderMeta {
                id: order_id.to_string(),
                application_tag: tag.clone(),
            }),
            None => Err(BillingError::gateway(format!(
                "mock gateway has no order {}",
                order_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayOrderNotes;

    fn request(receipt: &str) -> CreateGatewayOrder {
        CreateGatewayOrder {
            amount_minor_units: 29900,
            currency: "INR".to_string(),
            receipt: receipt.to_string(),
            notes: GatewayOrderNotes {
                application_tag: "menulink".to_string(),
                plan_id: "pro".to_string(),
                tenant_user_id: "U1".to_string(),
                tenant_email: "a@b.com".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn mints_sequential_order_ids() {
        let gateway = MockPaymentGateway::new();

        let first = gateway.create_order(request("r1")).await.unwrap();
        let second = gateway.create_order(request("r2")).await.unwrap();

        assert_eq!(first.id, "order_MOCK1");
        assert_eq!(second.id, "order_MOCK2");
        assert_eq!(gateway.created_count(), 2);
    }

    #[tokio::test]
    async fn fetch_returns_tag_from_creation_notes() {
        let gateway = MockPaymentGateway::new();
        let order = gateway.create_order(request("r1")).await.unwrap();

        let meta = gateway.fetch_order(&order.id).await.unwrap();

        assert_eq!(meta.application_tag.as_deref(), Some("menulink"));
    }

    #[tokio::test]
    async fn injected_create_failure_surfaces() {
        let gateway = MockPaymentGateway::new();
        gateway.fail_create_with("gateway down");

        let result = gateway.create_order(request("r1")).await;

        assert!(matches!(result, Err(BillingError::GatewayUnavailable(_))));
    }

    #[tokio::test]
    async fn fetch_of_unknown_order_fails() {
        let gateway = MockPaymentGateway::new();

        let result = gateway.fetch_order("order_unknown").await;

        assert!(matches!(result, Err(BillingError::GatewayUnavailable(_))));
    }
}
