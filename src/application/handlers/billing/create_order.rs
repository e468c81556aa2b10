//! Checkout order creation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{BillingError, CheckoutDetails, Order, Plan};
use crate::ports::{CreateGatewayOrder, GatewayOrderNotes, OrderLedger, PaymentGateway};

/// Upper bound on a checkout amount in major units. Far above any plan
/// price, and keeps the minor-unit conversion well inside `i64`.
const MAX_AMOUNT: f64 = 10_000_000.0;

/// Request to start a checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutOrderCommand {
    /// Amount in major currency units, as sent by the client.
    pub amount: f64,
    pub currency: String,
    pub details: CheckoutDetails,
}

/// Mints an order at the gateway and mirrors it into the local ledger.
pub struct CreateCheckoutOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
    ledger: Arc<dyn OrderLedger>,
    application_tag: String,
}

impl CreateCheckoutOrderHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        ledger: Arc<dyn OrderLedger>,
        application_tag: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            ledger,
            application_tag: application_tag.into(),
        }
    }

    /// Creates the gateway order first, then the ledger entry, so an order
    /// id never exists locally without existing at the gateway.
    ///
    /// The client-facing amount is converted to minor units here; nothing
    /// downstream ever sees floating point.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidPlan` for an unknown plan id,
    /// `BillingError::Validation` for a bad amount or missing tenant
    /// fields, `BillingError::GatewayUnavailable` if minting fails, or
    /// `BillingError::Storage` if the ledger write fails.
    pub async fn handle(
        &self,
        command: CreateCheckoutOrderCommand,
    ) -> Result<Order, BillingError> {
        Plan::parse(&command.details.plan_id)?;

        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(BillingError::validation("amount must be positive"));
        }
        if command.amount > MAX_AMOUNT {
            return Err(BillingError::validation("amount exceeds the maximum"));
        }
        if command.currency.trim().is_empty() {
            return Err(BillingError::validation("currency is required"));
        }
        if command.details.tenant_user_id.trim().is_empty() {
            return Err(BillingError::validation("tenant user id is required"));
        }
        if command.details.tenant_email.trim().is_empty() {
            return Err(BillingError::validation("tenant email is required"));
        }

        let amount_minor_units = (command.amount * 100.0).round() as i64;
        let receipt = format!("rcpt_{}", Uuid::new_v4().simple());

        let gateway_order = self
            .gateway
            .create_order(CreateGatewayOrder {
                amount_minor_units,
                currency: command.currency.clone(),
                receipt,
                notes: GatewayOrderNotes {
                    application_tag: self.application_tag.clone(),
                    plan_id: command.details.plan_id.clone(),
                    tenant_user_id: command.details.tenant_user_id.clone(),
                    tenant_email: command.details.tenant_email.clone(),
                },
            })
            .await?;

        let order = Order::create(
            gateway_order.id,
            amount_minor_units,
            command.currency,
            self.application_tag.clone(),
            command.details,
            Utc::now(),
        );
        self.ledger.create(order.clone()).await?;

        info!(
            order_id = %order.order_id,
            plan_id = %order.plan_id,
            amount_minor_units,
            "checkout order created"
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::MockPaymentGateway;
    use crate::adapters::memory::InMemoryOrderLedger;
    use crate::domain::OrderStatus;

    fn handler() -> (
        Arc<MockPaymentGateway>,
        Arc<InMemoryOrderLedger>,
        CreateCheckoutOrderHandler,
    ) {
        let gateway = Arc::new(MockPaymentGateway::new());
        let ledger = Arc::new(InMemoryOrderLedger::new());
        let handler =
            CreateCheckoutOrderHandler::new(gateway.clone(), ledger.clone(), "menulink");
        (gateway, ledger, handler)
    }

    fn command(amount: f64, plan_id: &str) -> CreateCheckoutOrderCommand {
        CreateCheckoutOrderCommand {
            amount,
            currency: "INR".to_string(),
            details: CheckoutDetails {
                plan_id: plan_id.to_string(),
                tenant_user_id: "U1".to_string(),
                tenant_email: "a@b.com".to_string(),
                phone: None,
                shop_id: None,
            },
        }
    }

    #[tokio::test]
    async fn converts_major_units_and_mirrors_to_ledger() {
        let (_, ledger, handler) = handler();

        let order = handler.handle(command(299.0, "pro")).await.unwrap();

        assert_eq!(order.amount_minor_units, 29900);
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.application_tag, "menulink");

        let stored = ledger.get(&order.order_id).unwrap();
        assert_eq!(stored, order);
    }

    #[tokio::test]
    async fn fractional_amounts_round_to_nearest_minor_unit() {
        let (_, _, handler) = handler();

        let order = handler.handle(command(299.995, "pro")).await.unwrap();

        assert_eq!(order.amount_minor_units, 30000);
    }

    #[tokio::test]
    async fn rejects_unknown_plan_before_touching_gateway() {
        let (gateway, ledger, handler) = handler();

        let result = handler.handle(command(299.0, "platinum")).await;

        assert!(matches!(result, Err(BillingError::InvalidPlan(_))));
        assert_eq!(gateway.created_count(), 0);
        assert_eq!(ledger.count(), 0);
    }

    #[tokio::test]
    async fn rejects_non_positive_amounts() {
        let (_, _, handler) = handler();

        assert!(matches!(
            handler.handle(command(0.0, "pro")).await,
            Err(BillingError::Validation(_))
        ));
        assert!(matches!(
            handler.handle(command(-10.0, "pro")).await,
            Err(BillingError::Validation(_))
        ));
        assert!(matches!(
            handler.handle(command(f64::NAN, "pro")).await,
            Err(BillingError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn rejects_amounts_above_the_maximum() {
        let (gateway, ledger, handler) = handler();

        let result = handler.handle(command(1e17, "pro")).await;

        assert!(matches!(result, Err(BillingError::Validation(_))));
        assert_eq!(gateway.created_count(), 0);
        assert_eq!(ledger.count(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_leaves_no_ledger_entry() {
        let (gateway, ledger, handler) = handler();
        gateway.fail_create_with("gateway down");

        let result = handler.handle(command(299.0, "pro")).await;

        assert!(matches!(result, Err(BillingError::GatewayUnavailable(_))));
        assert_eq!(ledger.count(), 0);
    }
}
