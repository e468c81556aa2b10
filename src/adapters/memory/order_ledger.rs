//! In-memory order ledger.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BillingError, Order};
use crate::ports::OrderLedger;

/// `Mutex<HashMap>` implementation of [`OrderLedger`].
#[derive(Default)]
pub struct InMemoryOrderLedger {
    orders: Mutex<HashMap<String, Order>>,
}

impl InMemoryOrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: number of stored orders.
    pub fn count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// Test helper: snapshot of one order.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(order_id).cloned()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn create(&self, order: Order) -> Result<(), BillingError> {
        let mut orders = self.orders.lock().unwrap();
        orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    async fn find(&self, order_id: &str) -> Result<Option<Order>, BillingError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders.get(order_id).cloned())
    }

    async fn mark_paid(
        &self,
        order_id: &str,
        payment_id: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| BillingError::OrderNotFound(order_id.to_string()))?;
        order.mark_paid(payment_id, paid_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckoutDetails, OrderStatus};

    fn sample_order(order_id: &str) -> Order {
        Order::create(
            order_id,
            29900,
            "INR",
            "menulink",
            CheckoutDetails {
                plan_id: "pro".to_string(),
                tenant_user_id: "U1".to_string(),
                tenant_email: "a@b.com".to_string(),
                phone: None,
                shop_id: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn create_then_find() {
        let ledger = InMemoryOrderLedger::new();
        ledger.create(sample_order("order_1")).await.unwrap();

        let found = ledger.find("order_1").await.unwrap().unwrap();
        assert_eq!(found.status, OrderStatus::Created);
    }

    #[tokio::test]
    async fn find_absent_returns_none() {
        let ledger = InMemoryOrderLedger::new();
        assert!(ledger.find("order_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mark_paid_merges_into_existing_order() {
        let ledger = InMemoryOrderLedger::new();
        ledger.create(sample_order("order_1")).await.unwrap();

        ledger.mark_paid("order_1", "pay_1", Utc::now()).await.unwrap();

        let order = ledger.get("order_1").unwrap();
        assert!(order.is_paid());
        assert_eq!(order.payment_id.as_deref(), Some("pay_1"));
        // Creation fields are preserved.
        assert_eq!(order.amount_minor_units, 29900);
        assert_eq!(order.plan_id, "pro");
    }

    #[tokio::test]
    async fn mark_paid_on_missing_order_errors() {
        let ledger = InMemoryOrderLedger::new();

        let result = ledger.mark_paid("order_missing", "pay_1", Utc::now()).await;

        assert!(matches!(result, Err(BillingError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn mark_paid_twice_keeps_first_payment_id() {
        let ledger = InMemoryOrderLedger::new();
        ledger.create(sample_order("order_1")).await.unwrap();

        ledger.mark_paid("order_1", "pay_1", Utc::now()).await.unwrap();
        ledger.mark_paid("order_1", "pay_2", Utc::now()).await.unwrap();

        let order = ledger.get("order_1").unwrap();
        assert_eq!(order.payment_id.as_deref(), Some("pay_1"));
    }
}
