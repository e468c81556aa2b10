//! Subscription activation and read-side projection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{BillingError, Order, Plan, Subscription, SubscriptionView, TenantAccount};
use crate::ports::TenantStore;

/// Activates subscriptions for confirmed payments and serves the derived
/// read view.
pub struct SubscriptionManager {
    tenants: Arc<dyn TenantStore>,
}

impl SubscriptionManager {
    pub fn new(tenants: Arc<dyn TenantStore>) -> Self {
        Self { tenants }
    }

    /// Grants the order's plan to the paying tenant.
    ///
    /// Resolution order: user id from checkout, then email, then a minimal
    /// account is provisioned. A confirmed payment must always land
    /// somewhere.
    ///
    /// The subscription is overwritten wholesale, so replaying the same
    /// confirmation converges on the same state.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidPlan` if the order carries an unknown
    /// plan id, or `BillingError::Storage` on persistence failures.
    pub async fn reconcile(&self, order: &Order, now: DateTime<Utc>) -> Result<(), BillingError> {
        let plan = Plan::parse(&order.plan_id)?;

        let tenant = self.resolve_tenant(order, now).await?;
        let subscription = Subscription::activate(&plan, &order.plan_id, now);

        self.tenants
            .merge_subscription(&tenant.tenant_user_id, subscription)
            .await?;

        info!(
            tenant_user_id = %tenant.tenant_user_id,
            plan_id = %order.plan_id,
            order_id = %order.order_id,
            "subscription activated"
        );

        Ok(())
    }

    /// Current subscription view for a tenant, with expiry derived at read
    /// time. `Ok(None)` when the tenant or its subscription is absent.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` on read failures.
    pub async fn current_view(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SubscriptionView>, BillingError> {
        let tenant = self.tenants.find_by_user_id(user_id).await?;

        Ok(tenant
            .and_then(|t| t.subscription)
            .map(|sub| SubscriptionView::derive(&sub, now)))
    }

    async fn resolve_tenant(
        &self,
        order: &Order,
        now: DateTime<Utc>,
    ) -> Result<TenantAccount, BillingError> {
        if let Some(tenant) = self.tenants.find_by_user_id(&order.tenant_user_id).await? {
            return Ok(tenant);
        }

        if let Some(tenant) = self.tenants.find_by_email(&order.tenant_email).await? {
            return Ok(tenant);
        }

        info!(
            tenant_user_id = %order.tenant_user_id,
            "provisioning minimal tenant account for paying customer"
        );

        let account = TenantAccount::minimal(&order.tenant_user_id, &order.tenant_email, now);
        self.tenants.create(account.clone()).await?;
        Ok(account)
    }
}
