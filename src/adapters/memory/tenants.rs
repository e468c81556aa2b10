//! In-memory tenant store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{BillingError, Subscription, TenantAccount};
use crate::ports::TenantStore;

/// `Mutex<HashMap>` implementation of [`TenantStore`], keyed by user id.
#[derive(Default)]
pub struct InMemoryTenantStore {
    tenants: Mutex<HashMap<String, TenantAccount>>,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: number of tenant accounts.
    pub fn count(&self) -> usize {
        self.tenants.lock().unwrap().len()
    }

    /// Test helper: snapshot of one account.
    pub fn get(&self, user_id: &str) -> Option<TenantAccount> {
        self.tenants.lock().unwrap().get(user_id).cloned()
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<TenantAccount>, BillingError> {
        let tenants = self.tenants.lock().unwrap();
        Ok(tenants.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TenantAccount>, BillingError> {
        let tenants = self.tenants.lock().unwrap();
        Ok(tenants.values().find(|t| t.email == email).cloned())
    }

    async fn create(&self, account: TenantAccount) -> Result<(), BillingError> {
        let mut tenants = self.tenants.lock().unwrap();
        tenants.insert(account.tenant_user_id.clone(), account);
        Ok(())
    }

    async fn merge_subscription(
        &self,
        user_id: &str,
        subscription: Subscription,
    ) -> Result<(), BillingError> {
        let mut tenants = self.tenants.lock().unwrap();
        let tenant = tenants.get_mut(user_id).ok_or_else(|| {
            BillingError::storage(format!("tenant {} missing during subscription merge", user_id))
        })?;
        tenant.subscription = Some(subscription);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, Plan, PlanTier};
    use chrono::Utc;

    #[tokio::test]
    async fn find_by_user_id_then_email() {
        let store = InMemoryTenantStore::new();
        store
            .create(TenantAccount::minimal("U1", "a@b.com", Utc::now()))
            .await
            .unwrap();

        assert!(store.find_by_user_id("U1").await.unwrap().is_some());
        assert!(store.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(store.find_by_user_id("U2").await.unwrap().is_none());
        assert!(store.find_by_email("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn merge_subscription_preserves_account_fields() {
        let store = InMemoryTenantStore::new();
        let mut account = TenantAccount::minimal("U1", "a@b.com", Utc::now());
        account.phone = Some("12345".to_string());
        store.create(account).await.unwrap();

        let plan = Plan {
            tier: PlanTier::Pro,
            cycle: BillingCycle::Monthly,
        };
        let sub = Subscription::activate(&plan, "pro", Utc::now());
        store.merge_subscription("U1", sub.clone()).await.unwrap();

        let stored = store.get("U1").unwrap();
        assert_eq!(stored.phone.as_deref(), Some("12345"));
        assert_eq!(stored.subscription, Some(sub));
    }

    #[tokio::test]
    async fn merge_subscription_on_missing_tenant_errors() {
        let store = InMemoryTenantStore::new();
        let plan = Plan {
            tier: PlanTier::Pro,
            cycle: BillingCycle::Monthly,
        };
        let sub = Subscription::activate(&plan, "pro", Utc::now());

        let result = store.merge_subscription("U_missing", sub).await;

        assert!(matches!(result, Err(BillingError::Storage(_))));
    }
}
