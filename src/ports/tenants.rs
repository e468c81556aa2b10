//! Port for tenant account storage.

use async_trait::async_trait;

use crate::domain::{BillingError, Subscription, TenantAccount};

/// Persistence for tenant accounts and their subscriptions.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Looks up a tenant by user id.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the read fails.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<TenantAccount>, BillingError>;

    /// Looks up a tenant by email, used as the fallback when the user id
    /// from checkout does not resolve.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the read fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<TenantAccount>, BillingError>;

    /// Creates a tenant account.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the write fails.
    async fn create(&self, account: TenantAccount) -> Result<(), BillingError>;

    /// Replaces the subscription on an existing tenant, leaving every other
    /// account field untouched.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the tenant is missing or the write
    /// fails.
    async fn merge_subscription(
        &self,
        user_id: &str,
        subscription: Subscription,
    ) -> Result<(), BillingError>;
}
