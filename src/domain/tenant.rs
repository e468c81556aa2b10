//! Tenant accounts that own subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

/// A tenant account, resolved by user id first and email second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantAccount {
    pub tenant_user_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub subscription: Option<Subscription>,
    pub created_at: DateTime<Utc>,
}

impl TenantAccount {
    /// Creates a minimal account for a paying tenant with no prior record.
    ///
    /// A payment must never be lost because the account is missing, so the
    /// reconciler provisions this skeleton before attaching the subscription.
    pub fn minimal(
        tenant_user_id: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            tenant_user_id: tenant_user_id.into(),
            email: email.into(),
            phone: None,
            subscription: None,
            created_at: now,
        }
    }
}
