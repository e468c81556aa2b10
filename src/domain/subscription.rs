//! Tenant subscription state and the lazily-derived read view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::{Plan, PlanFeatures};

/// Stored subscription status.
///
/// Expiry is never written back by a background job; the effective status is
/// derived at read time by [`SubscriptionView::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
}

/// The subscription attached to a tenant account.
///
/// Activation overwrites this struct wholesale, so replaying a confirmation
/// for the same payment converges on the same state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan_id: String,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    /// `None` for non-expiring plans (the free tier).
    pub end_date: Option<DateTime<Utc>>,
    pub features: PlanFeatures,
    pub last_updated: DateTime<Utc>,
}

impl Subscription {
    /// Activates a plan starting at `now`.
    ///
    /// The expiry window is computed in calendar months from the start date,
    /// so a monthly plan bought on Jan 31 expires on Feb 28/29.
    pub fn activate(plan: &Plan, plan_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            plan_name: plan.display_name(),
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: plan.expiry_from(now),
            features: plan.features(),
            last_updated: now,
        }
    }

    /// True if the stored end date has passed as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            Some(end) => now > end,
            None => false,
        }
    }
}

/// Read-time projection of a subscription.
///
/// Derives the effective status and remaining days without mutating the
/// stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionView {
    pub plan_id: String,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Whole days until expiry. `Some(0)` once expired, `None` when the plan
    /// never expires.
    pub days_remaining: Option<i64>,
    pub features: PlanFeatures,
}

impl SubscriptionView {
    pub fn derive(subscription: &Subscription, now: DateTime<Utc>) -> Self {
        let expired = subscription.is_expired_at(now);

        let status = if expired {
            SubscriptionStatus::Expired
        } else {
            subscription.status
        };

        let days_remaining = subscription.end_date.map(|end| {
            if expired {
                0
            } else {
                (end - now).num_days().max(0)
            }
        });

        Self {
            plan_id: subscription.plan_id.clone(),
            plan_name: subscription.plan_name.clone(),
            status,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            days_remaining,
            features: subscription.features.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::{BillingCycle, PlanTier};
    use chrono::Duration;

    fn pro_monthly() -> Plan {
        Plan {
            tier: PlanTier::Pro,
            cycle: BillingCycle::Monthly,
        }
    }

    #[test]
    fn activation_sets_plan_window() {
        let now = Utc::now();
        let sub = Subscription::activate(&pro_monthly(), "pro", now);

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.start_date, now);
        assert!(sub.end_date.is_some());
        assert_eq!(sub.plan_id, "pro");
    }

    #[test]
    fn free_plan_never_expires() {
        let free = Plan {
            tier: PlanTier::Free,
            cycle: BillingCycle::Monthly,
        };
        let sub = Subscription::activate(&free, "free", Utc::now());

        assert!(sub.end_date.is_none());
        assert!(!sub.is_expired_at(Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn view_reports_active_with_days_remaining() {
        let now = Utc::now();
        let sub = Subscription::activate(&pro_monthly(), "pro", now);

        let view = SubscriptionView::derive(&sub, now);

        assert_eq!(view.status, SubscriptionStatus::Active);
        let days = view.days_remaining.unwrap();
        assert!((27..=31).contains(&days), "unexpected days: {}", days);
    }

    #[test]
    fn view_flips_to_expired_after_end_date() {
        let start = Utc::now() - Duration::days(60);
        let sub = Subscription::activate(&pro_monthly(), "pro", start);

        let view = SubscriptionView::derive(&sub, Utc::now());

        assert_eq!(view.status, SubscriptionStatus::Expired);
        assert_eq!(view.days_remaining, Some(0));
        // The stored record is untouched.
        assert_eq!(sub.status, SubscriptionStatus::Active);
    }

    #[test]
    fn view_of_non_expiring_plan_has_no_days_remaining() {
        let free = Plan {
            tier: PlanTier::Free,
            cycle: BillingCycle::Monthly,
        };
        let sub = Subscription::activate(&free, "free", Utc::now());

        let view = SubscriptionView::derive(&sub, Utc::now());

        assert_eq!(view.status, SubscriptionStatus::Active);
        assert_eq!(view.days_remaining, None);
    }
}
