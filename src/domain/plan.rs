//! Plan catalog: tiers, billing cycles, and per-tier feature limits.
//!
//! Plan ids are lookup keys into a static, explicit plan table rather than
//! ad hoc strings: `"pro"` (monthly by default) or `"pro_yearly"`,
//! `"basic_quarterly"` and so on. The `free` tier is the distinguished
//! non-expiring tier.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BillingError;

/// Subscription plan tier.
///
/// Determines the feature set and capability limits for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Evaluation tier, never expires.
    Free,
    /// Entry-level paid tier.
    Starter,
    /// Standard paid tier.
    Basic,
    /// Full-featured tier.
    #[serde(alias = "professional")]
    Pro,
    /// Unlimited tier.
    Enterprise,
}

impl PlanTier {
    /// Parses a tier name. `"professional"` is accepted as an alias for
    /// `"pro"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "free" => Some(PlanTier::Free),
            "starter" => Some(PlanTier::Starter),
            "basic" => Some(PlanTier::Basic),
            "pro" | "professional" => Some(PlanTier::Pro),
            "enterprise" => Some(PlanTier::Enterprise),
            _ => None,
        }
    }

    /// Display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Starter => "Starter",
            PlanTier::Basic => "Basic",
            PlanTier::Pro => "Pro",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// True if this tier never expires.
    pub fn is_non_expiring(&self) -> bool {
        matches!(self, PlanTier::Free)
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Billing cycle length for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// Default cycle: one calendar month.
    Monthly,
    /// Three calendar months.
    Quarterly,
    /// Twelve calendar months.
    Yearly,
}

impl BillingCycle {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "monthly" => Some(BillingCycle::Monthly),
            "quarterly" => Some(BillingCycle::Quarterly),
            "yearly" => Some(BillingCycle::Yearly),
            _ => None,
        }
    }

    /// Cycle length in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::Yearly => 12,
        }
    }
}

/// A resolved plan: tier plus billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub tier: PlanTier,
    pub cycle: BillingCycle,
}

impl Plan {
    /// Parses a plan id of the form `tier` or `tier_cycle`.
    ///
    /// Bare tier names default to the monthly cycle:
    /// `"pro"` → Pro/Monthly, `"pro_yearly"` → Pro/Yearly.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidPlan` if the tier (or cycle suffix) is
    /// not in the plan table.
    pub fn parse(plan_id: &str) -> Result<Self, BillingError> {
        let invalid = || BillingError::InvalidPlan(plan_id.to_string());

        match plan_id.rsplit_once('_') {
            Some((tier_name, cycle_name)) if BillingCycle::parse(cycle_name).is_some() => {
                let tier = PlanTier::parse(tier_name).ok_or_else(invalid)?;
                let cycle = BillingCycle::parse(cycle_name).ok_or_else(invalid)?;
                Ok(Plan { tier, cycle })
            }
            _ => {
                let tier = PlanTier::parse(plan_id).ok_or_else(invalid)?;
                Ok(Plan {
                    tier,
                    cycle: BillingCycle::Monthly,
                })
            }
        }
    }

    /// Display name, e.g. `"Pro"` or `"Pro (Yearly)"`.
    pub fn display_name(&self) -> String {
        match self.cycle {
            BillingCycle::Monthly => self.tier.display_name().to_string(),
            BillingCycle::Quarterly => format!("{} (Quarterly)", self.tier.display_name()),
            BillingCycle::Yearly => format!("{} (Yearly)", self.tier.display_name()),
        }
    }

    /// Computes the subscription end date from a start date.
    ///
    /// Non-expiring tiers yield `None`; otherwise the cycle length in
    /// calendar months is added to `start`.
    pub fn expiry_from(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.tier.is_non_expiring() {
            return None;
        }
        start.checked_add_months(Months::new(self.cycle.months()))
    }

    /// Feature limits for this plan's tier.
    pub fn features(&self) -> PlanFeatures {
        PlanFeatures::for_tier(self.tier)
    }
}

/// Capability limits for a plan tier.
///
/// `None` on a numeric limit means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeatures {
    /// Maximum published menus.
    pub max_menus: Option<u32>,
    /// Maximum orders per calendar month.
    pub max_orders_per_month: Option<u32>,
    /// Maximum tables with QR codes.
    pub max_tables: Option<u32>,
    /// QR code menus enabled.
    pub qr_menus: bool,
    /// Online ordering enabled.
    pub online_ordering: bool,
    /// Table booking enabled.
    pub table_booking: bool,
    /// AI menu extraction enabled.
    pub ai_menu_extraction: bool,
    /// Priority support enabled.
    pub priority_support: bool,
}

impl PlanFeatures {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Menus | Orders/mo | Tables | Online | Booking | AI |
    /// |------|-------|-----------|--------|--------|---------|----|
    /// | Free | 1 | 50 | 5 | No | No | No |
    /// | Starter | 3 | 300 | 15 | Yes | No | No |
    /// | Basic | 5 | 1000 | 30 | Yes | Yes | No |
    /// | Pro | 20 | 10000 | 100 | Yes | Yes | Yes |
    /// | Enterprise | Unlimited | Unlimited | Unlimited | Yes | Yes | Yes |
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                max_menus: Some(1),
                max_orders_per_month: Some(50),
                max_tables: Some(5),
                qr_menus: true,
                online_ordering: false,
                table_booking: false,
                ai_menu_extraction: false,
                priority_support: false,
            },
            PlanTier::Starter => Self {
                max_menus: Some(3),
                max_orders_per_month: Some(300),
                max_tables: Some(15),
                qr_menus: true,
                online_ordering: true,
                table_booking: false,
                ai_menu_extraction: false,
                priority_support: false,
            },
            PlanTier::Basic => Self {
                max_menus: Some(5),
                max_orders_per_month: Some(1000),
                max_tables: Some(30),
                qr_menus: true,
                online_ordering: true,
                table_booking: true,
                ai_menu_extraction: false,
                priority_support: false,
            },
            PlanTier::Pro => Self {
                max_menus: Some(20),
                max_orders_per_month: Some(10_000),
                max_tables: Some(100),
                qr_menus: true,
                online_ordering: true,
                table_booking: true,
                ai_menu_extraction: true,
                priority_support: true,
            },
            PlanTier::Enterprise => Self {
                max_menus: None,
                max_orders_per_month: None,
                max_tables: None,
                qr_menus: true,
                online_ordering: true,
                table_booking: true,
                ai_menu_extraction: true,
                priority_support: true,
            },
        }
    }
}
