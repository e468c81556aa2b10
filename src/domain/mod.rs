//! Domain model for the reconciliation engine.
//!
//! Pure types and logic: no I/O, no framework dependencies. Persistence and
//! transport concerns live behind the ports in `crate::ports`.

pub mod errors;
pub mod order;
pub mod payment;
pub mod plan;
pub mod signature;
pub mod subscription;
pub mod tenant;
pub mod webhook;

pub use errors::BillingError;
pub use order::{CheckoutDetails, Order, OrderStatus};
pub use payment::{PaymentRecord, PaymentRecordStatus};
pub use plan::{BillingCycle, Plan, PlanFeatures, PlanTier};
pub use subscription::{Subscription, SubscriptionStatus, SubscriptionView};
pub use tenant::TenantAccount;
pub use webhook::{GatewayWebhook, PaymentEntity, WebhookEvent};
