//! Billing use cases: checkout, payment confirmation, webhook ingestion,
//! and subscription reads.

mod create_order;
mod ingest_webhook;
mod reconciler;
mod subscription_manager;
mod verify_payment;

pub use create_order::{CreateCheckoutOrderCommand, CreateCheckoutOrderHandler};
pub use ingest_webhook::{IngestWebhookCommand, IngestWebhookHandler, WebhookOutcome};
pub use reconciler::{PaymentReconciler, Reconciliation};
pub use subscription_manager::SubscriptionManager;
pub use verify_payment::{VerifiedPayment, VerifyPaymentCommand, VerifyPaymentHandler};
