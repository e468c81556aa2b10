//! Error types for the billing domain.

use thiserror::Error;

/// Errors produced by the reconciliation engine.
///
/// Ownership mismatches are deliberately *not* an error: a webhook for a
/// different product line on the shared gateway account is acknowledged and
/// ignored (see `WebhookOutcome::ForeignApplication`).
#[derive(Debug, Clone, Error)]
pub enum BillingError {
    /// Signature verification failed. Always a hard rejection, before any
    /// persistence.
    #[error("Signature verification failed")]
    InvalidSignature,

    /// The referenced order was never created by this service.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The upstream payment gateway could not be reached or returned an
    /// error. Retryable with backoff at the caller.
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The webhook payload could not be parsed or is missing the payment
    /// entity.
    #[error("Malformed webhook payload: {0}")]
    MalformedWebhook(String),

    /// The plan id does not resolve to a known tier.
    #[error("Unknown plan: {0}")]
    InvalidPlan(String),

    /// A request failed input validation before reaching the gateway.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A datastore operation failed. Retried a bounded number of times on
    /// the webhook path; surfaced to the caller on the verify path.
    #[error("Datastore operation failed: {0}")]
    Storage(String),
}

impl BillingError {
    /// Creates a gateway-unavailable error.
    pub fn gateway(message: impl Into<String>) -> Self {
        BillingError::GatewayUnavailable(message.into())
    }

    /// Creates a malformed-webhook error.
    pub fn malformed(message: impl Into<String>) -> Self {
        BillingError::MalformedWebhook(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        BillingError::Storage(message.into())
    }

    /// True for transient faults worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BillingError::Storage(_) | BillingError::GatewayUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_without_detail() {
        let err = BillingError::InvalidSignature;
        assert_eq!(err.to_string(), "Signature verification failed");
    }

    #[test]
    fn order_not_found_includes_order_id() {
        let err = BillingError::OrderNotFound("order_123".to_string());
        assert!(err.to_string().contains("order_123"));
    }

    #[test]
    fn storage_and_gateway_errors_are_retryable() {
        assert!(BillingError::storage("connection reset").is_retryable());
        assert!(BillingError::gateway("timeout").is_retryable());
        assert!(!BillingError::InvalidSignature.is_retryable());
        assert!(!BillingError::OrderNotFound("o".into()).is_retryable());
    }
}
