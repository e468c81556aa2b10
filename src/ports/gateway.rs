//! Port for the external payment gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::BillingError;

/// Metadata notes attached to a gateway order at creation time.
///
/// The gateway echoes these back verbatim, which is how ownership of an
/// order is established on a shared gateway account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrderNotes {
    pub application_tag: String,
    pub plan_id: String,
    pub tenant_user_id: String,
    pub tenant_email: String,
}

/// Request to mint an order at the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGatewayOrder {
    /// Amount in the smallest currency unit.
    pub amount_minor_units: i64,
    pub currency: String,
    /// Caller-generated receipt id, unique per order.
    pub receipt: String,
    pub notes: GatewayOrderNotes,
}

/// An order as minted by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount_minor_units: i64,
    pub currency: String,
}

/// The slice of a gateway order needed for ownership checks.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrderMeta {
    pub id: String,
    /// The application tag from the order's notes, if any.
    pub application_tag: Option<String>,
}

/// Client for the payment gateway's order API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mints a new order at the gateway.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::GatewayUnavailable` on transport failures or
    /// non-success gateway responses.
    async fn create_order(&self, request: CreateGatewayOrder)
        -> Result<GatewayOrder, BillingError>;

    /// Fetches an order's metadata, used to check ownership during webhook
    /// ingestion.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::GatewayUnavailable` on transport failures or
    /// non-success gateway responses.
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderMeta, BillingError>;
}
