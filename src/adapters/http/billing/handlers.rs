//! Axum handlers for the billing endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use secrecy::SecretString;
use tracing::warn;

use crate::application::handlers::billing::{
    CreateCheckoutOrderCommand, CreateCheckoutOrderHandler, IngestWebhookCommand,
    IngestWebhookHandler, PaymentReconciler, SubscriptionManager, VerifyPaymentCommand,
    VerifyPaymentHandler,
};
use crate::domain::{BillingError, CheckoutDetails};
use crate::ports::{OrderLedger, PaymentGateway, PaymentRecordStore, TenantStore, WebhookEventLog};

use super::dto::{
    CreateOrderRequest, ErrorResponse, OrderResponse, SubscriptionDto, SubscriptionResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Gateway webhook signature header.
const SIGNATURE_HEADER: &str = "X-Signature";

/// Shared state for the billing routes: the wired use-case handlers.
#[derive(Clone)]
pub struct BillingAppState {
    create_order: Arc<CreateCheckoutOrderHandler>,
    verify_payment: Arc<VerifyPaymentHandler>,
    ingest_webhook: Arc<IngestWebhookHandler>,
    subscriptions: Arc<SubscriptionManager>,
}

impl BillingAppState {
    /// Wires the use-case handlers from ports and gateway credentials.
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        ledger: Arc<dyn OrderLedger>,
        payments: Arc<dyn PaymentRecordStore>,
        webhook_log: Arc<dyn WebhookEventLog>,
        tenants: Arc<dyn TenantStore>,
        application_tag: impl Into<String>,
        checkout_secret: SecretString,
        webhook_secret: SecretString,
    ) -> Self {
        let application_tag = application_tag.into();
        let reconciler = Arc::new(PaymentReconciler::new(
            payments,
            ledger.clone(),
            SubscriptionManager::new(tenants.clone()),
        ));

        Self {
            create_order: Arc::new(CreateCheckoutOrderHandler::new(
                gateway.clone(),
                ledger.clone(),
                application_tag.clone(),
            )),
            verify_payment: Arc::new(VerifyPaymentHandler::new(
                ledger.clone(),
                reconciler.clone(),
                checkout_secret,
            )),
            ingest_webhook: Arc::new(IngestWebhookHandler::new(
                gateway,
                webhook_log,
                ledger,
                reconciler,
                application_tag,
                webhook_secret,
            )),
            subscriptions: Arc::new(SubscriptionManager::new(tenants)),
        }
    }
}

/// `POST /billing/orders`
pub async fn create_order(
    State(state): State<BillingAppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, BillingApiError> {
    let order = state
        .create_order
        .handle(CreateCheckoutOrderCommand {
            amount: request.amount,
            currency: request.currency,
            details: CheckoutDetails {
                plan_id: request.plan_id,
                tenant_user_id: request.user_id,
                tenant_email: request.email,
                phone: request.phone,
                shop_id: request.shop_id,
            },
        })
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

/// `POST /billing/verify`
pub async fn verify_payment(
    State(state): State<BillingAppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, BillingApiError> {
    let verified = state
        .verify_payment
        .handle(VerifyPaymentCommand {
            order_id: request.order_id,
            payment_id: request.payment_id,
            signature: request.signature,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        order_id: verified.order_id,
        payment_id: verified.payment_id,
        plan_id: verified.plan_id,
        user_id: verified.tenant_user_id,
        email: verified.tenant_email,
    }))
}

/// `GET /billing/subscription/:user_id`
pub async fn get_subscription(
    State(state): State<BillingAppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SubscriptionResponse>, BillingApiError> {
    let view = state
        .subscriptions
        .current_view(&user_id, Utc::now())
        .await?
        .ok_or_else(|| {
            BillingApiError::not_found(format!("no subscription for user {}", user_id))
        })?;

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription: SubscriptionDto::from(view),
    }))
}

/// `POST /webhooks/gateway`
///
/// Always answers with a body-less status: the gateway only cares whether
/// to redeliver. 401 for a bad or missing signature, 400 for an
/// unparseable body, 502 when ownership could not be established, 200 for
/// everything else.
pub async fn gateway_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    else {
        warn!("webhook delivery missing signature header");
        return StatusCode::UNAUTHORIZED;
    };

    let result = state
        .ingest_webhook
        .handle(IngestWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await;

    match result {
        Ok(_) => StatusCode::OK,
        Err(BillingError::InvalidSignature) => StatusCode::UNAUTHORIZED,
        Err(BillingError::MalformedWebhook(_)) => StatusCode::BAD_REQUEST,
        Err(BillingError::GatewayUnavailable(_)) => StatusCode::BAD_GATEWAY,
        Err(e) => {
            warn!(error = %e, "unexpected webhook ingestion error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps domain errors onto client-facing JSON error responses.
#[derive(Debug)]
pub struct BillingApiError {
    status: StatusCode,
    message: String,
}

impl BillingApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        let status = match &err {
            BillingError::InvalidSignature => StatusCode::BAD_REQUEST,
            BillingError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::InvalidPlan(_)
            | BillingError::Validation(_)
            | BillingError::MalformedWebhook(_) => StatusCode::BAD_REQUEST,
            BillingError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
            BillingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Storage detail stays in the logs, not in responses.
        let message = match &err {
            BillingError::Storage(_) => "internal error".to_string(),
            other => other.to_string(),
        };

        Self { status, message }
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
