use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use menulink_billing::adapters::gateway::HttpPaymentGateway;
use menulink_billing::adapters::http::billing::{billing_router, BillingAppState};
use menulink_billing::adapters::memory::{
    InMemoryOrderLedger, InMemoryPaymentRecordStore, InMemoryTenantStore, InMemoryWebhookEventLog,
};
use menulink_billing::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let gateway = Arc::new(HttpPaymentGateway::new(&config.gateway)?);
    let ledger = Arc::new(InMemoryOrderLedger::new());
    let payments = Arc::new(InMemoryPaymentRecordStore::new());
    let webhook_log = Arc::new(InMemoryWebhookEventLog::new());
    let tenants = Arc::new(InMemoryTenantStore::new());

    let state = BillingAppState::new(
        gateway,
        ledger,
        payments,
        webhook_log,
        tenants,
        config.gateway.application_tag.clone(),
        config.gateway.key_secret.clone(),
        config.gateway.webhook_secret.clone(),
    );

    let app = Router::new()
        .nest("/api", billing_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = %config.server.environment, "billing service listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
