//! In-memory webhook audit log.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{BillingError, WebhookEvent};
use crate::ports::WebhookEventLog;

/// `Mutex<Vec>` implementation of [`WebhookEventLog`].
#[derive(Default)]
pub struct InMemoryWebhookEventLog {
    events: Mutex<Vec<WebhookEvent>>,
    failures_remaining: Mutex<u32>,
}

impl InMemoryWebhookEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: make the next `n` appends fail with a storage error.
    pub fn inject_failures(&self, n: u32) {
        *self.failures_remaining.lock().unwrap() = n;
    }

    /// Test helper: number of appended rows.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Test helper: snapshot of all rows.
    pub fn all(&self) -> Vec<WebhookEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookEventLog for InMemoryWebhookEventLog {
    async fn append(&self, event: WebhookEvent) -> Result<(), BillingError> {
        {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BillingError::storage("injected append failure"));
            }
        }

        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
