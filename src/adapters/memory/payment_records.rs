//! In-memory payment record store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{BillingError, PaymentRecord};
use crate::ports::{PaymentRecordStore, SaveResult};

/// `Mutex<HashMap>` implementation of [`PaymentRecordStore`].
///
/// The create-if-absent check and insert happen under one lock acquisition,
/// matching the atomicity a production store provides with a unique index.
#[derive(Default)]
pub struct InMemoryPaymentRecordStore {
    records: Mutex<HashMap<String, PaymentRecord>>,
    failures_remaining: Mutex<u32>,
}

impl InMemoryPaymentRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: make the next `n` writes fail with a storage error.
    pub fn inject_failures(&self, n: u32) {
        *self.failures_remaining.lock().unwrap() = n;
    }

    /// Test helper: number of stored records.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Test helper: snapshot of one record.
    pub fn get(&self, payment_id: &str) -> Option<PaymentRecord> {
        self.records.lock().unwrap().get(payment_id).cloned()
    }

    fn take_injected_failure(&self) -> bool {
        let mut remaining = self.failures_remaining.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl PaymentRecordStore for InMemoryPaymentRecordStore {
    async fn create_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, BillingError> {
        if self.take_injected_failure() {
            return Err(BillingError::storage("injected write failure"));
        }

        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.payment_id) {
            return Ok(SaveResult::AlreadyExists);
        }
        records.insert(record.payment_id.clone(), record);
        Ok(SaveResult::Inserted)
    }

    async fn find(&self, payment_id: &str) -> Result<Option<PaymentRecord>, BillingError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(payment_id).cloned())
    }
}
