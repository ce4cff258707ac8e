use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::{StateError, StateResult};
use super::{EndpointStatus, ServiceRecord, StateStore, Subscriber};

/// In-process [`StateStore`] backed by a `RwLock`-guarded map.
///
/// Every mutation holds the write lock for its full read-modify-write, so the
/// conditional transition is atomic and list-appends serialize per call.
#[derive(Default)]
pub struct MemoryStateStore {
    records: RwLock<HashMap<String, ServiceRecord>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_record<T>(
        &self,
        model_id: &str,
        f: impl FnOnce(&mut ServiceRecord) -> StateResult<T>,
    ) -> StateResult<T> {
        let mut records = self.records.write();
        let record = records
            .entry(model_id.to_string())
            .or_insert_with(|| ServiceRecord::stopped(model_id));
        f(record)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, model_id: &str) -> StateResult<ServiceRecord> {
        let records = self.records.read();
        Ok(records
            .get(model_id)
            .cloned()
            .unwrap_or_else(|| ServiceRecord::stopped(model_id)))
    }

    async fn transition_status(
        &self,
        model_id: &str,
        expected: EndpointStatus,
        next: EndpointStatus,
    ) -> StateResult<()> {
        self.with_record(model_id, |record| {
            if record.status != expected {
                return Err(StateError::ConditionFailed {
                    expected,
                    actual: record.status,
                });
            }
            record.status = next;
            Ok(())
        })
    }

    async fn set_status(&self, model_id: &str, status: EndpointStatus) -> StateResult<()> {
        self.with_record(model_id, |record| {
            record.status = status;
            Ok(())
        })
    }

    async fn push_subscriber(&self, model_id: &str, subscriber: Subscriber) -> StateResult<()> {
        self.with_record(model_id, |record| {
            record.subscribers.push(subscriber);
            Ok(())
        })
    }

    async fn take_subscribers(&self, model_id: &str) -> StateResult<Vec<Subscriber>> {
        self.with_record(model_id, |record| Ok(std::mem::take(&mut record.subscribers)))
    }

    async fn set_endpoint(
        &self,
        model_id: &str,
        endpoint_name: &str,
        subscribers: Vec<Subscriber>,
    ) -> StateResult<()> {
        self.with_record(model_id, |record| {
            record.endpoint_name = Some(endpoint_name.to_string());
            record.subscribers = subscribers;
            Ok(())
        })
    }

    async fn set_schedule(&self, model_id: &str, schedule_name: Option<&str>) -> StateResult<()> {
        self.with_record(model_id, |record| {
            record.schedule_name = schedule_name.map(str::to_string);
            Ok(())
        })
    }

    async fn reset(&self, model_id: &str) -> StateResult<()> {
        self.with_record(model_id, |record| {
            record.status = EndpointStatus::Stopped;
            record.endpoint_name = None;
            record.schedule_name = None;
            Ok(())
        })
    }
}
