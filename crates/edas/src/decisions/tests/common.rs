use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::decisions::domain::{Alternative, Criterion, DecisionRequest, DecisionResponse};
use crate::decisions::repository::{
    HistoryError, HistoryId, HistoryRecord, HistoryStore, HistorySummary,
};
use crate::decisions::service::DecisionService;

/// Two alternatives over one benefit criterion; B clearly wins.
pub(super) fn worked_example() -> DecisionRequest {
    DecisionRequest {
        alternatives: vec![
            Alternative::new("A", [("x", 10.0)]),
            Alternative::new("B", [("x", 20.0)]),
        ],
        criteria: vec![Criterion::benefit("x", 1.0)],
    }
}

/// Supplier selection mixing benefit and cost criteria.
pub(super) fn supplier_request() -> DecisionRequest {
    DecisionRequest {
        alternatives: vec![
            Alternative::new(
                "Acme",
                [("price", 120.0), ("quality", 8.0), ("delivery_days", 5.0)],
            ),
            Alternative::new(
                "Globex",
                [("price", 95.0), ("quality", 6.0), ("delivery_days", 7.0)],
            ),
            Alternative::new(
                "Initech",
                [("price", 100.0), ("quality", 9.0), ("delivery_days", 3.0)],
            ),
            Alternative::new(
                "Umbrella",
                [("price", 140.0), ("quality", 5.0), ("delivery_days", 10.0)],
            ),
        ],
        criteria: vec![
            Criterion::cost("price", 0.4),
            Criterion::benefit("quality", 0.35),
            Criterion::cost("delivery_days", 0.25),
        ],
    }
}

pub(super) fn build_service() -> (DecisionService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = DecisionService::new(store.clone());
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<Vec<HistoryRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl HistoryStore for MemoryStore {
    fn save(
        &self,
        request: &DecisionRequest,
        response: &DecisionResponse,
    ) -> Result<HistoryId, HistoryError> {
        let record = HistoryRecord::new(request.clone(), response.clone());
        let id = record.id;
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record);
        Ok(id)
    }

    fn find(&self, id: &HistoryId) -> Result<Option<HistoryRecord>, HistoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<HistorySummary>, HistoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().map(HistoryRecord::summary).collect())
    }

    fn delete(&self, id: &HistoryId) -> Result<(), HistoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|record| record.id != *id);
        if guard.len() == before {
            Err(HistoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

pub(super) struct UnavailableStore;

impl HistoryStore for UnavailableStore {
    fn save(
        &self,
        _request: &DecisionRequest,
        _response: &DecisionResponse,
    ) -> Result<HistoryId, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn find(&self, _id: &HistoryId) -> Result<Option<HistoryRecord>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<HistorySummary>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &HistoryId) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn names(response: &DecisionResponse) -> Vec<&str> {
    response
        .ranking
        .iter()
        .map(|entry| entry.name.as_str())
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
