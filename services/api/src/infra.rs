use edas::decisions::{
    Criterion, CriterionDirection, DecisionRequest, DecisionResponse, HistoryError, HistoryId,
    HistoryRecord, HistoryStore, HistorySummary,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history store that keeps the newest `capacity` records.
#[derive(Clone)]
pub(crate) struct InMemoryHistoryStore {
    records: Arc<Mutex<VecDeque<HistoryRecord>>>,
    capacity: usize,
}

impl InMemoryHistoryStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn save(
        &self,
        request: &DecisionRequest,
        response: &DecisionResponse,
    ) -> Result<HistoryId, HistoryError> {
        let record = HistoryRecord::new(request.clone(), response.clone());
        let id = record.id;
        let mut guard = self.records.lock().expect("history mutex poisoned");
        while guard.len() >= self.capacity {
            if let Some(evicted) = guard.pop_front() {
                debug!(history_id = %evicted.id, "evicted oldest history record");
            }
        }
        guard.push_back(record);
        Ok(id)
    }

    fn find(&self, id: &HistoryId) -> Result<Option<HistoryRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<HistorySummary>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().map(HistoryRecord::summary).collect())
    }

    fn delete(&self, id: &HistoryId) -> Result<(), HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        let position = guard
            .iter()
            .position(|record| record.id == *id)
            .ok_or(HistoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}

/// Parse `name:weight:type`, e.g. `price:0.4:cost`.
///
/// The name may itself contain colons; weight and type are taken from the end.
pub(crate) fn parse_criterion(raw: &str) -> Result<Criterion, String> {
    let mut parts = raw.trim().rsplitn(3, ':');
    let (Some(kind), Some(weight), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected name:weight:type, got '{raw}'"));
    };

    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid weight '{weight}' in '{raw}' ({err})"))?;
    let direction = CriterionDirection::parse(kind)
        .ok_or_else(|| format!("type must be 'benefit' or 'cost', got '{kind}'"))?;

    Ok(Criterion::new(name.trim(), weight, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edas::decisions::{Alternative, EdasEngine};

    fn request(value: f64) -> DecisionRequest {
        DecisionRequest {
            alternatives: vec![
                Alternative::new("low", [("x", 1.0)]),
                Alternative::new("high", [("x", value)]),
            ],
            criteria: vec![Criterion::benefit("x", 1.0)],
        }
    }

    fn save(store: &InMemoryHistoryStore, value: f64) -> HistoryId {
        let request = request(value);
        let response = EdasEngine::new().evaluate(&request).expect("valid request");
        store.save(&request, &response).expect("save succeeds")
    }

    #[test]
    fn store_evicts_oldest_records_beyond_capacity() {
        let store = InMemoryHistoryStore::with_capacity(2);
        let first = save(&store, 2.0);
        let second = save(&store, 3.0);
        let third = save(&store, 4.0);

        let ids: Vec<HistoryId> = store
            .list()
            .expect("list succeeds")
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        assert_eq!(ids, vec![second, third]);
        assert!(store.find(&first).expect("lookup succeeds").is_none());
    }

    #[test]
    fn store_delete_reports_missing_records() {
        let store = InMemoryHistoryStore::with_capacity(4);
        let id = save(&store, 2.0);

        store.delete(&id).expect("delete succeeds");
        assert!(matches!(store.delete(&id), Err(HistoryError::NotFound)));
    }

    #[test]
    fn parse_criterion_reads_name_weight_and_type() {
        let criterion = parse_criterion("delivery:days:0.25:Cost").expect("parses");
        assert_eq!(criterion.name, "delivery:days");
        assert_eq!(criterion.weight, 0.25);
        assert_eq!(criterion.kind, "cost");
    }

    #[test]
    fn parse_criterion_rejects_malformed_values() {
        assert!(parse_criterion("price").is_err());
        assert!(parse_criterion("price:heavy:cost").is_err());
        assert!(parse_criterion("price:1:neutral").is_err());
    }
}
