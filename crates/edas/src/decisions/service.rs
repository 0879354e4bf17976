use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::domain::{DecisionRequest, DecisionResponse};
use super::repository::{HistoryError, HistoryId, HistoryRecord, HistoryStore, HistorySummary};
use super::scoring::{EdasEngine, ValidationError};

/// Service composing the scoring engine with the history store.
pub struct DecisionService<S> {
    engine: EdasEngine,
    store: Arc<S>,
}

/// Ranking together with the identifier it was saved under, if the save succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutcome {
    pub response: DecisionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<HistoryId>,
}

impl<S> DecisionService<S>
where
    S: HistoryStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: EdasEngine::new(),
            store,
        }
    }

    /// Rank the request, then record it.
    ///
    /// Persistence runs strictly after scoring and its failure is only logged:
    /// the ranking is returned either way.
    pub fn evaluate(&self, request: DecisionRequest) -> Result<DecisionOutcome, ValidationError> {
        let response = self.engine.evaluate(&request)?;

        let history_id = match self.store.save(&request, &response) {
            Ok(id) => {
                info!(history_id = %id, alternatives = response.ranking.len(), "decision recorded");
                Some(id)
            }
            Err(err) => {
                error!(error = %err, "failed to record decision history");
                None
            }
        };

        Ok(DecisionOutcome {
            response,
            history_id,
        })
    }

    /// Fetch a stored evaluation.
    pub fn history(&self, id: &HistoryId) -> Result<HistoryRecord, HistoryError> {
        self.store.find(id)?.ok_or(HistoryError::NotFound)
    }

    pub fn histories(&self) -> Result<Vec<HistorySummary>, HistoryError> {
        self.store.list()
    }

    /// Remove a stored evaluation.
    pub fn forget(&self, id: &HistoryId) -> Result<(), HistoryError> {
        self.store.delete(id)?;
        info!(history_id = %id, "decision history deleted");
        Ok(())
    }
}
