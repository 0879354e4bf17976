use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{DecisionRequest, DecisionResponse, RankedAlternative};

/// Identifier generated for every persisted evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub Uuid);

impl HistoryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, HistoryError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| HistoryError::InvalidId(raw.to_string()))
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: HistoryId,
    pub created_at: DateTime<Utc>,
    pub request: DecisionRequest,
    pub response: DecisionResponse,
}

impl HistoryRecord {
    pub fn new(request: DecisionRequest, response: DecisionResponse) -> Self {
        Self {
            id: HistoryId::generate(),
            created_at: Utc::now(),
            request,
            response,
        }
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id,
            created_at: self.created_at,
            ranking: self.response.ranking.clone(),
        }
    }
}

/// List projection of a record: identifier, timestamp and ranking only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: HistoryId,
    pub created_at: DateTime<Utc>,
    pub ranking: Vec<RankedAlternative>,
}

/// Storage abstraction for past evaluations; the engine never sees it.
pub trait HistoryStore: Send + Sync {
    fn save(
        &self,
        request: &DecisionRequest,
        response: &DecisionResponse,
    ) -> Result<HistoryId, HistoryError>;
    fn find(&self, id: &HistoryId) -> Result<Option<HistoryRecord>, HistoryError>;
    /// Summaries ordered oldest first.
    fn list(&self) -> Result<Vec<HistorySummary>, HistoryError>;
    fn delete(&self, id: &HistoryId) -> Result<(), HistoryError>;
}

/// Error enumeration for history store failures.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history record not found")]
    NotFound,
    #[error("'{0}' is not a valid history identifier")]
    InvalidId(String),
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
