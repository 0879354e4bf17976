//! Multi-criteria decision ranking: EDAS scoring, decision history, and HTTP routing.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Alternative, Criterion, CriterionDirection, DecisionRequest, DecisionResponse,
    RankedAlternative,
};
pub use import::{DecisionMatrixImport, MatrixImportError};
pub use repository::{HistoryError, HistoryId, HistoryRecord, HistoryStore, HistorySummary};
pub use router::{decision_router, HISTORY_ID_HEADER};
pub use scoring::{
    validate, AlternativeBreakdown, Assessment, CriterionAverage, DecisionMatrix,
    DegenerateInput, EdasEngine, ValidationError,
};
pub use service::{DecisionOutcome, DecisionService};
