//! EDAS (Evaluation based on Distance from Average Solution) scoring engine.
//!
//! The engine runs four passes over a validated [`DecisionMatrix`]: criterion
//! averages, weighted positive/negative distances, max-normalization, and the
//! appraisal score used for ranking. All intermediate values live in
//! engine-local scratch vectors; the caller's request is only ever borrowed.

mod appraisal;
mod diagnostics;
mod distance;
mod validation;

pub use diagnostics::DegenerateInput;
pub use validation::{validate, DecisionMatrix, ValidationError};

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{DecisionRequest, DecisionResponse, RankedAlternative};

/// Stateless ranking engine; safe to share across threads and requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdasEngine;

impl EdasEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rank every alternative in `request`.
    pub fn evaluate(&self, request: &DecisionRequest) -> Result<DecisionResponse, ValidationError> {
        self.assess(request).map(Assessment::into_response)
    }

    /// Rank every alternative and keep the intermediate breakdown.
    pub fn assess(&self, request: &DecisionRequest) -> Result<Assessment, ValidationError> {
        let matrix = validate(request)?;

        let averages = distance::criterion_averages(&matrix);
        let distances = distance::distances(&matrix, &averages);
        let appraisals = appraisal::appraise(&distances);
        let ranking = appraisal::rank(&matrix, &appraisals);
        let warnings = diagnostics::detect(&matrix, &averages, &appraisals);

        for warning in &warnings {
            warn!(%warning, "degenerate decision input");
        }
        debug!(
            alternatives = matrix.alternative_count(),
            criteria = matrix.criterion_count(),
            leader = ranking.first().map(|entry| entry.name.as_str()),
            "ranked alternatives"
        );

        let averages = matrix
            .criteria
            .iter()
            .zip(averages)
            .map(|(criterion, average)| CriterionAverage {
                criterion: criterion.name.to_string(),
                average,
            })
            .collect();

        let breakdown = matrix
            .alternatives
            .iter()
            .zip(distances.iter().zip(&appraisals))
            .map(|(row, (distance, appraisal))| AlternativeBreakdown {
                name: row.name.to_string(),
                positive_distance: distance.positive,
                negative_distance: distance.negative,
                normalized_positive_distance: appraisal.normalized_positive,
                normalized_negative_distance: appraisal.normalized_negative,
                appraisal_score: appraisal.score,
            })
            .collect();

        Ok(Assessment {
            averages,
            breakdown,
            ranking,
            warnings,
        })
    }
}

/// Average solution for a single criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionAverage {
    pub criterion: String,
    pub average: f64,
}

/// Intermediate values computed for one alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeBreakdown {
    pub name: String,
    pub positive_distance: f64,
    pub negative_distance: f64,
    pub normalized_positive_distance: f64,
    pub normalized_negative_distance: f64,
    pub appraisal_score: f64,
}

/// Full evaluation result: ranking plus the audit trail that produced it.
///
/// `averages` follow criterion input order and `breakdown` follows alternative
/// input order; only `ranking` is sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub averages: Vec<CriterionAverage>,
    pub breakdown: Vec<AlternativeBreakdown>,
    pub ranking: Vec<RankedAlternative>,
    pub warnings: Vec<DegenerateInput>,
}

impl Assessment {
    pub fn into_response(self) -> DecisionResponse {
        DecisionResponse {
            ranking: self.ranking,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }
}
