use std::fmt;

use serde::Serialize;

use super::appraisal::Appraisal;
use super::validation::DecisionMatrix;

/// Non-fatal condition that makes a ranking less informative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegenerateInput {
    /// Criterion carries no weight and cannot influence the ranking.
    ZeroWeight { criterion: String },
    /// Criterion averages to zero; its distances fall back to zero.
    ZeroAverage { criterion: String },
    /// Every alternative received the same appraisal score.
    UniformScores,
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateInput::ZeroWeight { criterion } => {
                write!(f, "criterion '{criterion}' has zero weight")
            }
            DegenerateInput::ZeroAverage { criterion } => {
                write!(f, "criterion '{criterion}' averages to zero")
            }
            DegenerateInput::UniformScores => {
                write!(f, "all alternatives share the same appraisal score")
            }
        }
    }
}

pub(crate) fn detect(
    matrix: &DecisionMatrix<'_>,
    averages: &[f64],
    appraisals: &[Appraisal],
) -> Vec<DegenerateInput> {
    let mut warnings = Vec::new();

    for (criterion, &average) in matrix.criteria.iter().zip(averages) {
        if criterion.weight == 0.0 {
            warnings.push(DegenerateInput::ZeroWeight {
                criterion: criterion.name.to_string(),
            });
        }
        if average == 0.0 {
            warnings.push(DegenerateInput::ZeroAverage {
                criterion: criterion.name.to_string(),
            });
        }
    }

    if let Some((first, rest)) = appraisals.split_first() {
        if rest.iter().all(|appraisal| appraisal.score == first.score) {
            warnings.push(DegenerateInput::UniformScores);
        }
    }

    warnings
}
