use std::collections::HashSet;

use super::super::domain::{CriterionDirection, DecisionRequest};

/// Malformed or incomplete decision input, detected before any computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("request must contain at least one alternative")]
    NoAlternatives,
    #[error("request must contain at least one criterion")]
    NoCriteria,
    #[error("{field} must not be blank")]
    BlankName { field: String },
    #[error("criterion '{name}' is declared more than once")]
    DuplicateCriterion { index: usize, name: String },
    #[error("alternative '{name}' is declared more than once")]
    DuplicateAlternative { index: usize, name: String },
    #[error("criterion '{name}' has weight {weight}; weights must be finite and non-negative")]
    InvalidWeight {
        index: usize,
        name: String,
        weight: f64,
    },
    #[error("criterion '{name}' has unknown type '{value}'; expected 'benefit' or 'cost'")]
    UnknownDirection {
        index: usize,
        name: String,
        value: String,
    },
    #[error("alternative '{alternative}' is missing a score for criterion '{criterion}'")]
    MissingScore {
        index: usize,
        alternative: String,
        criterion: String,
    },
    #[error("alternative '{alternative}' has a non-finite score for criterion '{criterion}'")]
    NonFiniteScore {
        index: usize,
        alternative: String,
        criterion: String,
    },
}

impl ValidationError {
    /// Locator of the offending input field, e.g. `alternatives[0].scores.price`.
    pub fn field(&self) -> String {
        match self {
            Self::NoAlternatives => "alternatives".to_string(),
            Self::NoCriteria => "criteria".to_string(),
            Self::BlankName { field } => field.clone(),
            Self::DuplicateCriterion { index, .. } => format!("criteria[{index}].name"),
            Self::DuplicateAlternative { index, .. } => format!("alternatives[{index}].name"),
            Self::InvalidWeight { index, .. } => format!("criteria[{index}].weight"),
            Self::UnknownDirection { index, .. } => format!("criteria[{index}].type"),
            Self::MissingScore {
                index, criterion, ..
            }
            | Self::NonFiniteScore {
                index, criterion, ..
            } => format!("alternatives[{index}].scores.{criterion}"),
        }
    }
}

/// Criterion after validation, with its direction resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CriterionColumn<'a> {
    pub(crate) name: &'a str,
    pub(crate) weight: f64,
    pub(crate) direction: CriterionDirection,
}

/// Alternative after validation, with scores laid out in criterion order.
#[derive(Debug, Clone)]
pub(crate) struct AlternativeRow<'a> {
    pub(crate) name: &'a str,
    pub(crate) scores: Vec<f64>,
}

/// Validated view over a request; borrows names and never touches the caller's maps.
#[derive(Debug, Clone)]
pub struct DecisionMatrix<'a> {
    pub(crate) criteria: Vec<CriterionColumn<'a>>,
    pub(crate) alternatives: Vec<AlternativeRow<'a>>,
}

impl DecisionMatrix<'_> {
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }
}

/// Check every precondition of the engine, failing on the first violation.
pub fn validate(request: &DecisionRequest) -> Result<DecisionMatrix<'_>, ValidationError> {
    if request.alternatives.is_empty() {
        return Err(ValidationError::NoAlternatives);
    }
    if request.criteria.is_empty() {
        return Err(ValidationError::NoCriteria);
    }

    let mut criterion_names = HashSet::with_capacity(request.criteria.len());
    let mut criteria = Vec::with_capacity(request.criteria.len());
    for (index, criterion) in request.criteria.iter().enumerate() {
        if criterion.name.trim().is_empty() {
            return Err(ValidationError::BlankName {
                field: format!("criteria[{index}].name"),
            });
        }
        if !criterion_names.insert(criterion.name.as_str()) {
            return Err(ValidationError::DuplicateCriterion {
                index,
                name: criterion.name.clone(),
            });
        }
        if !criterion.weight.is_finite() || criterion.weight < 0.0 {
            return Err(ValidationError::InvalidWeight {
                index,
                name: criterion.name.clone(),
                weight: criterion.weight,
            });
        }
        let direction = CriterionDirection::parse(&criterion.kind).ok_or_else(|| {
            ValidationError::UnknownDirection {
                index,
                name: criterion.name.clone(),
                value: criterion.kind.clone(),
            }
        })?;

        criteria.push(CriterionColumn {
            name: &criterion.name,
            weight: criterion.weight,
            direction,
        });
    }

    let mut alternative_names = HashSet::with_capacity(request.alternatives.len());
    let mut alternatives = Vec::with_capacity(request.alternatives.len());
    for (index, alternative) in request.alternatives.iter().enumerate() {
        if alternative.name.trim().is_empty() {
            return Err(ValidationError::BlankName {
                field: format!("alternatives[{index}].name"),
            });
        }
        if !alternative_names.insert(alternative.name.as_str()) {
            return Err(ValidationError::DuplicateAlternative {
                index,
                name: alternative.name.clone(),
            });
        }

        let mut scores = Vec::with_capacity(criteria.len());
        for column in &criteria {
            let score = alternative.scores.get(column.name).copied().ok_or_else(|| {
                ValidationError::MissingScore {
                    index,
                    alternative: alternative.name.clone(),
                    criterion: column.name.to_string(),
                }
            })?;
            if !score.is_finite() {
                return Err(ValidationError::NonFiniteScore {
                    index,
                    alternative: alternative.name.clone(),
                    criterion: column.name.to_string(),
                });
            }
            scores.push(score);
        }

        alternatives.push(AlternativeRow {
            name: &alternative.name,
            scores,
        });
    }

    Ok(DecisionMatrix {
        criteria,
        alternatives,
    })
}
