use super::super::domain::CriterionDirection;
use super::validation::DecisionMatrix;

/// Weighted distances of one alternative from the average solution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Distances {
    pub(crate) positive: f64,
    pub(crate) negative: f64,
}

/// Mean raw score per criterion, in criterion order.
///
/// Computed from the validated input scores only. Each term is divided before
/// summing so large finite scores cannot overflow the accumulator.
pub(crate) fn criterion_averages(matrix: &DecisionMatrix<'_>) -> Vec<f64> {
    let count = matrix.alternatives.len() as f64;
    (0..matrix.criteria.len())
        .map(|column| {
            matrix
                .alternatives
                .iter()
                .map(|row| row.scores[column] / count)
                .sum()
        })
        .collect()
}

/// Positive and negative distance for every alternative, in input order.
pub(crate) fn distances(matrix: &DecisionMatrix<'_>, averages: &[f64]) -> Vec<Distances> {
    matrix
        .alternatives
        .iter()
        .map(|row| {
            let mut distances = Distances::default();
            for ((criterion, &score), &average) in
                matrix.criteria.iter().zip(&row.scores).zip(averages)
            {
                let (favorable, unfavorable) = deviations(score, average, criterion.direction);
                distances.positive = saturate(distances.positive + favorable * criterion.weight);
                distances.negative = saturate(distances.negative + unfavorable * criterion.weight);
            }
            distances
        })
        .collect()
}

/// Favorable and unfavorable deviation of `score` relative to `average`.
///
/// A zero average contributes nothing to either side. The divisor is the
/// magnitude of the average so negative-valued criteria keep non-negative
/// distances. Scaling happens before subtracting, so finite scores of
/// opposite sign never overflow to infinity mid-computation.
fn deviations(score: f64, average: f64, direction: CriterionDirection) -> (f64, f64) {
    if average == 0.0 {
        return (0.0, 0.0);
    }

    let offset = saturate(score / average.abs() - average.signum());
    let above = offset.max(0.0);
    let below = (-offset).max(0.0);
    match direction {
        CriterionDirection::Benefit => (above, below),
        CriterionDirection::Cost => (below, above),
    }
}

/// Clamp to the finite range; an overflowed distance stays the largest one.
fn saturate(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}
