use std::cmp::Ordering;

use super::super::domain::RankedAlternative;
use super::distance::Distances;
use super::validation::DecisionMatrix;

/// Normalized distances and the combined appraisal score of one alternative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Appraisal {
    pub(crate) normalized_positive: f64,
    pub(crate) normalized_negative: f64,
    pub(crate) score: f64,
}

/// Scale each distance by the largest distance of its kind and combine them.
pub(crate) fn appraise(distances: &[Distances]) -> Vec<Appraisal> {
    let max_positive = distances
        .iter()
        .map(|distance| distance.positive)
        .fold(0.0, f64::max);
    let max_negative = distances
        .iter()
        .map(|distance| distance.negative)
        .fold(0.0, f64::max);

    distances
        .iter()
        .map(|distance| {
            let normalized_positive = normalize(distance.positive, max_positive);
            let normalized_negative = normalize(distance.negative, max_negative);
            Appraisal {
                normalized_positive,
                normalized_negative,
                score: (normalized_positive + (1.0 - normalized_negative)) / 2.0,
            }
        })
        .collect()
}

fn normalize(value: f64, max: f64) -> f64 {
    if max == 0.0 {
        return 0.0;
    }
    let ratio = value / max;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Order alternatives by descending appraisal score.
///
/// The sort is stable, so equal scores keep their input order.
pub(crate) fn rank(matrix: &DecisionMatrix<'_>, appraisals: &[Appraisal]) -> Vec<RankedAlternative> {
    let mut order: Vec<usize> = (0..appraisals.len()).collect();
    order.sort_by(|&left, &right| {
        appraisals[right]
            .score
            .partial_cmp(&appraisals[left].score)
            .unwrap_or(Ordering::Equal)
    });

    order
        .into_iter()
        .enumerate()
        .map(|(position, index)| RankedAlternative {
            name: matrix.alternatives[index].name.to_string(),
            score: appraisals[index].score,
            rank: position + 1,
        })
        .collect()
}
