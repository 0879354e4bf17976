use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Criterion a decision request ranks its alternatives against.
///
/// `kind` is kept as the raw wire value (`"benefit"` or `"cost"`) so an unknown
/// value surfaces as a validation error naming the criterion instead of a
/// generic body rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>, weight: f64, direction: CriterionDirection) -> Self {
        Self {
            name: name.into(),
            weight,
            kind: direction.label().to_string(),
        }
    }

    pub fn benefit(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, weight, CriterionDirection::Benefit)
    }

    pub fn cost(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, weight, CriterionDirection::Cost)
    }
}

/// Whether higher (benefit) or lower (cost) raw values are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionDirection {
    Benefit,
    Cost,
}

impl CriterionDirection {
    /// Parses a wire value, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("benefit") {
            Some(Self::Benefit)
        } else if value.eq_ignore_ascii_case("cost") {
            Some(Self::Cost)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Benefit => "benefit",
            Self::Cost => "cost",
        }
    }
}

/// Competing option carrying one raw score per criterion name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl Alternative {
    pub fn new<I, K>(name: impl Into<String>, scores: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            name: name.into(),
            scores: scores
                .into_iter()
                .map(|(criterion, score)| (criterion.into(), score))
                .collect(),
        }
    }
}

/// Alternatives and criteria submitted for ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

/// One entry of the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub name: String,
    pub score: f64,
    pub rank: usize,
}

/// Ranking ordered by ascending `rank`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub ranking: Vec<RankedAlternative>,
}

impl DecisionResponse {
    pub fn leader(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }
}
