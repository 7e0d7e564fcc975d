use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(pub i64);

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(pub i64);

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction in which a criterion's raw value improves an alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger raw values are better (facilities, transport access).
    Benefit,
    /// Smaller raw values are better (price, distance).
    Cost,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Benefit => "Benefit",
            Self::Cost => "Cost",
        }
    }
}

/// A weighted decision criterion. Weights are percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "bobot")]
    pub weight: f64,
    #[serde(rename = "tipe")]
    pub polarity: Polarity,
}

impl Criterion {
    pub fn new(id: i64, name: impl Into<String>, weight: f64, polarity: Polarity) -> Self {
        Self {
            id: CriterionId(id),
            name: name.into(),
            weight,
            polarity,
        }
    }
}

/// Raw score an alternative carries for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeValue {
    pub criteria_id: CriterionId,
    pub nilai: f64,
}

/// A housing option under consideration, owning its raw criterion values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: AlternativeId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "gambar", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub values: Vec<AlternativeValue>,
}

impl Alternative {
    pub fn new(id: i64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: AlternativeId(id),
            name: name.into(),
            location: location.into(),
            image: None,
            values: Vec::new(),
        }
    }

    /// Builder-style helper appending a raw value for `criterion`.
    pub fn with_value(mut self, criterion: i64, nilai: f64) -> Self {
        self.values.push(AlternativeValue {
            criteria_id: CriterionId(criterion),
            nilai,
        });
        self
    }

    /// Raw value for `criterion`; the first entry wins when duplicated.
    pub fn value_for(&self, criterion: CriterionId) -> Option<f64> {
        self.values
            .iter()
            .find(|value| value.criteria_id == criterion)
            .map(|value| value.nilai)
    }
}

/// Ranked view of an alternative produced by one calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAlternative {
    pub id: AlternativeId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "gambar", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub normalized_values: BTreeMap<CriterionId, f64>,
    pub final_score: f64,
    pub ranking: u32,
}

impl NormalizedAlternative {
    pub fn normalized(&self, criterion: CriterionId) -> f64 {
        self.normalized_values
            .get(&criterion)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Output of [`SawEngine::calculate`](super::SawEngine::calculate).
///
/// `best_alternative` is `None` (JSON `null`) when no alternatives were
/// supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SawResult {
    pub normalized_alternatives: Vec<NormalizedAlternative>,
    pub best_alternative: Option<NormalizedAlternative>,
    pub criterias: Vec<Criterion>,
}

/// Request body accepted across the JSON boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    pub criterias: Vec<Criterion>,
}
