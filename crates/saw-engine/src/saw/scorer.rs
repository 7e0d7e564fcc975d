use super::domain::{Criterion, CriterionId, Polarity};
use std::collections::BTreeMap;
use tracing::warn;

/// Per-calculation lookup from criterion id to its weight and polarity.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionIndex {
    entries: BTreeMap<CriterionId, IndexedCriterion>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedCriterion {
    /// Weight as a fraction, i.e. percentage points divided by 100.
    pub weight: f64,
    pub polarity: Polarity,
}

impl CriterionIndex {
    /// Resolve the criterion set once. A repeated id accumulates its weight
    /// into the first entry and keeps the first polarity.
    pub fn build(criteria: &[Criterion]) -> Self {
        let mut entries: BTreeMap<CriterionId, IndexedCriterion> = BTreeMap::new();

        for criterion in criteria {
            let weight = criterion.weight / 100.0;
            match entries.get_mut(&criterion.id) {
                Some(existing) => {
                    warn!(criterion = %criterion.id, "duplicate criterion id; merging weight");
                    existing.weight += weight;
                }
                None => {
                    entries.insert(
                        criterion.id,
                        IndexedCriterion {
                            weight,
                            polarity: criterion.polarity,
                        },
                    );
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, id: CriterionId) -> Option<&IndexedCriterion> {
        self.entries.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = CriterionId> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Weighted sum of `normalized` values. Criteria absent from the map
    /// contribute nothing; ids unknown to the index are ignored.
    pub fn final_score(&self, normalized: &BTreeMap<CriterionId, f64>) -> f64 {
        self.entries
            .iter()
            .map(|(id, entry)| normalized.get(id).copied().unwrap_or(0.0) * entry.weight)
            .sum()
    }
}
