use super::config::{EngineConfig, MissingValuePolicy};
use super::domain::{
    Alternative, AlternativeId, Criterion, CriterionId, NormalizedAlternative, SawResult,
};
use super::normalizer::normalize_column;
use super::ranker::rank;
use super::scorer::CriterionIndex;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Rejected calculation input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("criterion weights must total 100%, current total: {total}%")]
    WeightTotal { total: f64 },
    #[error("alternative {alternative} has no value for criterion {criterion}")]
    MissingValue {
        alternative: AlternativeId,
        criterion: CriterionId,
    },
}

/// Stateless Simple Additive Weighting calculator.
#[derive(Debug, Clone, Default)]
pub struct SawEngine {
    config: EngineConfig,
}

impl SawEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize, score and rank `alternatives` against `criteria`.
    ///
    /// Fails only when the weights do not total 100 within the configured
    /// tolerance, or when [`MissingValuePolicy::Reject`] is active and a
    /// value is absent. Degenerate columns fall back to 0 instead of failing.
    pub fn calculate(
        &self,
        alternatives: &[Alternative],
        criteria: &[Criterion],
    ) -> Result<SawResult, ValidationError> {
        check_weight_total(criteria, self.config.weight_tolerance)?;
        if self.config.missing_values == MissingValuePolicy::Reject {
            check_complete_values(alternatives, criteria)?;
        }

        let index = CriterionIndex::build(criteria);
        let columns = normalize_columns(alternatives, criteria);

        let scored: Vec<NormalizedAlternative> = alternatives
            .iter()
            .enumerate()
            .map(|(row, alternative)| {
                let normalized_values: BTreeMap<CriterionId, f64> = columns
                    .iter()
                    .map(|(id, column)| (*id, column[row]))
                    .collect();
                let final_score = index.final_score(&normalized_values);

                NormalizedAlternative {
                    id: alternative.id,
                    name: alternative.name.clone(),
                    location: alternative.location.clone(),
                    image: alternative.image.clone(),
                    normalized_values,
                    final_score,
                    ranking: 0,
                }
            })
            .collect();

        let ranked = rank(&scored);
        let best_alternative = ranked.first().cloned();

        debug!(
            alternatives = ranked.len(),
            criteria = index.len(),
            best = best_alternative.as_ref().map(|best| best.name.as_str()),
            "saw calculation complete"
        );

        Ok(SawResult {
            normalized_alternatives: ranked,
            best_alternative,
            criterias: criteria.to_vec(),
        })
    }
}

/// Run a calculation with the default engine configuration.
pub fn calculate(
    alternatives: &[Alternative],
    criteria: &[Criterion],
) -> Result<SawResult, ValidationError> {
    SawEngine::default().calculate(alternatives, criteria)
}

/// Sum of weights, rejected when further than `tolerance` from 100. NaN
/// totals are rejected as well.
pub fn check_weight_total(criteria: &[Criterion], tolerance: f64) -> Result<f64, ValidationError> {
    let total: f64 = criteria.iter().map(|criterion| criterion.weight).sum();
    if (total - 100.0).abs() <= tolerance {
        Ok(total)
    } else {
        Err(ValidationError::WeightTotal { total })
    }
}

fn check_complete_values(
    alternatives: &[Alternative],
    criteria: &[Criterion],
) -> Result<(), ValidationError> {
    for alternative in alternatives {
        for criterion in criteria {
            if alternative.value_for(criterion.id).is_none() {
                return Err(ValidationError::MissingValue {
                    alternative: alternative.id,
                    criterion: criterion.id,
                });
            }
        }
    }
    Ok(())
}

// One column per distinct criterion id; the first occurrence decides polarity.
fn normalize_columns(
    alternatives: &[Alternative],
    criteria: &[Criterion],
) -> Vec<(CriterionId, Vec<f64>)> {
    let mut seen = HashSet::new();
    criteria
        .iter()
        .filter(|criterion| seen.insert(criterion.id))
        .map(|criterion| (criterion.id, normalize_column(alternatives, criterion)))
        .collect()
}
