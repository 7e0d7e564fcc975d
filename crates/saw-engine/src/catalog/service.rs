use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::repository::{
    AlternativeDraft, AlternativeRepository, CatalogError, CriterionDraft, CriterionRepository,
};
use crate::saw::sample::housing_criteria;
use crate::saw::{
    check_weight_total, Alternative, AlternativeId, AlternativeValue, CalculationRequest,
    Criterion, CriterionId, ValidationError,
};
use crate::validation::{self, InputError};

/// Criteria and alternatives kept between calculations.
pub struct CatalogService<C, A> {
    criteria: Arc<C>,
    alternatives: Arc<A>,
    weight_tolerance: f64,
}

/// One raw value, flattened out of its alternative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    pub alternative_id: AlternativeId,
    pub criteria_id: CriterionId,
    pub nilai: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFilter {
    pub alternative_id: Option<AlternativeId>,
    pub criteria_id: Option<CriterionId>,
}

impl ValueFilter {
    fn matches(&self, entry: &ValueEntry) -> bool {
        self.alternative_id.map_or(true, |id| id == entry.alternative_id)
            && self.criteria_id.map_or(true, |id| id == entry.criteria_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub alternatives: usize,
    pub created: usize,
}

impl<C, A> CatalogService<C, A>
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    pub fn new(criteria: Arc<C>, alternatives: Arc<A>, weight_tolerance: f64) -> Self {
        Self {
            criteria,
            alternatives,
            weight_tolerance,
        }
    }

    /// Criteria ordered by id. An empty store is first seeded with the four
    /// default housing criteria at 25% each.
    pub fn criteria(&self) -> Result<Vec<Criterion>, CatalogServiceError> {
        let existing = self.criteria.list()?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        for criterion in housing_criteria() {
            self.criteria.insert(CriterionDraft::from(criterion))?;
        }
        let seeded = self.criteria.list()?;
        info!(criteria = seeded.len(), "seeded default criteria");
        Ok(seeded)
    }

    pub fn criterion(&self, id: CriterionId) -> Result<Criterion, CatalogServiceError> {
        let criterion = self
            .criteria
            .fetch(id)?
            .ok_or(CatalogError::CriterionNotFound(id))?;
        Ok(criterion)
    }

    pub fn create_criterion(
        &self,
        draft: CriterionDraft,
    ) -> Result<Criterion, CatalogServiceError> {
        check_criterion_draft(&draft)?;
        let criterion = self.criteria.insert(draft)?;
        info!(criterion = %criterion.id, nama = %criterion.name, "criterion created");
        Ok(criterion)
    }

    pub fn update_criterion(
        &self,
        id: CriterionId,
        draft: CriterionDraft,
    ) -> Result<Criterion, CatalogServiceError> {
        check_criterion_draft(&draft)?;
        Ok(self.criteria.save(draft.into_criterion(id))?)
    }

    /// Refused while any alternative still carries a value for the criterion.
    pub fn delete_criterion(&self, id: CriterionId) -> Result<(), CatalogServiceError> {
        self.criterion(id)?;
        let referenced = self
            .alternatives
            .list()?
            .iter()
            .any(|alternative| alternative.value_for(id).is_some());
        if referenced {
            return Err(CatalogError::CriterionInUse(id).into());
        }

        self.criteria.delete(id)?;
        info!(criterion = %id, "criterion deleted");
        Ok(())
    }

    /// Apply new weights by id. The submitted set must total 100 within
    /// the engine tolerance, and every id must exist, before anything is
    /// written. Only weights change.
    pub fn update_weights(
        &self,
        updates: Vec<Criterion>,
    ) -> Result<Vec<Criterion>, CatalogServiceError> {
        for update in &updates {
            validation::check_criterion(update)?;
        }
        check_weight_total(&updates, self.weight_tolerance)?;

        let mut staged = Vec::with_capacity(updates.len());
        for update in &updates {
            let mut criterion = self.criterion(update.id)?;
            criterion.weight = update.weight;
            staged.push(criterion);
        }
        for criterion in staged {
            self.criteria.save(criterion)?;
        }

        info!(criteria = updates.len(), "criterion weights updated");
        Ok(self.criteria.list()?)
    }

    /// Alternatives ordered newest first.
    pub fn alternatives(&self) -> Result<Vec<Alternative>, CatalogServiceError> {
        Ok(self.alternatives.list()?)
    }

    pub fn alternative(&self, id: AlternativeId) -> Result<Alternative, CatalogServiceError> {
        let alternative = self
            .alternatives
            .fetch(id)?
            .ok_or(CatalogError::AlternativeNotFound(id))?;
        Ok(alternative)
    }

    pub fn create_alternative(
        &self,
        draft: AlternativeDraft,
    ) -> Result<Alternative, CatalogServiceError> {
        validation::require_text("nama", &draft.name)?;
        validation::require_text("lokasi", &draft.location)?;
        for value in &draft.values {
            validation::check_value(value.nilai)?;
            self.criterion(value.criteria_id)?;
        }

        let alternative = self.alternatives.insert(draft)?;
        info!(alternative = %alternative.id, nama = %alternative.name, "alternative created");
        Ok(alternative)
    }

    pub fn delete_alternative(&self, id: AlternativeId) -> Result<(), CatalogServiceError> {
        self.alternatives.delete(id)?;
        info!(alternative = %id, "alternative deleted");
        Ok(())
    }

    pub fn values(&self, filter: ValueFilter) -> Result<Vec<ValueEntry>, CatalogServiceError> {
        let mut alternatives = self.alternatives.list()?;
        alternatives.sort_by_key(|alternative| alternative.id);

        Ok(alternatives
            .iter()
            .flat_map(|alternative| {
                alternative.values.iter().map(|value| ValueEntry {
                    alternative_id: alternative.id,
                    criteria_id: value.criteria_id,
                    nilai: value.nilai,
                })
            })
            .filter(|entry| filter.matches(entry))
            .collect())
    }

    /// Insert or overwrite the raw value an alternative holds for a
    /// criterion. Both must exist.
    pub fn assign_value(&self, entry: ValueEntry) -> Result<ValueEntry, CatalogServiceError> {
        validation::check_value(entry.nilai)?;
        self.criterion(entry.criteria_id)?;
        let mut alternative = self.alternative(entry.alternative_id)?;

        match alternative
            .values
            .iter_mut()
            .find(|value| value.criteria_id == entry.criteria_id)
        {
            Some(existing) => existing.nilai = entry.nilai,
            None => alternative.values.push(AlternativeValue {
                criteria_id: entry.criteria_id,
                nilai: entry.nilai,
            }),
        }
        self.alternatives.save(alternative)?;
        Ok(entry)
    }

    /// Give every alternative a 0 for each criterion it has no value for.
    pub fn sync_values(&self) -> Result<SyncSummary, CatalogServiceError> {
        let criteria = self.criteria()?;
        let alternatives = self.alternatives.list()?;
        let mut created = 0;

        for mut alternative in alternatives.iter().cloned() {
            let missing: Vec<CriterionId> = criteria
                .iter()
                .map(|criterion| criterion.id)
                .filter(|id| alternative.value_for(*id).is_none())
                .collect();
            if missing.is_empty() {
                continue;
            }

            created += missing.len();
            alternative
                .values
                .extend(missing.into_iter().map(|criteria_id| AlternativeValue {
                    criteria_id,
                    nilai: 0.0,
                }));
            self.alternatives.save(alternative)?;
        }

        info!(alternatives = alternatives.len(), created, "alternative values synced");
        Ok(SyncSummary {
            alternatives: alternatives.len(),
            created,
        })
    }

    /// Stored criteria and alternatives (oldest first) as engine input.
    pub fn calculation_request(&self) -> Result<CalculationRequest, CatalogServiceError> {
        let criterias = self.criteria()?;
        let mut alternatives = self.alternatives.list()?;
        alternatives.sort_by_key(|alternative| alternative.id);

        Ok(CalculationRequest {
            alternatives,
            criterias,
        })
    }
}

fn check_criterion_draft(draft: &CriterionDraft) -> Result<(), InputError> {
    validation::require_text("nama", &draft.name)?;
    validation::check_weight(&draft.name, draft.weight)
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
