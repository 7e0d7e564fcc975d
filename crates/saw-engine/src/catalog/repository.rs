use crate::saw::{Alternative, AlternativeId, AlternativeValue, Criterion, CriterionId, Polarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Criterion fields supplied by a caller; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDraft {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "bobot")]
    pub weight: f64,
    #[serde(rename = "tipe")]
    pub polarity: Polarity,
}

impl CriterionDraft {
    pub fn into_criterion(self, id: CriterionId) -> Criterion {
        Criterion {
            id,
            name: self.name,
            weight: self.weight,
            polarity: self.polarity,
        }
    }
}

impl From<Criterion> for CriterionDraft {
    fn from(criterion: Criterion) -> Self {
        Self {
            name: criterion.name,
            weight: criterion.weight,
            polarity: criterion.polarity,
        }
    }
}

/// Alternative fields supplied by a caller, optionally with initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDraft {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "gambar", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub values: Vec<AlternativeValue>,
}

impl AlternativeDraft {
    pub fn into_alternative(self, id: AlternativeId) -> Alternative {
        Alternative {
            id,
            name: self.name,
            location: self.location,
            image: self.image,
            values: self.values,
        }
    }
}

/// Storage for criterion definitions.
pub trait CriterionRepository: Send + Sync {
    /// Criteria ordered by id.
    fn list(&self) -> Result<Vec<Criterion>, CatalogError>;
    fn fetch(&self, id: CriterionId) -> Result<Option<Criterion>, CatalogError>;
    fn insert(&self, draft: CriterionDraft) -> Result<Criterion, CatalogError>;
    /// Replaces an existing criterion; unknown ids are not created.
    fn save(&self, criterion: Criterion) -> Result<Criterion, CatalogError>;
    fn delete(&self, id: CriterionId) -> Result<(), CatalogError>;
}

/// Storage for alternatives together with their raw values.
pub trait AlternativeRepository: Send + Sync {
    /// Alternatives ordered newest first.
    fn list(&self) -> Result<Vec<Alternative>, CatalogError>;
    fn fetch(&self, id: AlternativeId) -> Result<Option<Alternative>, CatalogError>;
    fn insert(&self, draft: AlternativeDraft) -> Result<Alternative, CatalogError>;
    /// Replaces an existing alternative; unknown ids are not created.
    fn save(&self, alternative: Alternative) -> Result<Alternative, CatalogError>;
    fn delete(&self, id: AlternativeId) -> Result<(), CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion {0} not found")]
    CriterionNotFound(CriterionId),
    #[error("alternative {0} not found")]
    AlternativeNotFound(AlternativeId),
    #[error("criterion {0} still has alternative values and cannot be deleted")]
    CriterionInUse(CriterionId),
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

// Rows keyed by a sequential id starting at 1.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>, CatalogError> {
    table
        .lock()
        .map_err(|_| CatalogError::Unavailable("catalog mutex poisoned".to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCriterionRepository {
    table: Arc<Mutex<Table<Criterion>>>,
}

impl CriterionRepository for InMemoryCriterionRepository {
    fn list(&self) -> Result<Vec<Criterion>, CatalogError> {
        Ok(lock(&self.table)?.rows.values().cloned().collect())
    }

    fn fetch(&self, id: CriterionId) -> Result<Option<Criterion>, CatalogError> {
        Ok(lock(&self.table)?.rows.get(&id.0).cloned())
    }

    fn insert(&self, draft: CriterionDraft) -> Result<Criterion, CatalogError> {
        let mut table = lock(&self.table)?;
        let criterion = draft.into_criterion(CriterionId(table.allocate()));
        table.rows.insert(criterion.id.0, criterion.clone());
        Ok(criterion)
    }

    fn save(&self, criterion: Criterion) -> Result<Criterion, CatalogError> {
        let mut table = lock(&self.table)?;
        let slot = table
            .rows
            .get_mut(&criterion.id.0)
            .ok_or(CatalogError::CriterionNotFound(criterion.id))?;
        *slot = criterion.clone();
        Ok(criterion)
    }

    fn delete(&self, id: CriterionId) -> Result<(), CatalogError> {
        lock(&self.table)?
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(CatalogError::CriterionNotFound(id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAlternativeRepository {
    table: Arc<Mutex<Table<Alternative>>>,
}

impl AlternativeRepository for InMemoryAlternativeRepository {
    fn list(&self) -> Result<Vec<Alternative>, CatalogError> {
        Ok(lock(&self.table)?.rows.values().rev().cloned().collect())
    }

    fn fetch(&self, id: AlternativeId) -> Result<Option<Alternative>, CatalogError> {
        Ok(lock(&self.table)?.rows.get(&id.0).cloned())
    }

    fn insert(&self, draft: AlternativeDraft) -> Result<Alternative, CatalogError> {
        let mut table = lock(&self.table)?;
        let alternative = draft.into_alternative(AlternativeId(table.allocate()));
        table.rows.insert(alternative.id.0, alternative.clone());
        Ok(alternative)
    }

    fn save(&self, alternative: Alternative) -> Result<Alternative, CatalogError> {
        let mut table = lock(&self.table)?;
        let slot = table
            .rows
            .get_mut(&alternative.id.0)
            .ok_or(CatalogError::AlternativeNotFound(alternative.id))?;
        *slot = alternative.clone();
        Ok(alternative)
    }

    fn delete(&self, id: AlternativeId) -> Result<(), CatalogError> {
        lock(&self.table)?
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(CatalogError::AlternativeNotFound(id))
    }
}
