use crate::saw::SawResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub u64);

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unsaved snapshot handed to a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub recorded_at: DateTime<Utc>,
    pub result: SawResult,
}

impl HistorySnapshot {
    pub fn new(result: SawResult) -> Self {
        Self {
            recorded_at: Utc::now(),
            result,
        }
    }
}

/// Persisted calculation with the winning alternative denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: HistoryId,
    pub tanggal: DateTime<Utc>,
    pub hasil: SawResult,
    pub alternatif_terbaik: Option<String>,
}

/// Storage abstraction so the calculation service can be exercised in isolation.
pub trait HistoryRepository: Send + Sync {
    fn insert(&self, snapshot: HistorySnapshot) -> Result<HistoryRecord, HistoryError>;
    /// Records ordered newest first.
    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
    fn fetch(&self, id: HistoryId) -> Result<Option<HistoryRecord>, HistoryError>;
    fn delete(&self, id: HistoryId) -> Result<(), HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history record {0} not found")]
    NotFound(HistoryId),
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct HistoryLog {
    next_id: u64,
    records: VecDeque<HistoryRecord>,
}

/// Bounded in-process history; the oldest record is evicted once
/// `capacity` is reached.
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    capacity: usize,
    log: Arc<Mutex<HistoryLog>>,
}

impl InMemoryHistoryRepository {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            log: Arc::new(Mutex::new(HistoryLog::default())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HistoryLog>, HistoryError> {
        self.log
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::with_capacity(500)
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn insert(&self, snapshot: HistorySnapshot) -> Result<HistoryRecord, HistoryError> {
        let mut log = self.lock()?;
        log.next_id += 1;

        let record = HistoryRecord {
            id: HistoryId(log.next_id),
            tanggal: snapshot.recorded_at,
            alternatif_terbaik: snapshot
                .result
                .best_alternative
                .as_ref()
                .map(|best| best.name.clone()),
            hasil: snapshot.result,
        };

        if log.records.len() >= self.capacity {
            log.records.pop_front();
        }
        log.records.push_back(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let log = self.lock()?;
        let mut records: Vec<HistoryRecord> = log.records.iter().cloned().collect();
        records.sort_by(|left, right| {
            right
                .tanggal
                .cmp(&left.tanggal)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(records)
    }

    fn fetch(&self, id: HistoryId) -> Result<Option<HistoryRecord>, HistoryError> {
        let log = self.lock()?;
        Ok(log.records.iter().find(|record| record.id == id).cloned())
    }

    fn delete(&self, id: HistoryId) -> Result<(), HistoryError> {
        let mut log = self.lock()?;
        let position = log
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        log.records.remove(position);
        Ok(())
    }
}
