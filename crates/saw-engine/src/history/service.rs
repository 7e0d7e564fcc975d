use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::repository::{HistoryError, HistoryId, HistoryRecord, HistoryRepository, HistorySnapshot};
use crate::saw::{CalculationRequest, SawEngine, SawResult, ValidationError};
use crate::validation::{self, InputError};

/// Service composing the SAW engine with the history repository.
pub struct CalculationService<R> {
    engine: SawEngine,
    history: Arc<R>,
}

/// Calculation result returned to callers together with its history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedCalculation {
    #[serde(flatten)]
    pub result: SawResult,
    pub history_id: HistoryId,
}

impl<R> CalculationService<R>
where
    R: HistoryRepository + 'static,
{
    pub fn new(engine: SawEngine, history: Arc<R>) -> Self {
        Self { engine, history }
    }

    pub fn engine(&self) -> &SawEngine {
        &self.engine
    }

    /// Run a calculation and snapshot the accepted result into history.
    /// Rejected input is never recorded: a weight outside 0..=100 fails here
    /// even when the total is 100.
    pub fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<RecordedCalculation, CalculationServiceError> {
        validation::check_calculation(&request)?;
        let result = self
            .engine
            .calculate(&request.alternatives, &request.criterias)?;
        let record = self.history.insert(HistorySnapshot::new(result.clone()))?;

        info!(
            history_id = %record.id,
            alternatives = result.normalized_alternatives.len(),
            best = record.alternatif_terbaik.as_deref().unwrap_or("-"),
            "saw calculation recorded"
        );

        Ok(RecordedCalculation {
            result,
            history_id: record.id,
        })
    }

    pub fn history(&self) -> Result<Vec<HistoryRecord>, CalculationServiceError> {
        Ok(self.history.list()?)
    }

    pub fn history_entry(&self, id: HistoryId) -> Result<HistoryRecord, CalculationServiceError> {
        let record = self.history.fetch(id)?.ok_or(HistoryError::NotFound(id))?;
        Ok(record)
    }

    pub fn delete_history(&self, id: HistoryId) -> Result<(), CalculationServiceError> {
        self.history.delete(id)?;
        info!(history_id = %id, "history record deleted");
        Ok(())
    }
}

/// Error raised by the calculation service.
#[derive(Debug, thiserror::Error)]
pub enum CalculationServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::InMemoryHistoryRepository;
    use crate::saw::{Alternative, Criterion, EngineConfig, Polarity};

    struct OfflineHistory;

    impl HistoryRepository for OfflineHistory {
        fn insert(&self, _snapshot: HistorySnapshot) -> Result<HistoryRecord, HistoryError> {
            Err(HistoryError::Unavailable("database offline".to_string()))
        }

        fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
            Err(HistoryError::Unavailable("database offline".to_string()))
        }

        fn fetch(&self, _id: HistoryId) -> Result<Option<HistoryRecord>, HistoryError> {
            Err(HistoryError::Unavailable("database offline".to_string()))
        }

        fn delete(&self, _id: HistoryId) -> Result<(), HistoryError> {
            Err(HistoryError::Unavailable("database offline".to_string()))
        }
    }

    fn request(weight: f64) -> CalculationRequest {
        CalculationRequest {
            alternatives: vec![
                Alternative::new(1, "Griya Asri", "Bandung").with_value(1, 7.0),
                Alternative::new(2, "Grand Wisata", "Bekasi").with_value(1, 6.0),
            ],
            criterias: vec![Criterion::new(1, "Transportasi", weight, Polarity::Benefit)],
        }
    }

    fn service() -> (
        CalculationService<InMemoryHistoryRepository>,
        Arc<InMemoryHistoryRepository>,
    ) {
        let repository = Arc::new(InMemoryHistoryRepository::default());
        let service = CalculationService::new(
            SawEngine::new(EngineConfig::default()),
            Arc::clone(&repository),
        );
        (service, repository)
    }

    #[test]
    fn calculation_is_recorded() {
        let (service, repository) = service();

        let recorded = service.calculate(request(100.0)).expect("calculates");

        let stored = repository
            .fetch(recorded.history_id)
            .expect("fetch")
            .expect("record stored");
        assert_eq!(stored.hasil, recorded.result);
        assert_eq!(stored.alternatif_terbaik.as_deref(), Some("Griya Asri"));
    }

    #[test]
    fn rejected_calculation_is_not_recorded() {
        let (service, repository) = service();

        let err = service.calculate(request(80.0)).expect_err("rejected");

        assert!(matches!(err, CalculationServiceError::Validation(_)));
        assert!(repository.list().expect("list").is_empty());
    }

    #[test]
    fn weights_outside_percentage_range_are_not_recorded() {
        let (service, repository) = service();
        let mut request = request(150.0);
        request
            .criterias
            .push(Criterion::new(2, "Jarak", -50.0, Polarity::Cost));

        let err = service.calculate(request).expect_err("rejected");

        assert!(matches!(
            err,
            CalculationServiceError::Input(InputError::WeightOutOfRange { .. })
        ));
        assert!(repository.list().expect("list").is_empty());
    }

    #[test]
    fn history_entry_reports_missing_id() {
        let (service, _) = service();

        match service.history_entry(HistoryId(9)) {
            Err(CalculationServiceError::History(HistoryError::NotFound(id))) => {
                assert_eq!(id, HistoryId(9))
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn repository_failure_surfaces_as_history_error() {
        let service = CalculationService::new(SawEngine::default(), Arc::new(OfflineHistory));

        let err = service.calculate(request(100.0)).expect_err("store offline");

        assert!(matches!(
            err,
            CalculationServiceError::History(HistoryError::Unavailable(_))
        ));
    }

    #[test]
    fn recorded_calculation_flattens_result() {
        let (service, _) = service();
        let recorded = service.calculate(request(100.0)).expect("calculates");

        let json = serde_json::to_value(&recorded).expect("serializes");

        assert_eq!(json["historyId"], serde_json::json!(1));
        assert!(json["normalizedAlternatives"].is_array());
        assert_eq!(json["bestAlternative"]["ranking"], serde_json::json!(1));
    }
}
