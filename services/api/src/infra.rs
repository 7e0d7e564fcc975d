use metrics_exporter_prometheus::PrometheusHandle;
use saw_engine::catalog::{
    CatalogService, InMemoryAlternativeRepository, InMemoryCriterionRepository,
};
use saw_engine::config::AppConfig;
use saw_engine::error::AppError;
use saw_engine::history::{CalculationService, InMemoryHistoryRepository};
use saw_engine::saw::{CalculationRequest, SawEngine};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type HistoryBackedService = CalculationService<InMemoryHistoryRepository>;
pub(crate) type MemoryCatalog =
    CatalogService<InMemoryCriterionRepository, InMemoryAlternativeRepository>;

/// Calculation and catalog services over in-process stores.
pub(crate) struct Services {
    pub(crate) calculations: Arc<HistoryBackedService>,
    pub(crate) catalog: Arc<MemoryCatalog>,
}

pub(crate) fn build_services(config: &AppConfig) -> Services {
    let history = Arc::new(InMemoryHistoryRepository::with_capacity(
        config.history.capacity,
    ));
    let history_capacity = history.capacity();
    let calculations = CalculationService::new(SawEngine::new(config.engine), history);
    let engine = *calculations.engine().config();

    info!(
        weight_tolerance = engine.weight_tolerance,
        missing_values = ?engine.missing_values,
        history_capacity,
        "calculation service configured"
    );

    let catalog = CatalogService::new(
        Arc::new(InMemoryCriterionRepository::default()),
        Arc::new(InMemoryAlternativeRepository::default()),
        engine.weight_tolerance,
    );

    Services {
        calculations: Arc::new(calculations),
        catalog: Arc::new(catalog),
    }
}

pub(crate) fn read_request<P: AsRef<Path>>(path: P) -> Result<CalculationRequest, AppError> {
    let file = File::open(path)?;
    let request = serde_json::from_reader(BufReader::new(file))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saw_engine::config::{AppEnvironment, HistoryConfig, ServerConfig, TelemetryConfig};
    use saw_engine::saw::{EngineConfig, MissingValuePolicy};

    fn config(weight_tolerance: f64) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            engine: EngineConfig {
                weight_tolerance,
                missing_values: MissingValuePolicy::Reject,
            },
            history: HistoryConfig { capacity: 3 },
        }
    }

    #[test]
    fn services_follow_engine_config() {
        let services = build_services(&config(0.5));

        let engine = services.calculations.engine().config();
        assert_eq!(engine.weight_tolerance, 0.5);
        assert_eq!(engine.missing_values, MissingValuePolicy::Reject);

        let mut criteria = services.catalog.criteria().expect("seeded");
        criteria[0].weight = 25.4;
        assert!(services.catalog.update_weights(criteria).is_ok());
    }
}
