//! Calculation history: snapshots of every accepted SAW run, the service
//! that records them, and the HTTP routes exposing both.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{
    HistoryError, HistoryId, HistoryRecord, HistoryRepository, HistorySnapshot,
    InMemoryHistoryRepository,
};
pub use router::saw_router;
pub use service::{CalculationService, CalculationServiceError, RecordedCalculation};
