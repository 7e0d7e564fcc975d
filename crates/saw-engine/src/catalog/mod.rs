//! Stored criteria and alternatives: repositories, the management service
//! and its HTTP routes, including a calculation over the stored set.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{
    AlternativeDraft, AlternativeRepository, CatalogError, CriterionDraft, CriterionRepository,
    InMemoryAlternativeRepository, InMemoryCriterionRepository,
};
pub use router::catalog_router;
pub use service::{CatalogService, CatalogServiceError, SyncSummary, ValueEntry, ValueFilter};
