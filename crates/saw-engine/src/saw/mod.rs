//! Simple Additive Weighting: per-criterion normalization, weighted scoring
//! and ranking of housing alternatives.

mod config;
pub mod domain;
mod engine;
pub mod format;
pub mod normalizer;
pub mod ranker;
pub mod sample;
pub mod scorer;

pub use config::{EngineConfig, MissingValuePolicy, DEFAULT_WEIGHT_TOLERANCE};
pub use domain::{
    Alternative, AlternativeId, AlternativeValue, CalculationRequest, Criterion, CriterionId,
    NormalizedAlternative, Polarity, SawResult,
};
pub use engine::{calculate, check_weight_total, SawEngine, ValidationError};
pub use scorer::CriterionIndex;
