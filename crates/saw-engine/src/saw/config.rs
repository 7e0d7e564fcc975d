use serde::{Deserialize, Serialize};

/// Absolute tolerance applied when checking that weights total 100.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.01;

/// How the engine treats an alternative lacking a value for an active
/// criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Substitute raw 0 and continue.
    #[default]
    TreatAsZero,
    /// Fail the calculation with a validation error.
    Reject,
}

/// Tunables for a [`SawEngine`](super::SawEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weight_tolerance: f64,
    pub missing_values: MissingValuePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            missing_values: MissingValuePolicy::TreatAsZero,
        }
    }
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            missing_values: MissingValuePolicy::Reject,
            ..Self::default()
        }
    }
}
