//! Regime domain events.

use serde::{Deserialize, Serialize};

use super::value_objects::{MacroSourceType, SystemicMode};
use crate::domain::shared::Timestamp;

/// Audit record of one actual regime change. Appended, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeTransitionEvent {
    /// When the transition happened.
    pub timestamp: Timestamp,
    /// Regime before the cycle.
    pub previous_regime: SystemicMode,
    /// Regime after the cycle.
    pub new_regime: SystemicMode,
    /// Composite score that cycle.
    pub composite_score: f64,
    /// Whether a hard interrupt fired.
    pub hard_interrupt: bool,
    /// Whether the monitor blocked new entries.
    pub block_new_entries: bool,
    /// Whether the new regime is the post-flatten lock.
    pub hysteresis_locked: bool,
    /// Provenance of the macro inputs.
    pub macro_source_type: MacroSourceType,
    /// Whether the inputs were injected rather than observed.
    pub injected_mode: bool,
}
