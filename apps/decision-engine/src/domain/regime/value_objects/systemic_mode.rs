//! Macro risk regime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Regime classification, from calm to capital preservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemicMode {
    /// Business as usual.
    Normal,
    /// Elevated stress; sizing may shrink.
    Stressed,
    /// Close to rupture; no new entries.
    PreSystemic,
    /// Rupture; flatten everything.
    Systemic,
    /// Post-flatten lock held until stress subsides.
    Standby,
}

impl SystemicMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Stressed => "STRESSED",
            Self::PreSystemic => "PRE_SYSTEMIC",
            Self::Systemic => "SYSTEMIC",
            Self::Standby => "STANDBY",
        }
    }

    /// Whether leaving this mode for `NORMAL` starts a recovery ramp.
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Systemic | Self::Standby)
    }
}

impl fmt::Display for SystemicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of the macro inputs for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroSourceType {
    /// Live market feed.
    Live,
    /// Operator- or test-injected values.
    Injected,
    /// Recorded frames replayed in order.
    Replay,
}

impl MacroSourceType {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Injected => "injected",
            Self::Replay => "replay",
        }
    }

    /// Whether inputs were injected rather than observed.
    #[must_use]
    pub const fn is_injected(self) -> bool {
        matches!(self, Self::Injected)
    }
}

impl fmt::Display for MacroSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_modes() {
        assert!(SystemicMode::Systemic.is_suppressed());
        assert!(SystemicMode::Standby.is_suppressed());
        assert!(!SystemicMode::PreSystemic.is_suppressed());
        assert!(!SystemicMode::Normal.is_suppressed());
    }

    #[test]
    fn mode_wire_names() {
        assert_eq!(serde_json::to_string(&SystemicMode::PreSystemic).unwrap(), "\"PRE_SYSTEMIC\"");
        assert_eq!(SystemicMode::Standby.to_string(), "STANDBY");
    }

    #[test]
    fn source_type_wire_names() {
        assert_eq!(serde_json::to_string(&MacroSourceType::Replay).unwrap(), "\"replay\"");
        assert!(MacroSourceType::Injected.is_injected());
        assert!(!MacroSourceType::Live.is_injected());
    }
}
