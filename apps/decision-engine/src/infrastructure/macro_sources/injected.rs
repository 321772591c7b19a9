//! Operator-injected macro frame.

use crate::application::ports::{MacroSource, MacroSourceError};
use crate::domain::regime::{MacroSourceType, SystemicInputs};

/// Returns the same validated frame every cycle until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectedMacroSource {
    frame: SystemicInputs,
}

impl InjectedMacroSource {
    /// Create a source.
    ///
    /// # Errors
    ///
    /// Returns [`MacroSourceError::InvalidFrame`] if any reading is not a
    /// finite number in [0, 1].
    pub fn new(frame: SystemicInputs) -> Result<Self, MacroSourceError> {
        validate(&frame)?;
        Ok(Self { frame })
    }

    /// Parse a full JSON payload. All five fields are required.
    ///
    /// # Errors
    ///
    /// Returns [`MacroSourceError::InvalidFrame`] on malformed or incomplete
    /// JSON, or out-of-range readings.
    pub fn from_json(payload: &str) -> Result<Self, MacroSourceError> {
        let frame: SystemicInputs =
            serde_json::from_str(payload).map_err(|e| MacroSourceError::InvalidFrame {
                message: e.to_string(),
            })?;
        Self::new(frame)
    }

    /// Replace the frame.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]; the current frame is kept on error.
    pub fn set(&mut self, frame: SystemicInputs) -> Result<(), MacroSourceError> {
        validate(&frame)?;
        self.frame = frame;
        Ok(())
    }

    /// Current frame.
    #[must_use]
    pub const fn frame(&self) -> &SystemicInputs {
        &self.frame
    }
}

impl MacroSource for InjectedMacroSource {
    fn collect(&mut self) -> Result<SystemicInputs, MacroSourceError> {
        Ok(self.frame)
    }

    fn source_type(&self) -> MacroSourceType {
        MacroSourceType::Injected
    }
}

pub(super) fn validate(frame: &SystemicInputs) -> Result<(), MacroSourceError> {
    for (name, value) in SystemicInputs::FIELDS.iter().zip(frame.values()) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(MacroSourceError::InvalidFrame {
                message: format!("{name}={value} outside [0, 1]"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_requires_every_field() {
        let err = InjectedMacroSource::from_json(r#"{"drawdown_velocity": 0.2}"#).unwrap_err();
        assert!(matches!(err, MacroSourceError::InvalidFrame { .. }));
    }

    #[test]
    fn from_json_full_payload() {
        let mut source = InjectedMacroSource::from_json(
            r#"{"drawdown_velocity":0.1,"liquidity_stress":0.2,"correlation_spike":0.3,
                "narrative_shock":0.4,"structural_confirmation":0.5}"#,
        )
        .unwrap();
        let frame = source.collect().unwrap();
        assert_eq!(frame.values(), [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(source.source_type(), MacroSourceType::Injected);
    }

    #[test]
    fn rejects_out_of_range() {
        let err = InjectedMacroSource::new(SystemicInputs::new(0.1, 1.2, 0.0, 0.0, 0.0)).unwrap_err();
        assert!(err.to_string().contains("liquidity_stress"));
        assert!(InjectedMacroSource::new(SystemicInputs::uniform(f64::NAN)).is_err());
    }

    #[test]
    fn set_keeps_old_frame_on_error() {
        let mut source = InjectedMacroSource::new(SystemicInputs::uniform(0.3)).unwrap();
        assert!(source.set(SystemicInputs::uniform(-0.1)).is_err());
        assert_eq!(source.frame(), &SystemicInputs::uniform(0.3));
        source.set(SystemicInputs::uniform(0.9)).unwrap();
        assert_eq!(source.collect().unwrap(), SystemicInputs::uniform(0.9));
    }
}
