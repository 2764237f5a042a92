use crate::error::{DndError, Result};
use serde::{Deserialize, Serialize};

/// Drag-and-drop configuration
///
/// The activation constraints are passed through to the host's pointer and
/// touch sensors; the engine itself only reads `persist_card_moves`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    /// Pointer travel in pixels before a mouse drag starts.
    pub pointer_activation_distance: f64,
    /// Press-and-hold time before a touch drag starts.
    pub touch_activation_delay_ms: u64,
    /// Movement in pixels tolerated during the touch hold.
    pub touch_tolerance: f64,
    /// Emit persistence commits for card moves, not only column reorders.
    pub persist_card_moves: bool,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            pointer_activation_distance: 10.0,
            touch_activation_delay_ms: 250,
            touch_tolerance: 5.0,
            persist_card_moves: false,
        }
    }
}

impl DndConfig {
    /// Parses and validates a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_card_persistence(mut self, enabled: bool) -> Self {
        self.persist_card_moves = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pointer_activation_distance", self.pointer_activation_distance),
            ("touch_tolerance", self.touch_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DndError::ConfigError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
