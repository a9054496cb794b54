use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geometry of the floor-plan canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
  pub width: f64,
  pub height: f64,

  /// Inset on each side, as a fraction of the axis length.
  pub margin: f64,
}

impl Default for CanvasConfig {
  fn default() -> Self {
    Self {
      width: 1600.0,
      height: 900.0,
      margin: 0.1,
    }
  }
}

impl CanvasConfig {
  pub(crate) fn validate(&self) -> Result<(), ConfigError> {
    if !(self.width.is_finite() && self.width > 0.0) {
      return Err(ConfigError::invalid_value("canvas.width", "must be positive"));
    }
    if !(self.height.is_finite() && self.height > 0.0) {
      return Err(ConfigError::invalid_value("canvas.height", "must be positive"));
    }
    if !(0.0..0.5).contains(&self.margin) {
      return Err(ConfigError::invalid_value(
        "canvas.margin",
        "must be in [0, 0.5)",
      ));
    }
    Ok(())
  }
}
