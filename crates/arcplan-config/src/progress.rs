use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stage labels shown while a video is being processed.
pub const DEFAULT_STAGES: [&str; 4] = [
  "Analyzing room path...",
  "Detecting wall elements...",
  "Identifying outlets and fixtures...",
  "Assembling final plan...",
];

/// Cadence of the cosmetic progress sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
  /// Ordered stage labels.
  pub stages: Vec<String>,

  /// Time each stage stays current.
  pub step_ms: u64,

  /// Extra delay after the last stage before signalling completion.
  pub completion_delay_ms: u64,
}

impl Default for ProgressConfig {
  fn default() -> Self {
    Self {
      stages: DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
      step_ms: 2000,
      completion_delay_ms: 1000,
    }
  }
}

impl ProgressConfig {
  pub(crate) fn validate(&self) -> Result<(), ConfigError> {
    if self.stages.is_empty() {
      return Err(ConfigError::invalid_value(
        "progress.stages",
        "at least one stage is required",
      ));
    }
    if self.step_ms == 0 {
      return Err(ConfigError::invalid_value(
        "progress.step_ms",
        "must be greater than zero",
      ));
    }
    Ok(())
  }
}
