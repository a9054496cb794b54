use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::canvas::CanvasConfig;
use crate::error::ConfigError;
use crate::progress::ProgressConfig;

/// Upload endpoint of a locally running inference service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/upload";

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// URL the video is POSTed to.
  pub endpoint: String,

  /// Whole-request timeout. Processing a video can take minutes.
  pub request_timeout_ms: u64,

  pub progress: ProgressConfig,

  pub canvas: CanvasConfig,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_string(),
      request_timeout_ms: 300_000,
      progress: ProgressConfig::default(),
      canvas: CanvasConfig::default(),
    }
  }
}

impl ClientConfig {
  /// Parse a configuration from JSON text and validate it.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
      field: "config".to_string(),
      message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Check every field, returning the first problem found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.endpoint_url()?;
    if self.request_timeout_ms == 0 {
      return Err(ConfigError::invalid_value(
        "request_timeout_ms",
        "must be greater than zero",
      ));
    }
    self.progress.validate()?;
    self.canvas.validate()?;
    Ok(())
  }

  /// The endpoint as a parsed URL. Only http and https are accepted.
  pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
    let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
      endpoint: self.endpoint.clone(),
      message: e.to_string(),
    })?;

    match url.scheme() {
      "http" | "https" => Ok(url),
      other => Err(ConfigError::InvalidEndpoint {
        endpoint: self.endpoint.clone(),
        message: format!("unsupported scheme '{}'", other),
      }),
    }
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_millis(self.request_timeout_ms)
  }
}
