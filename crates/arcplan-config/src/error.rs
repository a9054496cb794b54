/// Errors found while validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The endpoint is not a valid URL.
  #[error("invalid endpoint '{endpoint}': {message}")]
  InvalidEndpoint { endpoint: String, message: String },

  /// A field holds a value outside its allowed range.
  #[error("invalid value for '{field}': {message}")]
  InvalidValue { field: String, message: String },
}

impl ConfigError {
  pub(crate) fn invalid_value(field: &str, message: impl Into<String>) -> Self {
    Self::InvalidValue {
      field: field.to_string(),
      message: message.into(),
    }
  }
}
