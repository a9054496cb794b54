use arcplan_config::ConfigError;

/// Reasons the upload gate refuses a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
  /// Nothing was selected.
  #[error("no file selected")]
  NoFile,

  /// More than one file was selected.
  #[error("expected a single file, got {count}")]
  TooManyFiles { count: usize },

  /// The file does not declare a video media type.
  #[error("unsupported file type for '{file_name}': {}", .media_type.as_deref().unwrap_or("unknown"))]
  UnsupportedType {
    file_name: String,
    media_type: Option<String>,
  },
}

impl GateRejection {
  /// Whether the rejection should be reported to the user.
  ///
  /// An empty selection is a dismissed picker, not a mistake.
  pub fn is_silent(&self) -> bool {
    matches!(self, GateRejection::NoFile)
  }

  /// Message shown on the upload screen.
  pub fn user_message(&self) -> String {
    match self {
      GateRejection::NoFile => String::new(),
      GateRejection::TooManyFiles { .. } => {
        "Please choose a single video file.".to_string()
      }
      GateRejection::UnsupportedType { file_name, .. } => format!(
        "Unsupported file type: '{}' is not a video. Supported formats: MP4, MOV, AVI.",
        file_name
      ),
    }
  }
}

/// Errors from a single upload exchange.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
  /// The service answered with a non-success status.
  #[error("server returned status {status}: {message}")]
  Server { status: u16, message: String },

  /// The request could not be completed (connect, DNS, timeout, body read).
  #[error("network error: {message}")]
  Network { message: String },

  /// The declared media type could not be sent as a part header.
  #[error("invalid media type '{media_type}'")]
  InvalidMediaType { media_type: String },
}

impl From<reqwest::Error> for UploadError {
  fn from(e: reqwest::Error) -> Self {
    UploadError::Network {
      message: e.to_string(),
    }
  }
}

/// Errors constructing an [`HttpInferenceClient`](crate::HttpInferenceClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("failed to build http client: {0}")]
  Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_only_empty_selection_is_silent() {
    assert!(GateRejection::NoFile.is_silent());
    assert!(!GateRejection::TooManyFiles { count: 2 }.is_silent());
    assert!(
      !GateRejection::UnsupportedType {
        file_name: "notes.txt".to_string(),
        media_type: Some("text/plain".to_string()),
      }
      .is_silent()
    );
  }

  #[test]
  fn test_unsupported_message_names_file() {
    let rejection = GateRejection::UnsupportedType {
      file_name: "notes.txt".to_string(),
      media_type: None,
    };
    assert!(rejection.user_message().contains("notes.txt"));
    assert_eq!(
      rejection.to_string(),
      "unsupported file type for 'notes.txt': unknown"
    );
  }
}
