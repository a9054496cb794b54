//! Workflow state and its reducer.

use std::fmt;

use arcplan_blueprint::{BlueprintItem, UploadResponse};
use arcplan_upload::{GateRejection, UploadError};
use serde::{Deserialize, Serialize};

use crate::episode::EpisodeId;
use crate::error::TransitionError;

/// Shown when the service could not be reached at all.
pub const NETWORK_FAILURE_MESSAGE: &str =
  "Could not reach the processing server. Check your connection and try again.";

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
  /// The selected file was refused before upload.
  UnsupportedFile,
  /// The service answered with a non-success status.
  Server { status: u16 },
  /// The request never completed.
  Network,
}

/// A failure shown on the upload screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailure {
  pub kind: FailureKind,
  pub message: String,
}

impl UploadFailure {
  pub fn from_rejection(rejection: &GateRejection) -> Self {
    Self {
      kind: FailureKind::UnsupportedFile,
      message: rejection.user_message(),
    }
  }

  /// Server messages pass through verbatim; network details stay in the log.
  pub fn from_upload_error(error: &UploadError) -> Self {
    match error {
      UploadError::Server { status, message } => Self {
        kind: FailureKind::Server { status: *status },
        message: message.clone(),
      },
      UploadError::Network { .. } => Self {
        kind: FailureKind::Network,
        message: NETWORK_FAILURE_MESSAGE.to_string(),
      },
      UploadError::InvalidMediaType { media_type } => Self {
        kind: FailureKind::UnsupportedFile,
        message: format!("Unsupported file type: '{}' cannot be uploaded.", media_type),
      },
    }
  }
}

/// Detected objects for one successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintResult {
  pub filename: Option<String>,
  pub items: Vec<BlueprintItem>,
}

/// The screen the workflow is on, with the data that screen owns.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
  /// Waiting for a file, possibly showing the last failure.
  Upload { failure: Option<UploadFailure> },

  /// An upload is in flight.
  Processing { episode: EpisodeId, file_name: String },

  /// The service answered; `result` is what gets drawn.
  Results {
    episode: EpisodeId,
    result: BlueprintResult,
  },
}

impl Default for WorkflowState {
  fn default() -> Self {
    WorkflowState::Upload { failure: None }
  }
}

/// Discriminant of [`WorkflowState`], for logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
  Upload,
  Processing,
  Results,
}

impl fmt::Display for StateKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      StateKind::Upload => "upload",
      StateKind::Processing => "processing",
      StateKind::Results => "results",
    };
    f.write_str(name)
  }
}

/// Inputs to [`WorkflowState::next`].
#[derive(Debug)]
pub enum Transition {
  /// A file passed the gate; the upload starts now.
  Begin { episode: EpisodeId, file_name: String },

  /// A file was refused with feedback.
  Reject { failure: UploadFailure },

  /// The episode's upload succeeded.
  Complete {
    episode: EpisodeId,
    response: UploadResponse,
  },

  /// The episode's upload failed.
  Fail {
    episode: EpisodeId,
    failure: UploadFailure,
  },

  /// Back to an empty upload screen.
  Reset,
}

impl Transition {
  fn name(&self) -> &'static str {
    match self {
      Transition::Begin { .. } => "begin",
      Transition::Reject { .. } => "reject",
      Transition::Complete { .. } => "complete",
      Transition::Fail { .. } => "fail",
      Transition::Reset => "reset",
    }
  }
}

impl WorkflowState {
  pub fn kind(&self) -> StateKind {
    match self {
      WorkflowState::Upload { .. } => StateKind::Upload,
      WorkflowState::Processing { .. } => StateKind::Processing,
      WorkflowState::Results { .. } => StateKind::Results,
    }
  }

  /// Detected items. Empty outside `Results`.
  pub fn blueprint_data(&self) -> &[BlueprintItem] {
    match self {
      WorkflowState::Results { result, .. } => &result.items,
      _ => &[],
    }
  }

  pub fn failure(&self) -> Option<&UploadFailure> {
    match self {
      WorkflowState::Upload { failure } => failure.as_ref(),
      _ => None,
    }
  }

  /// The episode in flight, if any.
  pub fn processing_episode(&self) -> Option<EpisodeId> {
    match self {
      WorkflowState::Processing { episode, .. } => Some(*episode),
      _ => None,
    }
  }

  /// Compute the state that follows `transition`.
  ///
  /// `Complete` and `Fail` only apply to the episode currently processing;
  /// anything else is reported as stale.
  pub fn next(&self, transition: Transition) -> Result<WorkflowState, TransitionError> {
    let name = transition.name();

    match (self, transition) {
      (_, Transition::Reset) => Ok(WorkflowState::default()),

      (WorkflowState::Upload { .. }, Transition::Begin { episode, file_name }) => {
        Ok(WorkflowState::Processing { episode, file_name })
      }

      (WorkflowState::Upload { .. }, Transition::Reject { failure }) => Ok(WorkflowState::Upload {
        failure: Some(failure),
      }),

      (
        WorkflowState::Processing {
          episode: current, ..
        },
        Transition::Complete { episode, response },
      ) if *current == episode => Ok(WorkflowState::Results {
        episode,
        result: BlueprintResult {
          filename: response.filename,
          items: response.blueprint,
        },
      }),

      (
        WorkflowState::Processing {
          episode: current, ..
        },
        Transition::Fail { episode, failure },
      ) if *current == episode => Ok(WorkflowState::Upload {
        failure: Some(failure),
      }),

      (_, Transition::Complete { episode, .. } | Transition::Fail { episode, .. }) => {
        Err(TransitionError::StaleEpisode {
          current: self.processing_episode(),
          received: episode,
        })
      }

      _ => Err(TransitionError::Invalid {
        from: self.kind(),
        transition: name,
      }),
    }
  }
}
