//! Workflow error types.

use arcplan_upload::GateRejection;

use crate::episode::EpisodeId;
use crate::state::StateKind;

/// A transition the state machine refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
  /// The transition is not defined for the current state.
  #[error("transition '{transition}' is not allowed from the {from} state")]
  Invalid {
    from: StateKind,
    transition: &'static str,
  },

  /// An upload outcome arrived for an episode that is no longer current.
  #[error("outcome for episode {received} is stale (current: {})", .current.map(|e| e.to_string()).unwrap_or_else(|| "none".to_string()))]
  StaleEpisode {
    current: Option<EpisodeId>,
    received: EpisodeId,
  },
}

/// Errors returned by [`WorkflowController::submit`](crate::WorkflowController::submit).
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
  /// Uploads are only accepted on the upload screen.
  #[error("cannot start an upload from the {state} state")]
  Busy { state: StateKind },

  /// The upload gate refused the selection.
  #[error("file rejected: {0}")]
  Rejected(#[from] GateRejection),

  #[error(transparent)]
  Transition(#[from] TransitionError),
}
