//! Workflow controller.
//!
//! The controller owns the [`WorkflowState`] and the episode in flight. Upload
//! outcomes come back over an internal channel and are applied on the
//! caller's side, so the state is never shared between tasks.

use std::sync::Arc;

use arcplan_blueprint::{BlueprintItem, UploadResponse};
use arcplan_config::ProgressConfig;
use arcplan_upload::{CandidateFile, InferenceClient, UploadError, accept_files};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::episode::{ActiveEpisode, EpisodeId};
use crate::error::SubmitError;
use crate::events::{NoopNotifier, WorkflowEvent, WorkflowNotifier};
use crate::progress::{ProgressPresenter, ProgressSchedule};
use crate::state::{StateKind, Transition, UploadFailure, WorkflowState};

/// The result of one episode's upload.
#[derive(Debug)]
pub struct EpisodeOutcome {
  pub episode: EpisodeId,
  pub result: Result<UploadResponse, UploadError>,
}

/// Drives the upload, processing and results workflow.
///
/// [`submit`](Self::submit) spawns tasks and must be called from within a
/// tokio runtime.
pub struct WorkflowController<N: WorkflowNotifier = NoopNotifier> {
  client: Arc<dyn InferenceClient>,
  notifier: Arc<N>,
  schedule: ProgressSchedule,
  state: WorkflowState,
  active: Option<ActiveEpisode>,
  next_episode: u64,
  /// Parent of every episode token; cancelled when the controller drops.
  root_cancel: CancellationToken,
  outcome_tx: mpsc::UnboundedSender<EpisodeOutcome>,
  outcome_rx: mpsc::UnboundedReceiver<EpisodeOutcome>,
}

impl WorkflowController<NoopNotifier> {
  pub fn new(client: Arc<dyn InferenceClient>, progress: ProgressConfig) -> Self {
    Self::with_notifier(client, progress, NoopNotifier)
  }
}

impl<N: WorkflowNotifier> WorkflowController<N> {
  /// Create a controller that reports [`WorkflowEvent`]s to `notifier`.
  pub fn with_notifier(
    client: Arc<dyn InferenceClient>,
    progress: ProgressConfig,
    notifier: N,
  ) -> Self {
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    Self {
      client,
      notifier: Arc::new(notifier),
      schedule: ProgressSchedule::from_config(&progress),
      state: WorkflowState::default(),
      active: None,
      next_episode: 0,
      root_cancel: CancellationToken::new(),
      outcome_tx,
      outcome_rx,
    }
  }

  pub fn state(&self) -> &WorkflowState {
    &self.state
  }

  /// Items of the current result. Empty outside `Results`.
  pub fn blueprint_data(&self) -> &[BlueprintItem] {
    self.state.blueprint_data()
  }

  pub fn failure(&self) -> Option<&UploadFailure> {
    self.state.failure()
  }

  pub fn active_episode(&self) -> Option<EpisodeId> {
    self.active.as_ref().map(|a| a.id)
  }

  /// Offer a selection to the upload gate and, if it passes, start an
  /// episode.
  ///
  /// On success the state is `Processing` before this returns. A refused
  /// file leaves the workflow on the upload screen with a failure message,
  /// except for an empty selection which changes nothing.
  pub fn submit(&mut self, files: Vec<CandidateFile>) -> Result<EpisodeId, SubmitError> {
    let kind = self.state.kind();
    if kind != StateKind::Upload {
      return Err(SubmitError::Busy { state: kind });
    }

    let video = match accept_files(files) {
      Ok(video) => video,
      Err(rejection) => {
        if !rejection.is_silent() {
          let failure = UploadFailure::from_rejection(&rejection);
          info!(reason = %rejection, "file_rejected");
          self.state = self.state.next(Transition::Reject {
            failure: failure.clone(),
          })?;
          self.notifier.notify(WorkflowEvent::FileRejected {
            message: failure.message,
          });
        }
        return Err(rejection.into());
      }
    };

    let episode = EpisodeId::new(self.next_episode + 1);
    let file_name = video.file_name().to_string();
    self.state = self.state.next(Transition::Begin {
      episode,
      file_name: file_name.clone(),
    })?;
    self.next_episode += 1;

    let active = ActiveEpisode::new(episode, self.root_cancel.child_token());
    let span = info_span!("episode", episode = %episode, trace_id = %active.trace_id);
    span.in_scope(|| info!(file_name = %file_name, bytes = video.len(), "episode_started"));
    self.notifier.notify(WorkflowEvent::EpisodeStarted {
      episode,
      file_name,
    });

    let client = Arc::clone(&self.client);
    let outcome_tx = self.outcome_tx.clone();
    let cancel = active.cancel.clone();
    tokio::spawn(
      async move {
        // an episode aborted before this task first runs never sends a request
        if cancel.is_cancelled() {
          debug!("upload_abandoned");
          return;
        }

        // the request runs in its own task so a panic still resolves the episode
        let mut request =
          tokio::spawn(async move { client.upload(&video).await }.in_current_span());
        let result = tokio::select! {
          biased;
          _ = cancel.cancelled() => {
            request.abort();
            debug!("upload_abandoned");
            return;
          }
          joined = &mut request => joined.unwrap_or_else(|e| {
            error!(error = %e, "upload_task_failed");
            Err(UploadError::Network {
              message: e.to_string(),
            })
          }),
        };
        // controller may already be gone
        let _ = outcome_tx.send(EpisodeOutcome { episode, result });
      }
      .instrument(span.clone()),
    );

    let presenter = ProgressPresenter::new(self.schedule.clone());
    tokio::spawn(
      presenter
        .run(episode, active.cancel.clone(), Arc::clone(&self.notifier))
        .instrument(span),
    );

    self.active = Some(active);
    Ok(episode)
  }

  /// Wait until the episode in flight resolves, then return the state.
  ///
  /// Returns immediately when nothing is processing.
  pub async fn settle(&mut self) -> &WorkflowState {
    while self.active.is_some() {
      match self.outcome_rx.recv().await {
        Some(outcome) => {
          self.apply_outcome(outcome);
        }
        None => break,
      }
    }
    &self.state
  }

  /// Apply any outcomes that have already arrived without waiting.
  ///
  /// Returns `true` if the state changed.
  pub fn poll_outcome(&mut self) -> bool {
    let mut changed = false;
    while let Ok(outcome) = self.outcome_rx.try_recv() {
      changed |= self.apply_outcome(outcome);
    }
    changed
  }

  /// Apply an upload outcome.
  ///
  /// Outcomes for any episode other than the one processing are dropped and
  /// `false` is returned.
  pub fn apply_outcome(&mut self, outcome: EpisodeOutcome) -> bool {
    let EpisodeOutcome { episode, result } = outcome;

    if self.state.processing_episode() != Some(episode) {
      debug!(episode = %episode, state = %self.state.kind(), "stale_outcome_dropped");
      return false;
    }

    let transition = match result {
      Ok(response) => Transition::Complete { episode, response },
      Err(error) => {
        warn!(episode = %episode, error = %error, "upload_failed");
        Transition::Fail {
          episode,
          failure: UploadFailure::from_upload_error(&error),
        }
      }
    };

    match self.state.next(transition) {
      Ok(next) => self.state = next,
      Err(e) => {
        warn!(episode = %episode, error = %e, "outcome_not_applied");
        return false;
      }
    }

    if let Some(active) = self.active.take() {
      // stops the presenter
      active.cancel();
    }

    match &self.state {
      WorkflowState::Results { result, .. } => {
        info!(episode = %episode, items = result.items.len(), "episode_completed");
        self.notifier.notify(WorkflowEvent::ResultsReady {
          episode,
          items: result.items.len(),
        });
      }
      WorkflowState::Upload {
        failure: Some(failure),
      } => {
        self.notifier.notify(WorkflowEvent::EpisodeFailed {
          episode,
          kind: failure.kind,
          message: failure.message.clone(),
        });
      }
      _ => {}
    }
    true
  }

  /// Return to an empty upload screen from any state.
  ///
  /// An episode in flight is cancelled and its outcome will be ignored.
  pub fn reset(&mut self) {
    if let Some(active) = self.active.take() {
      info!(episode = %active.id, trace_id = %active.trace_id, "episode_aborted");
      active.cancel();
    }
    self.state = self
      .state
      .next(Transition::Reset)
      .unwrap_or_default();
    info!("workflow_reset");
    self.notifier.notify(WorkflowEvent::Reset);
  }
}

impl<N: WorkflowNotifier> Drop for WorkflowController<N> {
  fn drop(&mut self) {
    self.root_cancel.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use arcplan_upload::VideoFile;

  struct Unreachable;

  #[async_trait]
  impl InferenceClient for Unreachable {
    async fn upload(&self, _file: &VideoFile) -> Result<UploadResponse, UploadError> {
      Err(UploadError::Network {
        message: "connection refused".to_string(),
      })
    }
  }

  fn controller() -> WorkflowController {
    WorkflowController::new(Arc::new(Unreachable), ProgressConfig::default())
  }

  #[test]
  fn test_new_controller_is_idle() {
    let controller = controller();
    assert_eq!(controller.state(), &WorkflowState::default());
    assert!(controller.active_episode().is_none());
  }

  #[test]
  fn test_stale_outcome_is_ignored_when_idle() {
    let mut controller = controller();
    let applied = controller.apply_outcome(EpisodeOutcome {
      episode: EpisodeId::new(1),
      result: Ok(UploadResponse::default()),
    });
    assert!(!applied);
    assert_eq!(controller.state().kind(), StateKind::Upload);
  }

  #[tokio::test]
  async fn test_settle_without_episode_returns_immediately() {
    let mut controller = controller();
    assert_eq!(controller.settle().await.kind(), StateKind::Upload);
  }
}
