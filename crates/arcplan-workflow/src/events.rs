//! Workflow events and notifiers.
//!
//! Events let a front end follow the workflow without polling: progress
//! stages for the processing screen, the outcome of each episode, resets.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::episode::EpisodeId;
use crate::state::FailureKind;

/// Events emitted by the controller and its presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
  /// A file was accepted and its upload started.
  EpisodeStarted {
    episode: EpisodeId,
    file_name: String,
  },

  /// The progress presenter moved to a new stage.
  StageAdvanced {
    episode: EpisodeId,
    index: usize,
    total: usize,
    label: String,
  },

  /// The progress presenter finished its sequence. Purely cosmetic.
  AnimationComplete { episode: EpisodeId },

  /// The upload succeeded and the results screen is active.
  ResultsReady { episode: EpisodeId, items: usize },

  /// The upload failed and the upload screen shows `message`.
  EpisodeFailed {
    episode: EpisodeId,
    kind: FailureKind,
    message: String,
  },

  /// A selection was refused by the upload gate.
  FileRejected { message: String },

  /// The workflow went back to an empty upload screen.
  Reset,
}

/// Receives workflow events.
pub trait WorkflowNotifier: Send + Sync + 'static {
  fn notify(&self, event: WorkflowEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl WorkflowNotifier for NoopNotifier {
  fn notify(&self, _event: WorkflowEvent) {}
}

/// Forwards events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<WorkflowEvent>) -> Self {
    Self { sender }
  }
}

impl WorkflowNotifier for ChannelNotifier {
  fn notify(&self, event: WorkflowEvent) {
    // receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_channel_notifier_forwards() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let notifier = ChannelNotifier::new(tx);

    notifier.notify(WorkflowEvent::Reset);
    assert_eq!(rx.try_recv().unwrap(), WorkflowEvent::Reset);
  }

  #[test]
  fn test_channel_notifier_ignores_closed_receiver() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    ChannelNotifier::new(tx).notify(WorkflowEvent::Reset);
  }
}
