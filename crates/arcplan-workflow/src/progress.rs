//! Cosmetic progress sequence for the processing screen.
//!
//! Stage `i` is current during `[i * step, (i + 1) * step)`. The last stage
//! stays current for one more `completion_delay`, after which the sequence
//! is complete. Completion is only an event: the workflow leaves
//! `Processing` when the upload resolves, not when the animation ends.

use std::sync::Arc;
use std::time::Duration;

use arcplan_config::ProgressConfig;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::episode::EpisodeId;
use crate::events::{WorkflowEvent, WorkflowNotifier};

/// Where the sequence is at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
  Stage { index: usize },
  Complete,
}

/// Stage labels and timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSchedule {
  stages: Vec<String>,
  step: Duration,
  completion_delay: Duration,
}

impl ProgressSchedule {
  pub fn new(stages: Vec<String>, step: Duration, completion_delay: Duration) -> Self {
    Self {
      stages,
      step,
      completion_delay,
    }
  }

  pub fn from_config(config: &ProgressConfig) -> Self {
    Self::new(
      config.stages.clone(),
      Duration::from_millis(config.step_ms),
      Duration::from_millis(config.completion_delay_ms),
    )
  }

  pub fn stages(&self) -> &[String] {
    &self.stages
  }

  /// Time from start until completion is signalled.
  pub fn total_duration(&self) -> Duration {
    self.step * self.stages.len() as u32 + self.completion_delay
  }

  /// Offset at which stage `index` becomes current.
  fn stage_start(&self, index: usize) -> Duration {
    self.step * index as u32
  }

  pub fn phase_at(&self, elapsed: Duration) -> ProgressPhase {
    if self.stages.is_empty() || elapsed >= self.total_duration() {
      return ProgressPhase::Complete;
    }
    let index = if self.step.is_zero() {
      self.stages.len() - 1
    } else {
      let steps = (elapsed.as_nanos() / self.step.as_nanos()) as usize;
      steps.min(self.stages.len() - 1)
    };
    ProgressPhase::Stage { index }
  }
}

/// Runs a [`ProgressSchedule`] for one episode, emitting events.
#[derive(Debug, Clone)]
pub struct ProgressPresenter {
  schedule: ProgressSchedule,
}

impl ProgressPresenter {
  pub fn new(schedule: ProgressSchedule) -> Self {
    Self { schedule }
  }

  /// Emit each stage on schedule, then `AnimationComplete`.
  ///
  /// Returns `false` if `cancel` fired first, in which case nothing more is
  /// emitted.
  pub async fn run<N: WorkflowNotifier + ?Sized>(
    self,
    episode: EpisodeId,
    cancel: CancellationToken,
    notifier: Arc<N>,
  ) -> bool {
    let start = Instant::now();
    let total = self.schedule.stages.len();

    for (index, label) in self.schedule.stages.iter().enumerate() {
      if !wait_until(start + self.schedule.stage_start(index), &cancel).await {
        debug!(episode = %episode, index, "progress_cancelled");
        return false;
      }
      notifier.notify(WorkflowEvent::StageAdvanced {
        episode,
        index,
        total,
        label: label.clone(),
      });
    }

    if !wait_until(start + self.schedule.total_duration(), &cancel).await {
      debug!(episode = %episode, "progress_cancelled");
      return false;
    }
    notifier.notify(WorkflowEvent::AnimationComplete { episode });
    true
  }
}

/// Sleep until `deadline`. Returns `false` if cancelled first.
async fn wait_until(deadline: Instant, cancel: &CancellationToken) -> bool {
  if cancel.is_cancelled() {
    return false;
  }
  tokio::select! {
    _ = cancel.cancelled() => false,
    _ = sleep_until(deadline) => true,
  }
}
