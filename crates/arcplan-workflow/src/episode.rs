use std::fmt;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identifies one upload attempt within a controller.
///
/// Ids increase monotonically, so an outcome carrying an id other than the
/// current episode's is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeId(u64);

impl EpisodeId {
  pub fn new(value: u64) -> Self {
    Self(value)
  }

  pub fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for EpisodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Bookkeeping for the episode currently in flight.
#[derive(Debug)]
pub(crate) struct ActiveEpisode {
  pub(crate) id: EpisodeId,
  /// Correlates log lines across the upload and presenter tasks.
  pub(crate) trace_id: Uuid,
  pub(crate) cancel: CancellationToken,
}

impl ActiveEpisode {
  pub(crate) fn new(id: EpisodeId, cancel: CancellationToken) -> Self {
    Self {
      id,
      trace_id: Uuid::new_v4(),
      cancel,
    }
  }

  /// Stop the episode's upload and presenter tasks.
  pub(crate) fn cancel(&self) {
    self.cancel.cancel();
  }
}
