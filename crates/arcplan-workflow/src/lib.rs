//! ArcPlan Workflow
//!
//! The client-side workflow for turning a room video into a floor plan.
//!
//! ```text
//!            submit (valid video)              upload succeeded
//!   Upload ─────────────────────────► Processing ─────────────────► Results
//!     ▲  ▲                                │                            │
//!     │  └──────── upload failed ─────────┘                            │
//!     └─────────────────────────── reset ──────────────────────────────┘
//! ```
//!
//! [`WorkflowController`] owns the single [`WorkflowState`] and is the only
//! thing that changes it, always through [`WorkflowState::next`]. Each
//! accepted upload opens an episode: one upload task and one cosmetic
//! [`ProgressPresenter`] task, both tied to the episode's cancellation token.
//! The network response alone decides when `Processing` ends; the presenter
//! only emits [`WorkflowEvent`]s.
//!
//! # Usage
//!
//! ```ignore
//! let client = Arc::new(HttpInferenceClient::from_config(&config)?);
//! let mut controller = WorkflowController::new(client, config.progress.clone());
//!
//! controller.submit(vec![candidate])?;   // now Processing
//! match controller.settle().await {
//!   WorkflowState::Results { result, .. } => { /* render result.items */ }
//!   WorkflowState::Upload { failure, .. } => { /* show failure */ }
//!   WorkflowState::Processing { .. } => unreachable!(),
//! }
//! controller.reset();
//! ```

mod controller;
mod episode;
mod error;
mod events;
mod progress;
mod state;

pub use controller::{EpisodeOutcome, WorkflowController};
pub use episode::EpisodeId;
pub use error::{SubmitError, TransitionError};
pub use events::{ChannelNotifier, NoopNotifier, WorkflowEvent, WorkflowNotifier};
pub use progress::{ProgressPhase, ProgressPresenter, ProgressSchedule};
pub use state::{
  BlueprintResult, FailureKind, NETWORK_FAILURE_MESSAGE, StateKind, Transition, UploadFailure,
  WorkflowState,
};
