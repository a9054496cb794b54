//! ArcPlan Config
//!
//! Serializable configuration for the arcplan client. Every field has a
//! default, so an empty JSON object (or no file at all) yields a working
//! client pointed at a local inference service.
//!
//! ```json
//! {
//!   "endpoint": "http://localhost:5000/upload",
//!   "request_timeout_ms": 300000,
//!   "progress": { "step_ms": 2000, "completion_delay_ms": 1000 },
//!   "canvas": { "width": 1600, "height": 900, "margin": 0.1 }
//! }
//! ```

mod canvas;
mod client;
mod error;
mod progress;

pub use canvas::CanvasConfig;
pub use client::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::ConfigError;
pub use progress::{DEFAULT_STAGES, ProgressConfig};
