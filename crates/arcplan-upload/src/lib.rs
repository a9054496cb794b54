//! ArcPlan Upload
//!
//! The entry side of the workflow: the upload gate that decides whether a
//! user-supplied file may be sent, and the client that sends it to the
//! inference service.
//!
//! The [`InferenceClient`] trait is the seam the workflow controller depends
//! on. [`HttpInferenceClient`] is the production implementation: it POSTs the
//! video as a multipart body with a single `file` part and hands the reply to
//! [`interpret_response`].

mod client;
mod error;
mod gate;
mod media;
mod response;

pub use client::{HttpInferenceClient, InferenceClient};
pub use error::{ClientBuildError, GateRejection, UploadError};
pub use gate::{CandidateFile, VideoFile, accept_files};
pub use media::media_type_for_path;
pub use response::interpret_response;
