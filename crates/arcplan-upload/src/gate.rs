//! Upload gate: single-file video validation.

use std::path::Path;

use bytes::Bytes;

use crate::error::GateRejection;
use crate::media::media_type_for_path;

const VIDEO_PREFIX: &str = "video/";

/// A file offered by the user, before validation.
#[derive(Debug, Clone)]
pub struct CandidateFile {
  pub file_name: String,

  /// Declared media type, e.g. "video/mp4".
  pub media_type: Option<String>,

  pub contents: Bytes,
}

impl CandidateFile {
  pub fn new(
    file_name: impl Into<String>,
    media_type: Option<String>,
    contents: impl Into<Bytes>,
  ) -> Self {
    Self {
      file_name: file_name.into(),
      media_type,
      contents: contents.into(),
    }
  }

  /// Read a candidate from disk.
  ///
  /// The declared type is `media_type` when given, otherwise it is derived
  /// from the file extension.
  pub async fn from_path(path: &Path, media_type: Option<String>) -> std::io::Result<Self> {
    let contents = tokio::fs::read(path).await?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type.or_else(|| media_type_for_path(path).map(str::to_string));

    Ok(Self::new(file_name, media_type, contents))
  }
}

/// A file that passed the gate. Only [`accept_files`] constructs one.
#[derive(Debug, Clone)]
pub struct VideoFile {
  file_name: String,
  media_type: String,
  contents: Bytes,
}

impl VideoFile {
  pub fn file_name(&self) -> &str {
    &self.file_name
  }

  pub fn media_type(&self) -> &str {
    &self.media_type
  }

  /// Raw file bytes. Cloning is cheap.
  pub fn contents(&self) -> &Bytes {
    &self.contents
  }

  pub fn len(&self) -> usize {
    self.contents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.contents.is_empty()
  }
}

/// Validate a selection: exactly one file with a `video/*` media type.
pub fn accept_files(mut files: Vec<CandidateFile>) -> Result<VideoFile, GateRejection> {
  if files.len() > 1 {
    return Err(GateRejection::TooManyFiles { count: files.len() });
  }
  let file = files.pop().ok_or(GateRejection::NoFile)?;

  match file.media_type.as_deref() {
    Some(media_type) if is_video(media_type) => Ok(VideoFile {
      file_name: file.file_name,
      media_type: media_type.to_string(),
      contents: file.contents,
    }),
    _ => Err(GateRejection::UnsupportedType {
      file_name: file.file_name,
      media_type: file.media_type,
    }),
  }
}

/// Declared type begins with `video/`, ignoring case. Parameters are allowed.
fn is_video(media_type: &str) -> bool {
  media_type
    .get(..VIDEO_PREFIX.len())
    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(VIDEO_PREFIX))
}
