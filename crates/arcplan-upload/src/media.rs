use std::path::Path;

/// Extension to media type table for files read from disk.
///
/// Non-video entries are listed so that common mistakes are rejected for
/// their type rather than for having no type at all.
const EXTENSIONS: &[(&str, &str)] = &[
  ("mp4", "video/mp4"),
  ("m4v", "video/x-m4v"),
  ("mov", "video/quicktime"),
  ("avi", "video/x-msvideo"),
  ("mkv", "video/x-matroska"),
  ("webm", "video/webm"),
  ("mpeg", "video/mpeg"),
  ("mpg", "video/mpeg"),
  ("3gp", "video/3gpp"),
  ("jpg", "image/jpeg"),
  ("jpeg", "image/jpeg"),
  ("png", "image/png"),
  ("gif", "image/gif"),
  ("mp3", "audio/mpeg"),
  ("wav", "audio/wav"),
  ("txt", "text/plain"),
  ("json", "application/json"),
  ("pdf", "application/pdf"),
];

/// Guess the media type of a file from its extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
  let ext = path.extension()?.to_str()?.to_ascii_lowercase();
  EXTENSIONS
    .iter()
    .find(|(e, _)| *e == ext)
    .map(|(_, media_type)| *media_type)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_video_extensions() {
    assert_eq!(media_type_for_path(Path::new("room.mp4")), Some("video/mp4"));
    assert_eq!(
      media_type_for_path(Path::new("/tmp/Room.MOV")),
      Some("video/quicktime")
    );
    assert_eq!(
      media_type_for_path(Path::new("clip.avi")),
      Some("video/x-msvideo")
    );
  }

  #[test]
  fn test_non_video_extension() {
    assert_eq!(media_type_for_path(Path::new("plan.png")), Some("image/png"));
  }

  #[test]
  fn test_unknown_or_missing_extension() {
    assert_eq!(media_type_for_path(Path::new("video.xyz")), None);
    assert_eq!(media_type_for_path(Path::new("README")), None);
  }
}
