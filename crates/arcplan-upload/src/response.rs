use arcplan_blueprint::UploadResponse;

use crate::error::UploadError;

/// Decide the outcome of an upload from the HTTP status and body.
///
/// Any 2xx status is a success, whatever the body looks like. Any other
/// status is a failure carrying the body's `error` string when present.
pub fn interpret_response(status: u16, body: &str) -> Result<UploadResponse, UploadError> {
  if (200..300).contains(&status) {
    return Ok(UploadResponse::from_body(body));
  }

  let message = serde_json::from_str::<serde_json::Value>(body)
    .ok()
    .and_then(|value| {
      value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
    })
    .filter(|message| !message.trim().is_empty())
    .unwrap_or_else(|| format!("upload failed with status {}", status));

  Err(UploadError::Server { status, message })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_success_with_blueprint() {
    let response = interpret_response(
      200,
      r#"{"filename": "room.mp4", "blueprint": [{"name": "chair", "x": 0.2, "y": 0.3}]}"#,
    )
    .unwrap();
    assert_eq!(response.blueprint.len(), 1);
    assert_eq!(response.filename.as_deref(), Some("room.mp4"));
  }

  #[test]
  fn test_success_without_blueprint() {
    let response = interpret_response(201, r#"{"message": "ok"}"#).unwrap();
    assert!(response.blueprint.is_empty());
  }

  #[test]
  fn test_success_with_garbage_body() {
    let response = interpret_response(200, "not json").unwrap();
    assert!(response.blueprint.is_empty());
  }

  #[test]
  fn test_server_error_message_verbatim() {
    let err = interpret_response(500, r#"{"error": "model timeout"}"#).unwrap_err();
    match err {
      UploadError::Server { status, message } => {
        assert_eq!(status, 500);
        assert_eq!(message, "model timeout");
      }
      other => panic!("expected Server error, got {:?}", other),
    }
  }

  #[test]
  fn test_failure_without_error_field() {
    let err = interpret_response(400, r#"{"detail": "nope"}"#).unwrap_err();
    assert!(matches!(
      err,
      UploadError::Server { status: 400, ref message } if message == "upload failed with status 400"
    ));
  }

  #[test]
  fn test_failure_with_non_json_body() {
    let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(
      err,
      UploadError::Server { status: 502, ref message } if message == "upload failed with status 502"
    ));
  }

  #[test]
  fn test_failure_with_blueprint_is_still_failure() {
    let result = interpret_response(
      404,
      r#"{"blueprint": [{"name": "chair", "x": 0.2, "y": 0.3}]}"#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_redirect_status_is_failure() {
    assert!(interpret_response(302, "").is_err());
  }
}
