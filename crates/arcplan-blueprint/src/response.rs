use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::item::BlueprintItem;

/// Success payload from the inference service.
///
/// Every field is optional on the wire. A missing `blueprint` means nothing was
/// detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filename: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default)]
  pub blueprint: Vec<BlueprintItem>,
}

impl UploadResponse {
  /// Build a response from an already-decoded JSON body.
  ///
  /// Never fails. A body that is not an object, or a `blueprint` that is not
  /// an array of well-formed items, yields an empty blueprint.
  pub fn from_value(value: serde_json::Value) -> Self {
    let serde_json::Value::Object(mut fields) = value else {
      warn!("success_body_not_object");
      return Self::default();
    };

    let filename = take_string(&mut fields, "filename");
    let message = take_string(&mut fields, "message");

    let blueprint = match fields.remove("blueprint") {
      None | Some(serde_json::Value::Null) => Vec::new(),
      Some(raw) => serde_json::from_value::<Vec<BlueprintItem>>(raw).unwrap_or_else(|e| {
        warn!(error = %e, "blueprint_malformed");
        Vec::new()
      }),
    };

    Self {
      filename,
      message,
      blueprint,
    }
  }

  /// Parse a raw success body. Non-JSON text yields an empty response.
  pub fn from_body(body: &str) -> Self {
    match serde_json::from_str::<serde_json::Value>(body) {
      Ok(value) => Self::from_value(value),
      Err(e) => {
        warn!(error = %e, "success_body_not_json");
        Self::default()
      }
    }
  }
}

fn take_string(
  fields: &mut serde_json::Map<String, serde_json::Value>,
  key: &str,
) -> Option<String> {
  match fields.remove(key) {
    Some(serde_json::Value::String(s)) => Some(s),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_full_response() {
    let response = UploadResponse::from_value(json!({
      "filename": "room.mp4",
      "blueprint": [
        {"name": "chair", "x": 0.2, "y": 0.3},
        {"name": "tv", "x": 0.8, "y": 0.1}
      ]
    }));

    assert_eq!(response.filename.as_deref(), Some("room.mp4"));
    assert_eq!(response.blueprint.len(), 2);
    assert_eq!(response.blueprint[1].name, "tv");
  }

  #[test]
  fn test_missing_blueprint_is_empty() {
    let response = UploadResponse::from_value(json!({
      "message": "File processed successfully"
    }));
    assert!(response.blueprint.is_empty());
    assert_eq!(
      response.message.as_deref(),
      Some("File processed successfully")
    );
  }

  #[test]
  fn test_null_blueprint_is_empty() {
    let response = UploadResponse::from_value(json!({"blueprint": null}));
    assert!(response.blueprint.is_empty());
  }

  #[test]
  fn test_blueprint_with_wrong_shape_is_empty() {
    let response = UploadResponse::from_value(json!({
      "filename": "room.mp4",
      "blueprint": {"name": "chair"}
    }));
    assert!(response.blueprint.is_empty());
    assert_eq!(response.filename.as_deref(), Some("room.mp4"));
  }

  #[test]
  fn test_blueprint_with_bad_item_is_empty() {
    let response = UploadResponse::from_value(json!({
      "blueprint": [{"name": "chair", "x": "left", "y": 0.3}]
    }));
    assert!(response.blueprint.is_empty());
  }

  #[test]
  fn test_non_object_body_is_empty() {
    assert_eq!(
      UploadResponse::from_value(json!([1, 2, 3])),
      UploadResponse::default()
    );
  }

  #[test]
  fn test_non_json_body_is_empty() {
    assert_eq!(
      UploadResponse::from_body("<html>ok</html>"),
      UploadResponse::default()
    );
  }

  #[test]
  fn test_non_string_filename_is_dropped() {
    let response = UploadResponse::from_value(json!({"filename": 42, "blueprint": []}));
    assert_eq!(response.filename, None);
  }
}
