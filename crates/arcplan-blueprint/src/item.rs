use serde::{Deserialize, Serialize};

/// A detected object placed on the floor plan.
///
/// `x` and `y` are fractions of the plan's width and height. They are expected
/// to lie in `[0, 1]` but are not checked here; the layout renderer clamps
/// when it places items on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintItem {
  /// Free-text object label, e.g. "chair" or "outlet".
  pub name: String,
  pub x: f64,
  pub y: f64,
}

impl BlueprintItem {
  pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
    Self {
      name: name.into(),
      x,
      y,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_item() {
    let item: BlueprintItem =
      serde_json::from_str(r#"{"name": "chair", "x": 0.2, "y": 0.3}"#).unwrap();
    assert_eq!(item, BlueprintItem::new("chair", 0.2, 0.3));
  }

  #[test]
  fn test_integer_coordinates_are_accepted() {
    let item: BlueprintItem = serde_json::from_str(r#"{"name": "bed", "x": 1, "y": 0}"#).unwrap();
    assert_eq!(item.x, 1.0);
    assert_eq!(item.y, 0.0);
  }

  #[test]
  fn test_missing_coordinate_is_rejected() {
    let result = serde_json::from_str::<BlueprintItem>(r#"{"name": "tv", "x": 0.5}"#);
    assert!(result.is_err());
  }
}
