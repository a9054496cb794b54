use arcplan_config::CanvasConfig;
use serde::{Deserialize, Serialize};

/// A point on the canvas as fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

/// The drawing surface markers are placed on.
///
/// Normalized coordinates map onto `[margin, 1 - margin]` on each axis so a
/// marker at 0 or 1 is drawn inside the frame instead of on its edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
  pub width: f64,
  pub height: f64,
  pub margin: f64,
}

impl Default for Canvas {
  fn default() -> Self {
    Self::from(&CanvasConfig::default())
  }
}

impl From<&CanvasConfig> for Canvas {
  fn from(config: &CanvasConfig) -> Self {
    Self {
      width: config.width,
      height: config.height,
      margin: config.margin,
    }
  }
}

impl Canvas {
  /// Map a normalized point into the inset area.
  ///
  /// Values outside `[0, 1]` are clamped; NaN and infinities go to the centre.
  pub fn place(&self, x: f64, y: f64) -> Position {
    Position {
      x: self.inset(x),
      y: self.inset(y),
    }
  }

  /// Canvas pixel coordinates of a position.
  pub fn to_pixels(&self, position: Position) -> (f64, f64) {
    (position.x * self.width, position.y * self.height)
  }

  /// Whether a position lies inside the inset area.
  pub fn contains(&self, position: Position) -> bool {
    let range = self.margin..=(1.0 - self.margin);
    range.contains(&position.x) && range.contains(&position.y)
  }

  fn inset(&self, value: f64) -> f64 {
    let value = if value.is_finite() {
      value.clamp(0.0, 1.0)
    } else {
      0.5
    };
    self.margin + value * (1.0 - 2.0 * self.margin)
  }
}
