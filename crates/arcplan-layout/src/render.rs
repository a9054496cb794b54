use arcplan_blueprint::BlueprintItem;
use serde::Serialize;

use crate::canvas::{Canvas, Position};
use crate::category::{IconCategory, classify};

/// Placeholder shown when nothing was detected.
pub const EMPTY_MESSAGE: &str = "No objects from your list were detected.";

/// One placed, classified item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
  pub label: String,
  pub category: IconCategory,
  pub position: Position,
}

/// What the results canvas shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutView {
  /// No items: a single placeholder message instead of markers.
  Empty { message: String },

  /// One marker per item, in input order.
  Markers { markers: Vec<Marker> },
}

impl LayoutView {
  pub fn markers(&self) -> &[Marker] {
    match self {
      LayoutView::Empty { .. } => &[],
      LayoutView::Markers { markers } => markers,
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, LayoutView::Empty { .. })
  }
}

/// Lay out detected items on a canvas.
pub fn render(items: &[BlueprintItem], canvas: &Canvas) -> LayoutView {
  if items.is_empty() {
    return LayoutView::Empty {
      message: EMPTY_MESSAGE.to_string(),
    };
  }

  let markers = items
    .iter()
    .map(|item| Marker {
      label: item.name.clone(),
      category: classify(&item.name),
      position: canvas.place(item.x, item.y),
    })
    .collect();

  LayoutView::Markers { markers }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_items_render_placeholder() {
    let view = render(&[], &Canvas::default());
    assert_eq!(
      view,
      LayoutView::Empty {
        message: EMPTY_MESSAGE.to_string()
      }
    );
    assert!(view.markers().is_empty());
  }

  #[test]
  fn test_one_marker_per_item_in_order() {
    let items = vec![
      BlueprintItem::new("bed", 0.5, 0.5),
      BlueprintItem::new("unknown gadget", 0.0, 1.0),
      BlueprintItem::new("bed", 0.9, 0.1),
    ];
    let view = render(&items, &Canvas::default());

    let labels: Vec<&str> = view.markers().iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["bed", "unknown gadget", "bed"]);
    assert_eq!(view.markers()[1].category, IconCategory::Marker);
  }

  #[test]
  fn test_room_scenario() {
    let items = vec![
      BlueprintItem::new("chair", 0.2, 0.3),
      BlueprintItem::new("tv", 0.8, 0.1),
    ];
    let canvas = Canvas::default();
    let view = render(&items, &canvas);
    let markers = view.markers();

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].category, IconCategory::Seating);
    assert_eq!(markers[1].category, IconCategory::Display);

    // chair sits left of and below the tv
    assert!(markers[0].position.x < markers[1].position.x);
    assert!(markers[0].position.y > markers[1].position.y);
    assert!(markers.iter().all(|m| canvas.contains(m.position)));
  }

  #[test]
  fn test_render_is_idempotent() {
    let items = vec![
      BlueprintItem::new("sofa", 0.33, 0.66),
      BlueprintItem::new("cup", 0.1, 0.9),
    ];
    let canvas = Canvas::default();
    assert_eq!(render(&items, &canvas), render(&items, &canvas));
  }

  #[test]
  fn test_serialized_shape() {
    let view = render(&[BlueprintItem::new("tv", 0.5, 0.5)], &Canvas::default());
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["kind"], "markers");
    assert_eq!(json["markers"][0]["category"], "display");
    let x = json["markers"][0]["position"]["x"].as_f64().unwrap();
    assert!((x - 0.5).abs() < 1e-9);
  }
}
