//! Label to icon classification.
//!
//! Labels are looked up in a fixed table after trimming and lower-casing.
//! Anything not in the table is drawn as a generic [`IconCategory::Marker`],
//! so classification cannot fail.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Drawable icon families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
  Seating,
  Sofa,
  Bed,
  Display,
  Laptop,
  Outlet,
  Drinkware,
  Book,
  Dining,
  Refrigerator,
  Microwave,
  /// Fallback for unrecognized labels.
  Marker,
}

static LABELS: LazyLock<HashMap<&'static str, IconCategory>> = LazyLock::new(|| {
  HashMap::from([
    ("chair", IconCategory::Seating),
    ("sofa", IconCategory::Sofa),
    ("bed", IconCategory::Bed),
    ("tv", IconCategory::Display),
    ("laptop", IconCategory::Laptop),
    ("outlet", IconCategory::Outlet),
    // the detector reports wall clocks as a stand-in for outlets
    ("clock", IconCategory::Outlet),
    ("bottle", IconCategory::Drinkware),
    ("cup", IconCategory::Drinkware),
    ("book", IconCategory::Book),
    ("dining table", IconCategory::Dining),
    ("refrigerator", IconCategory::Refrigerator),
    ("microwave", IconCategory::Microwave),
  ])
});

/// Classify an object label into an icon category.
pub fn classify(label: &str) -> IconCategory {
  let key = label.trim().to_lowercase();
  LABELS.get(key.as_str()).copied().unwrap_or(IconCategory::Marker)
}

impl IconCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      IconCategory::Seating => "seating",
      IconCategory::Sofa => "sofa",
      IconCategory::Bed => "bed",
      IconCategory::Display => "display",
      IconCategory::Laptop => "laptop",
      IconCategory::Outlet => "outlet",
      IconCategory::Drinkware => "drinkware",
      IconCategory::Book => "book",
      IconCategory::Dining => "dining",
      IconCategory::Refrigerator => "refrigerator",
      IconCategory::Microwave => "microwave",
      IconCategory::Marker => "marker",
    }
  }

  /// Name of the matching icon in the lucide icon set.
  pub fn icon_name(self) -> &'static str {
    match self {
      IconCategory::Seating => "armchair",
      IconCategory::Sofa => "sofa",
      IconCategory::Bed => "bed",
      IconCategory::Display => "monitor",
      IconCategory::Laptop => "laptop",
      IconCategory::Outlet => "plug",
      IconCategory::Drinkware => "glass-water",
      IconCategory::Book => "book",
      IconCategory::Dining => "utensils",
      IconCategory::Refrigerator => "refrigerator",
      IconCategory::Microwave => "microwave",
      IconCategory::Marker => "circle",
    }
  }

  /// Short glyph drawn inside the marker in SVG output.
  pub fn glyph(self) -> &'static str {
    match self {
      IconCategory::Seating => "CH",
      IconCategory::Sofa => "SF",
      IconCategory::Bed => "BD",
      IconCategory::Display => "TV",
      IconCategory::Laptop => "LP",
      IconCategory::Outlet => "OU",
      IconCategory::Drinkware => "DR",
      IconCategory::Book => "BK",
      IconCategory::Dining => "DT",
      IconCategory::Refrigerator => "RF",
      IconCategory::Microwave => "MW",
      IconCategory::Marker => "",
    }
  }
}
