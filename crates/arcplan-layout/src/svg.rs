//! SVG rendering of the results canvas.
//!
//! Output is plain text built with fixed-precision formatting, so identical
//! views produce byte-identical documents.

use std::fmt::Write;

use crate::canvas::Canvas;
use crate::render::LayoutView;

const GRID_SPACING: f64 = 20.0;
const FIXTURE_INSET: f64 = 16.0;
const MARKER_RADIUS: f64 = 14.0;

/// Render a layout view as a standalone SVG document.
pub fn render_svg(view: &LayoutView, canvas: &Canvas) -> String {
  let mut out = String::new();
  let (w, h) = (canvas.width, canvas.height);

  // Writing to a String cannot fail.
  let _ = writeln!(
    out,
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#
  );
  let _ = writeln!(
    out,
    r##"  <defs><pattern id="grid" width="{s:.0}" height="{s:.0}" patternUnits="userSpaceOnUse"><path d="M {s:.0} 0 L 0 0 0 {s:.0}" fill="none" stroke="#00beff" stroke-opacity="0.1" stroke-width="1"/></pattern></defs>"##,
    s = GRID_SPACING
  );
  let _ = writeln!(
    out,
    r##"  <rect width="100%" height="100%" fill="#0a1628"/><rect width="100%" height="100%" fill="url(#grid)"/>"##
  );
  write_fixtures(&mut out, canvas);

  match view {
    LayoutView::Empty { message } => {
      let _ = writeln!(
        out,
        r##"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="24" fill="#ffffff" fill-opacity="0.6">{}</text>"##,
        w / 2.0,
        h / 2.0,
        escape(message)
      );
    }
    LayoutView::Markers { markers } => {
      for marker in markers {
        let (cx, cy) = canvas.to_pixels(marker.position);
        let _ = writeln!(
          out,
          r##"  <g class="marker" data-category="{}" data-icon="{}">"##,
          marker.category.as_str(),
          marker.category.icon_name()
        );
        let _ = writeln!(
          out,
          r##"    <circle cx="{cx:.1}" cy="{cy:.1}" r="{MARKER_RADIUS:.0}" fill="none" stroke="#ffffff" stroke-width="2"/>"##
        );
        let glyph = marker.category.glyph();
        if !glyph.is_empty() {
          let _ = writeln!(
            out,
            r##"    <text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-size="11" font-family="monospace" fill="#ffffff">{glyph}</text>"##,
            cy + 4.0
          );
        }
        let _ = writeln!(
          out,
          r##"    <text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-size="12" font-family="monospace" fill="#ffffff" fill-opacity="0.8">{}</text>"##,
          cy + MARKER_RADIUS + 16.0,
          escape(&marker.label.to_uppercase())
        );
        out.push_str("  </g>\n");
      }
    }
  }

  out.push_str("</svg>\n");
  out
}

/// Door in the lower-left corner and a window centred on the top wall.
fn write_fixtures(out: &mut String, canvas: &Canvas) {
  let (w, h) = (canvas.width, canvas.height);
  let door_x = FIXTURE_INSET;
  let door_bottom = h - FIXTURE_INSET;
  let _ = writeln!(
    out,
    r##"  <rect x="{door_x:.1}" y="{:.1}" width="8" height="96" fill="#ffffff"/><rect x="{door_x:.1}" y="{:.1}" width="48" height="8" fill="#ffffff"/>"##,
    door_bottom - 96.0,
    door_bottom - 8.0
  );
  let _ = writeln!(
    out,
    r##"  <text x="{:.1}" y="{:.1}" font-size="12" font-family="monospace" fill="#ffffff" fill-opacity="0.7">DOOR</text>"##,
    door_x + 16.0,
    door_bottom - 104.0
  );
  let _ = writeln!(
    out,
    r##"  <rect x="{:.1}" y="{FIXTURE_INSET:.1}" width="192" height="8" fill="#ffffff"/>"##,
    w / 2.0 - 96.0
  );
  let _ = writeln!(
    out,
    r##"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" font-family="monospace" fill="#ffffff" fill-opacity="0.7">WINDOW</text>"##,
    w / 2.0,
    FIXTURE_INSET + 28.0
  );
}

fn escape(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&apos;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
