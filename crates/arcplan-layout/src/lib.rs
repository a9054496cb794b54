//! ArcPlan Layout
//!
//! Turns a list of [`BlueprintItem`]s into a floor-plan layout. Each item is
//! placed on an inset [`Canvas`] and classified into an [`IconCategory`].
//! Layout is pure: the same items on the same canvas always produce the same
//! [`LayoutView`], and [`render_svg`] the same document.
//!
//! [`BlueprintItem`]: arcplan_blueprint::BlueprintItem

mod canvas;
mod category;
mod render;
mod svg;

pub use canvas::{Canvas, Position};
pub use category::{IconCategory, classify};
pub use render::{EMPTY_MESSAGE, LayoutView, Marker, render};
pub use svg::render_svg;
