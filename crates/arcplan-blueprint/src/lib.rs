//! ArcPlan Blueprint
//!
//! Shared data shapes for detected objects. A [`BlueprintItem`] is a labeled
//! point in normalized floor-plan coordinates; an [`UploadResponse`] is the
//! success payload returned by the inference service.

mod item;
mod response;

pub use item::BlueprintItem;
pub use response::UploadResponse;
