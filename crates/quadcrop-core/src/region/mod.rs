//! The editable region: geometric model, transient gesture overlay, and the
//! committed result.
//!
//! # Bake Pattern
//!
//! The corners in [`RegionModel`] are the single source of truth. Move and
//! rotate gestures accumulate into an [`OverlayTransform`] that is only used
//! for display until the pointer is released, at which point it is baked into
//! the corners once and dropped. Small per-move increments therefore never
//! compound rounding error into the model.

mod model;
mod output;
mod overlay;

pub use model::{RegionModel, SQUARE_DIAGONAL};
pub use output::Region;
pub use overlay::OverlayTransform;
