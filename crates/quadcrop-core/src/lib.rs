//! Quadcrop Core - crop region editing library
//!
//! This crate provides an interactive, rotatable, aspect-lockable rectangle
//! editor for selecting a crop region over an image canvas. It has no host
//! dependencies: the host feeds pointer and key events in widget pixels,
//! supplies its pan/zoom and fit-to-window transforms through a [`Viewport`],
//! and receives the committed region in image pixels.
//!
//! # Module Structure
//!
//! - `region` - Corner model, gesture overlay and the committed [`Region`]
//! - `handle` - The eight draggable control points
//! - `editor` - Interaction state machine and paint pass
//! - `geometry` - Polygon helpers and coordinate mapping
//! - `render` - Drawing surfaces (display list, raster)
//! - `cursor` - Cursor shapes requested from the host
//! - `config` - Editor tunables
//! - `error` - Error types

pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod region;
pub mod render;

pub use config::EditorConfig;
pub use cursor::{CursorIcon, ResizeAxis};
pub use editor::{
    EditorEvent, EditorState, Key, Modifiers, PointerEvent, Propagation, RegionEditor,
};
pub use error::{RegionError, TransformSpace};
pub use geometry::{Bounds, Viewport};
pub use handle::{HandleController, HandleKind, HandleSignal, HANDLE_COUNT};
pub use region::{OverlayTransform, Region, RegionModel, SQUARE_DIAGONAL};
pub use render::{Control, DisplayList, DrawCommand, FillRule, RasterSurface, Rgba, Surface};
