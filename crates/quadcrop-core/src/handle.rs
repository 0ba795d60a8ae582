//! Draggable control points around the region.
//!
//! There are eight handles: indices 0..=3 sit on the corners and resize the
//! region, indices 4..=7 sit on the midpoints of edges 0→1, 1→2, 2→3, 3→0 and
//! rotate it. A handle knows nothing about transforms: the editor pushes its
//! widget-space centre in on every paint, and the handle reports drags back in
//! widget space.

use crate::config::EditorConfig;
use crate::cursor::{CursorIcon, ResizeAxis};
use crate::error::RegionError;
use crate::render::{Control, Rgba, Surface};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Number of handles around a region.
pub const HANDLE_COUNT: usize = 8;

/// Corner handles resize, edge handles rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Corner,
    Edge,
}

impl HandleKind {
    /// Kind of the handle at `index`, or an error for indices past 7.
    pub fn of(index: usize) -> Result<Self, RegionError> {
        match index {
            0..=3 => Ok(HandleKind::Corner),
            4..=7 => Ok(HandleKind::Edge),
            _ => Err(RegionError::InvalidHandle(index)),
        }
    }
}

/// What a handle reports to the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleSignal {
    /// The button went down inside the hit box.
    DragStarted { index: usize },
    /// The handle was dragged; `position` is where its centre should go.
    Dragged {
        index: usize,
        position: DVec2,
        shift: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    pointer: DVec2,
    center: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleController {
    index: usize,
    center: DVec2,
    size: f64,
    inset: f64,
    color: Rgba,
    visible: bool,
    grab: Option<Grab>,
}

impl HandleController {
    /// # Panics
    ///
    /// If `index` is not a handle index (0..=7).
    pub fn new(index: usize, config: &EditorConfig) -> Self {
        assert!(index < HANDLE_COUNT, "handle index out of range: {index}");
        Self {
            index,
            center: DVec2::ZERO,
            size: config.handle_size,
            inset: config.handle_inset,
            color: config.handle_color,
            visible: false,
            grab: None,
        }
    }

    /// All eight handles in index order.
    pub fn all(config: &EditorConfig) -> [HandleController; HANDLE_COUNT] {
        std::array::from_fn(|i| HandleController::new(i, config))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> HandleKind {
        if self.index < 4 {
            HandleKind::Corner
        } else {
            HandleKind::Edge
        }
    }

    /// Centre in widget space.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding a handle also drops any drag in progress.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.grab = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Square hit box (min, max) in widget space; its size does not follow zoom.
    pub fn hit_box(&self) -> (DVec2, DVec2) {
        let half = DVec2::splat(self.size * 0.5);
        (self.center - half, self.center + half)
    }

    /// Widget-space position of this handle on a widget-space polygon.
    pub fn anchor_on(index: usize, polygon: &[DVec2; 4]) -> DVec2 {
        if index < 4 {
            polygon[index]
        } else {
            let edge = index - 4;
            (polygon[edge] + polygon[(edge + 1) % 4]) * 0.5
        }
    }

    /// Cursor for hovering this handle on the displayed polygon.
    ///
    /// Corners point along their diagonal, edges along their edge.
    pub fn cursor(&self, polygon: &[DVec2; 4]) -> CursorIcon {
        match self.kind() {
            HandleKind::Corner => {
                let i = self.index;
                CursorIcon::Resize(ResizeAxis::from_direction(polygon[(i + 2) % 4] - polygon[i]))
            }
            HandleKind::Edge => {
                let e = self.index - 4;
                CursorIcon::RotateAlong(ResizeAxis::from_direction(
                    polygon[(e + 1) % 4] - polygon[e],
                ))
            }
        }
    }

    pub fn pointer_down(&mut self, pointer: DVec2, left_button: bool) -> Option<HandleSignal> {
        if !left_button || !self.hit_test(pointer) {
            return None;
        }
        self.grab = Some(Grab {
            pointer,
            center: self.center,
        });
        Some(HandleSignal::DragStarted { index: self.index })
    }

    /// Report where the centre should move: its position at grab time plus the
    /// pointer delta, so the handle does not jump under the cursor.
    pub fn pointer_move(
        &mut self,
        pointer: DVec2,
        left_button: bool,
        shift: bool,
    ) -> Option<HandleSignal> {
        let grab = self.grab?;
        if !left_button {
            return None;
        }
        Some(HandleSignal::Dragged {
            index: self.index,
            position: grab.center + (pointer - grab.pointer),
            shift,
        })
    }

    /// Ends a drag; returns whether one was in progress.
    pub fn pointer_up(&mut self) -> bool {
        self.grab.take().is_some()
    }
}

impl Control for HandleController {
    fn draw(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        let (min, max) = self.hit_box();
        let inset = DVec2::splat(self.inset);
        surface.fill_rect(min + inset, max - inset, self.color);
    }

    fn hit_test(&self, p: DVec2) -> bool {
        if !self.visible {
            return false;
        }
        let (min, max) = self.hit_box();
        p.x >= min.x && p.y >= min.y && p.x <= max.x && p.y <= max.y
    }
}
