//! Interaction state machine for the crop region.
//!
//! [`RegionEditor`] turns host pointer and key events into edits of a
//! [`RegionModel`], draws the region every frame and tells the host what
//! happened through [`EditorEvent`]s.
//!
//! # States
//!
//! ```text
//!  Empty ──press──▶ Initializing ──release──▶ Idle
//!                                             │  ▲
//!                      press inside / outside │  │ release (bake)
//!                               or on a handle▼  │
//!                                Moving / Rotating / Resizing
//! ```
//!
//! A press inside the region moves it, a press outside or on an edge handle
//! rotates it and a corner handle resizes it. Escape ends the session as
//! `Cancelled`; Enter on a non-degenerate region ends it as `Committed`.
//! Both hide the editor, and the next [`RegionEditor::show`] starts over
//! with an empty region.
//!
//! # Gestures
//!
//! Move and rotate gestures never touch the model while the pointer is down.
//! They only update the [`OverlayTransform`], which is baked into the corners
//! on release, so Escape can drop a half-finished gesture without a trace.
//!
//! # Alt
//!
//! While alt is held every pointer event is refused and reported as
//! [`Propagation::Ignored`]; drags emit [`EditorEvent::PanRequested`] so the
//! host viewer can pan instead. A gesture whose release was swallowed this
//! way is ended, as a release would end it, by the next press or buttonless
//! move.

mod events;
mod input;

pub use events::{EditorEvent, EditorState, Propagation};
pub use input::{Key, Modifiers, PointerEvent};

use crate::config::EditorConfig;
use crate::cursor::CursorIcon;
use crate::error::RegionError;
use crate::geometry::{self, Viewport};
use crate::handle::{HandleController, HandleKind, HandleSignal, HANDLE_COUNT};
use crate::region::{OverlayTransform, RegionModel, SQUARE_DIAGONAL};
use crate::render::{Control, FillRule, Surface};
use glam::DVec2;
use std::fmt;

/// Pointer offsets from the pivot shorter than this carry no usable angle.
const MIN_ROTATE_RADIUS: f64 = 1e-9;

type Listener = Box<dyn FnMut(&EditorEvent)>;

pub struct RegionEditor {
    config: EditorConfig,
    model: RegionModel,
    overlay: OverlayTransform,
    handles: [HandleController; HANDLE_COUNT],
    state: EditorState,
    visible: bool,
    /// Model-space point where the running move or rotate gesture started
    grab: DVec2,
    /// Diagonal snapshotted for shift-locked resizing
    lock: DVec2,
    /// Last widget position of an alt-pan drag
    pan_from: Option<DVec2>,
    cursor: CursorIcon,
    /// Cursor to fall back to when alt is released
    hover_cursor: CursorIcon,
    listeners: Vec<Listener>,
}

impl Default for RegionEditor {
    fn default() -> Self {
        Self::with_valid_config(EditorConfig::default())
    }
}

impl fmt::Debug for RegionEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionEditor")
            .field("state", &self.state)
            .field("visible", &self.visible)
            .field("model", &self.model)
            .field("overlay", &self.overlay)
            .field("cursor", &self.cursor)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl RegionEditor {
    /// Create a hidden editor with an empty region.
    pub fn new(config: EditorConfig) -> Result<Self, RegionError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EditorConfig) -> Self {
        let handles = HandleController::all(&config);
        Self {
            config,
            model: RegionModel::new(),
            overlay: OverlayTransform::IDENTITY,
            handles,
            state: EditorState::Empty,
            visible: false,
            grab: DVec2::ZERO,
            lock: SQUARE_DIAGONAL,
            pan_from: None,
            cursor: CursorIcon::Crosshair,
            hover_cursor: CursorIcon::Crosshair,
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Events are delivered in emission order, before
    /// the handler that caused them returns.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The validated configuration the editor was built with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The committed corners, without the running move or rotate.
    pub fn model(&self) -> &RegionModel {
        &self.model
    }

    /// The in-progress gesture; identity whenever no gesture is running.
    pub fn overlay(&self) -> &OverlayTransform {
        &self.overlay
    }

    /// Current interaction state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Cursor the host should show over the widget.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Whether the editor is drawn and accepts input.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The eight handles, corners 0-3 first, then edge midpoints 4-7.
    pub fn handles(&self) -> &[HandleController; HANDLE_COUNT] {
        &self.handles
    }

    /// Corners as currently drawn in widget space: overlay, then image-fit,
    /// then world.
    pub fn displayed_corners(&self, viewport: &Viewport) -> Option<[DVec2; 4]> {
        self.model
            .corners()
            .map(|c| self.overlay.apply_all(c).map(|p| viewport.model_to_widget(p)))
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Show the editor and its handles.
    ///
    /// After a commit or cancel this starts a new session with an empty region.
    pub fn show(&mut self) {
        if self.state.is_finished() {
            self.reset();
        }
        for handle in &mut self.handles {
            handle.set_visible(true);
        }
        if !self.visible {
            self.visible = true;
            self.emit(EditorEvent::VisibilityChanged { visible: true });
        }
        if self.model.is_empty() {
            self.set_hover_cursor(CursorIcon::Crosshair);
        }
    }

    /// Hide the editor. A running move or rotate is dropped; a running
    /// resize keeps what it did so far.
    pub fn hide(&mut self) {
        if self.state.is_gesture() {
            self.overlay.reset();
            self.finish_gesture();
        }
        for handle in &mut self.handles {
            handle.set_visible(false);
        }
        self.pan_from = None;
        if self.visible {
            self.visible = false;
            self.emit(EditorEvent::VisibilityChanged { visible: false });
        }
    }

    /// Drop the region and any gesture; visibility is unchanged.
    pub fn reset(&mut self) {
        for handle in &mut self.handles {
            handle.pointer_up();
        }
        self.model.clear();
        self.overlay.reset();
        self.lock = SQUARE_DIAGONAL;
        self.pan_from = None;
        self.set_state(EditorState::Empty);
        self.set_hover_cursor(CursorIcon::Crosshair);
    }

    /// Snapshot the diagonal used as aspect lock by the drag starting at
    /// handle `index`. Edge handles take the diagonal of the corner they
    /// follow; an empty region snapshots a square.
    ///
    /// # Panics
    ///
    /// If `index` is not a handle index (0..=7).
    pub fn update_diagonal(&mut self, index: usize) {
        assert!(index < HANDLE_COUNT, "handle index out of range: {index}");
        self.lock = if self.model.is_empty() {
            SQUARE_DIAGONAL
        } else {
            self.model.get_diagonal(index % 4)
        };
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Handle a button press.
    ///
    /// In `Empty` a left press inside the widget bounds anchors a new region.
    /// In `Idle` it starts a handle drag, a move (inside the region) or a
    /// rotate (outside it). A gesture still open from an interrupted release
    /// is ended first.
    ///
    /// # Arguments
    /// * `event` - Pointer position in widget pixels, buttons and modifiers
    /// * `viewport` - Current widget bounds and transforms
    ///
    /// # Returns
    /// `Consumed` when a gesture started; `Ignored` while hidden, with alt
    /// held, for other buttons and for presses outside the widget bounds.
    pub fn pointer_down(&mut self, event: &PointerEvent, viewport: &Viewport) -> Propagation {
        if !self.visible {
            return Propagation::Ignored;
        }
        let p = event.position;
        if event.modifiers.alt {
            self.pan_from = event.left_button.then_some(p);
            self.set_cursor(if event.left_button {
                CursorIcon::ClosedHand
            } else {
                CursorIcon::OpenHand
            });
            return Propagation::Ignored;
        }
        if self.state.is_gesture() {
            log::debug!("press during {}, ending it", self.state.name());
            self.finish_gesture();
        }
        if !event.left_button || !viewport.contains_widget_point(p) {
            return Propagation::Ignored;
        }

        match self.state {
            EditorState::Empty => {
                let anchor = viewport.widget_to_model(p);
                self.update_diagonal(2);
                self.model.set_all_corners(anchor);
                self.set_state(EditorState::Initializing);
                Propagation::Consumed
            }
            EditorState::Idle => {
                let polygon = self.sync_handles(viewport);
                let started = self
                    .handles
                    .iter_mut()
                    .find_map(|handle| handle.pointer_down(p, true));
                if let (Some(HandleSignal::DragStarted { index }), Some(polygon)) =
                    (started, polygon)
                {
                    self.start_handle_drag(index, &polygon, viewport);
                    return Propagation::Consumed;
                }

                let grab = viewport.widget_to_model(p);
                if self.model.contains_point(grab) {
                    self.grab = grab;
                    self.set_state(EditorState::Moving);
                    self.set_cursor(CursorIcon::Move);
                } else {
                    self.start_rotate(grab);
                    self.set_cursor(CursorIcon::Rotate);
                }
                Propagation::Consumed
            }
            _ => Propagation::Ignored,
        }
    }

    /// Handle pointer motion.
    ///
    /// With the left button held this drives the running gesture; without
    /// it the hover cursor is updated. A buttonless move during a gesture
    /// means its release was missed, so the gesture is ended first.
    ///
    /// # Arguments
    /// * `event` - Pointer position in widget pixels, buttons and modifiers
    /// * `viewport` - Current widget bounds and transforms
    ///
    /// # Returns
    /// `Consumed` when a gesture or handle drag advanced, otherwise
    /// `Ignored` (hover, alt panning, hidden editor).
    pub fn pointer_move(&mut self, event: &PointerEvent, viewport: &Viewport) -> Propagation {
        if !self.visible {
            return Propagation::Ignored;
        }
        let p = event.position;
        if event.modifiers.alt {
            if event.left_button {
                if let Some(last) = self.pan_from {
                    self.emit(EditorEvent::PanRequested { delta: p - last });
                }
                self.pan_from = Some(p);
                self.set_cursor(CursorIcon::ClosedHand);
            } else {
                self.pan_from = None;
                self.set_cursor(CursorIcon::OpenHand);
            }
            return Propagation::Ignored;
        }
        self.pan_from = None;
        if !event.left_button && self.state.is_gesture() {
            log::debug!("buttonless move during {}, ending it", self.state.name());
            self.finish_gesture();
        }

        let shift = event.modifiers.shift;
        let dragged = self
            .handles
            .iter_mut()
            .find_map(|handle| handle.pointer_move(p, event.left_button, shift));
        if let Some(HandleSignal::Dragged {
            index,
            position,
            shift,
        }) = dragged
        {
            self.drag_handle(index, viewport.widget_to_model(position), shift);
            return Propagation::Consumed;
        }

        if !self.state.is_gesture() {
            self.update_hover(p, viewport);
            return Propagation::Ignored;
        }
        if !event.left_button {
            return Propagation::Ignored;
        }

        let current = viewport.widget_to_model(p);
        match self.state {
            EditorState::Initializing => {
                self.model
                    .update_corner(2, current, shift.then_some(self.lock));
            }
            EditorState::Moving => {
                self.overlay.translation = current - self.grab;
            }
            EditorState::Rotating => self.rotate_to(current, shift),
            _ => return Propagation::Ignored,
        }
        log::trace!(
            "{} at {:?}: overlay {:?}",
            self.state.name(),
            current,
            self.overlay
        );
        Propagation::Consumed
    }

    /// Handle a button release, ending the running gesture.
    ///
    /// Move and rotate gestures are baked into the corners here. A release
    /// with alt held is refused like any other alt event; the gesture it
    /// leaves open is ended by the next press or buttonless move.
    ///
    /// # Arguments
    /// * `event` - Pointer position in widget pixels, buttons and modifiers
    /// * `viewport` - Current widget bounds and transforms
    ///
    /// # Returns
    /// `Consumed` when a gesture ended, otherwise `Ignored`.
    pub fn pointer_up(&mut self, event: &PointerEvent, viewport: &Viewport) -> Propagation {
        if !self.visible {
            return Propagation::Ignored;
        }
        if event.modifiers.alt {
            self.pan_from = None;
            self.set_cursor(CursorIcon::OpenHand);
            return Propagation::Ignored;
        }
        self.pan_from = None;
        if !self.state.is_gesture() {
            return Propagation::Ignored;
        }
        self.finish_gesture();
        self.update_hover(event.position, viewport);
        Propagation::Consumed
    }

    // ------------------------------------------------------------------
    // Keyboard input
    // ------------------------------------------------------------------

    /// Handle a key press.
    ///
    /// Escape cancels the session and Enter commits a non-degenerate region;
    /// both hide the editor. Alt switches to the pan cursor.
    ///
    /// # Returns
    /// `Consumed` for Escape and for an Enter that committed, otherwise
    /// `Ignored`.
    pub fn key_down(&mut self, key: Key) -> Propagation {
        if !self.visible {
            return Propagation::Ignored;
        }
        match key {
            Key::Escape => {
                self.cancel();
                Propagation::Consumed
            }
            Key::Enter => {
                if self.commit() {
                    Propagation::Consumed
                } else {
                    Propagation::Ignored
                }
            }
            Key::Alt => {
                self.set_cursor(CursorIcon::OpenHand);
                Propagation::Ignored
            }
            Key::Other => Propagation::Ignored,
        }
    }

    /// Handle a key release. Releasing alt restores the hover cursor.
    ///
    /// # Returns
    /// Always `Ignored`, so the host sees every key release.
    pub fn key_up(&mut self, key: Key) -> Propagation {
        if self.visible && key == Key::Alt {
            self.pan_from = None;
            self.set_cursor(self.hover_cursor);
        }
        Propagation::Ignored
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draw one frame and move the handles onto the displayed polygon.
    ///
    /// Everything outside the region is shaded with a single even-odd path
    /// made of the widget bounds and the polygon.
    pub fn paint(&mut self, viewport: &Viewport, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        let polygon = self.sync_handles(viewport);

        let mut contours = vec![viewport.bounds().corners().to_vec()];
        if let Some(polygon) = &polygon {
            contours.push(polygon.to_vec());
        }
        surface.fill_path(&contours, FillRule::EvenOdd, self.config.shade_color);

        if let Some(polygon) = &polygon {
            let mut outline = polygon.to_vec();
            outline.push(polygon[0]);
            surface.stroke_polyline(&outline, self.config.stroke_color, self.config.stroke_width);
            for handle in &self.handles {
                handle.draw(surface);
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn start_handle_drag(&mut self, index: usize, polygon: &[DVec2; 4], viewport: &Viewport) {
        self.update_diagonal(index);
        let cursor = self.handles[index].cursor(polygon);
        let center = self.handles[index].center();
        match self.handles[index].kind() {
            HandleKind::Corner => {
                self.set_state(EditorState::Resizing { corner: index });
            }
            HandleKind::Edge => self.start_rotate(viewport.widget_to_model(center)),
        }
        self.set_cursor(cursor);
    }

    fn drag_handle(&mut self, index: usize, target: DVec2, shift: bool) {
        match self.handles[index].kind() {
            HandleKind::Corner => {
                self.model
                    .update_corner(index, target, shift.then_some(self.lock));
            }
            HandleKind::Edge => self.rotate_to(target, shift),
        }
    }

    fn start_rotate(&mut self, grab: DVec2) {
        self.grab = grab;
        // The pivot stays put for the whole gesture
        self.overlay.pivot = self.model.centroid().unwrap_or(grab);
        self.set_state(EditorState::Rotating);
    }

    /// Rotate by the angle between pivot→grab and pivot→`current`.
    ///
    /// With shift the resulting orientation (region angle plus overlay)
    /// snaps to the nearest multiple of the configured step.
    fn rotate_to(&mut self, current: DVec2, shift: bool) {
        let pivot = self.overlay.pivot;
        let from = self.grab - pivot;
        let to = current - pivot;
        if from.length() < MIN_ROTATE_RADIUS || to.length() < MIN_ROTATE_RADIUS {
            return;
        }
        let mut rotation =
            geometry::wrap_angle(geometry::direction(to) - geometry::direction(from));
        if shift {
            let base = self.model.angle();
            let snapped = geometry::snap_angle(base + rotation, self.config.snap_step());
            rotation = geometry::wrap_angle(snapped - base);
        }
        self.overlay.rotation = rotation;
    }

    /// End the running gesture as a release would.
    fn finish_gesture(&mut self) {
        for handle in &mut self.handles {
            handle.pointer_up();
        }
        let next = match self.state {
            EditorState::Initializing if self.model.is_degenerate(self.config.min_commit_area) => {
                log::debug!("first drag produced no area, starting over");
                self.model.clear();
                EditorState::Empty
            }
            EditorState::Initializing | EditorState::Resizing { .. } => {
                self.model.normalize_winding();
                EditorState::Idle
            }
            EditorState::Moving | EditorState::Rotating => {
                log::debug!(
                    "baking overlay: translation {:?}, rotation {:.4} rad",
                    self.overlay.translation,
                    self.overlay.rotation
                );
                self.model.bake(&self.overlay);
                self.overlay.reset();
                EditorState::Idle
            }
            _ => return,
        };
        self.set_state(next);
    }

    fn cancel(&mut self) {
        for handle in &mut self.handles {
            handle.pointer_up();
        }
        self.overlay.reset();
        self.set_state(EditorState::Cancelled);
        self.hide();
    }

    /// Emit the region and hide. Returns false (and changes nothing else)
    /// when there is no region or it has no area.
    fn commit(&mut self) -> bool {
        if self.state.is_gesture() {
            self.finish_gesture();
        }
        let Some(region) = self.model.region() else {
            return false;
        };
        if self.model.is_degenerate(self.config.min_commit_area) {
            log::warn!(
                "ignoring commit of degenerate region (area {:.3e})",
                self.model.area()
            );
            return false;
        }
        log::debug!("committing region {:?}", region.corners);
        self.emit(EditorEvent::RegionCommitted { region });
        self.set_state(EditorState::Committed);
        self.hide();
        true
    }

    /// Move every handle onto the displayed polygon; returns that polygon.
    fn sync_handles(&mut self, viewport: &Viewport) -> Option<[DVec2; 4]> {
        let polygon = self.displayed_corners(viewport)?;
        for handle in &mut self.handles {
            handle.set_center(HandleController::anchor_on(handle.index(), &polygon));
        }
        Some(polygon)
    }

    fn update_hover(&mut self, p: DVec2, viewport: &Viewport) {
        let icon = match self.sync_handles(viewport) {
            None => CursorIcon::Crosshair,
            Some(polygon) => {
                if let Some(handle) = self.handles.iter().find(|h| h.hit_test(p)) {
                    handle.cursor(&polygon)
                } else if self.model.contains_point(viewport.widget_to_model(p)) {
                    CursorIcon::Move
                } else {
                    CursorIcon::Rotate
                }
            }
        };
        self.set_hover_cursor(icon);
    }

    fn set_hover_cursor(&mut self, icon: CursorIcon) {
        self.hover_cursor = icon;
        self.set_cursor(icon);
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        if self.cursor != icon {
            self.cursor = icon;
            self.emit(EditorEvent::CursorChanged { cursor: icon });
        }
    }

    fn set_state(&mut self, to: EditorState) {
        let from = self.state;
        if from == to {
            return;
        }
        log::debug!("region editor: {} -> {}", from.name(), to.name());
        self.state = to;
        self.emit(EditorEvent::StateChanged { from, to });
    }

    fn emit(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn drawn(vp: &Viewport) -> RegionEditor {
        let mut editor = RegionEditor::default();
        editor.show();
        editor.pointer_down(&PointerEvent::left(10.0, 10.0), vp);
        editor.pointer_move(&PointerEvent::left(110.0, 60.0), vp);
        editor.pointer_up(&PointerEvent::left(110.0, 60.0), vp);
        editor
    }

    fn rotate(editor: &mut RegionEditor, vp: &Viewport, angle: f64) {
        let pivot = editor.model().centroid().unwrap();
        let start = pivot + DVec2::new(150.0, 0.0);
        let end = pivot + DVec2::from_angle(angle) * 150.0;
        editor.pointer_down(&PointerEvent::left(start.x, start.y), vp);
        editor.pointer_move(&PointerEvent::left(end.x, end.y), vp);
        editor.pointer_up(&PointerEvent::left(end.x, end.y), vp);
    }

    proptest! {
        /// A move gesture shifts every corner by the pointer delta.
        #[test]
        fn move_gesture_translates(dx in -100.0f64..100.0, dy in -100.0f64..100.0) {
            let vp = Viewport::new(400.0, 300.0).unwrap();
            let mut editor = drawn(&vp);
            let before = *editor.model().corners().unwrap();

            editor.pointer_down(&PointerEvent::left(50.0, 30.0), &vp);
            editor.pointer_move(&PointerEvent::left(50.0 + dx, 30.0 + dy), &vp);
            editor.pointer_up(&PointerEvent::left(50.0 + dx, 30.0 + dy), &vp);

            prop_assert_eq!(editor.state(), EditorState::Idle);
            prop_assert!(editor.overlay().is_identity());
            let after = editor.model().corners().unwrap();
            for i in 0..4 {
                prop_assert!(after[i].abs_diff_eq(before[i] + DVec2::new(dx, dy), 1e-9));
            }
        }

        /// Rotating by θ and then by −θ in two gestures restores the corners.
        #[test]
        fn rotate_round_trip(angle in -3.0f64..3.0) {
            let vp = Viewport::new(400.0, 300.0).unwrap();
            let mut editor = drawn(&vp);
            let before = *editor.model().corners().unwrap();

            rotate(&mut editor, &vp, angle);
            prop_assert!((editor.model().area() - 5000.0).abs() < 1e-6);
            rotate(&mut editor, &vp, -angle);

            let after = editor.model().corners().unwrap();
            for i in 0..4 {
                prop_assert!(
                    after[i].abs_diff_eq(before[i], 1e-6),
                    "corner {}: {:?} vs {:?}", i, after[i], before[i]
                );
            }
        }
    }
}
