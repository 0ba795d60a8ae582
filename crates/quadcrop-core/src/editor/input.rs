//! Input events delivered by the host window system.

use glam::DVec2;

/// Modifier keys held while an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Aspect lock while resizing, angle snap while rotating
    pub shift: bool,
    /// Hand the pointer to the host's pan gesture
    pub alt: bool,
}

/// A pointer event in widget-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: DVec2,
    /// Whether the primary button is held (or was just pressed)
    pub left_button: bool,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event at `(x, y)` with the primary button held and no modifiers.
    pub fn left(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            left_button: true,
            modifiers: Modifiers::default(),
        }
    }

    /// Event at `(x, y)` with no button held.
    pub fn hover(x: f64, y: f64) -> Self {
        Self {
            left_button: false,
            ..Self::left(x, y)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Enter or Return
    Enter,
    Alt,
    Other,
}
