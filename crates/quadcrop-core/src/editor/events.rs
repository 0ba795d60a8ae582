//! Editor states and the notifications sent to the host.

use crate::cursor::CursorIcon;
use crate::region::Region;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Interaction state of a [`RegionEditor`](super::RegionEditor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorState {
    /// No rectangle yet
    #[default]
    Empty,
    /// The first drag is defining the rectangle
    Initializing,
    /// A rectangle exists and no gesture is running
    Idle,
    Moving,
    Rotating,
    /// A corner handle is being dragged
    Resizing { corner: usize },
    /// Escape ended the session
    Cancelled,
    /// Enter ended the session and the region was emitted
    Committed,
}

impl EditorState {
    /// Short lowercase name, e.g. for host-side display.
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Empty => "empty",
            EditorState::Initializing => "initializing",
            EditorState::Idle => "idle",
            EditorState::Moving => "moving",
            EditorState::Rotating => "rotating",
            EditorState::Resizing { .. } => "resizing",
            EditorState::Cancelled => "cancelled",
            EditorState::Committed => "committed",
        }
    }

    /// True while the pointer is driving a gesture.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            EditorState::Initializing
                | EditorState::Moving
                | EditorState::Rotating
                | EditorState::Resizing { .. }
        )
    }

    /// True once the session ended by commit or cancel.
    pub fn is_finished(&self) -> bool {
        matches!(self, EditorState::Cancelled | EditorState::Committed)
    }
}

/// Notification delivered synchronously to every subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Enter confirmed a non-degenerate region (model space)
    RegionCommitted { region: Region },
    /// Alt is held: the host should pan by `delta` widget pixels
    PanRequested { delta: DVec2 },
    VisibilityChanged { visible: bool },
    StateChanged { from: EditorState, to: EditorState },
    CursorChanged { cursor: CursorIcon },
}

/// Whether the editor handled an input event.
///
/// `Ignored` events should be forwarded to whatever sits underneath the
/// editor, e.g. the viewer's own pan handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Consumed,
    Ignored,
}

impl Propagation {
    pub fn is_consumed(self) -> bool {
        self == Propagation::Consumed
    }
}
