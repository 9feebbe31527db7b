//! Pointer targets and the gesture state machine.
//!
//! Exactly one gesture is active per pointer device. The host's hit test
//! decides what the pointer went down on; a press on an item card starts an
//! item drag and never reaches the pan path, so pan-drag and item-drag are
//! mutually exclusive by construction.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::item::ItemId;
use crate::transform::Point;

/// What the pointer went down on, as resolved by the host's hit test.
#[derive(Debug, Clone, Copy)]
pub enum PointerTarget {
    /// Empty board space; starts a pan.
    Board,
    /// An item card; starts an item drag. `grab_offset` is pointer minus
    /// item top-left at press time, in screen pixels.
    Item { id: ItemId, grab_offset: Point },
}

/// The active gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Panning the board. `grab` is pointer minus pan at press time, so the
    /// pan follows the pointer with no jump.
    Panning { grab: Point },
    /// Dragging an item card across the board. Ends on pointer-up anywhere,
    /// including a window-level release after the pointer crossed into an
    /// embedded iframe that swallows mouse events.
    DraggingItem { id: ItemId, grab_offset: Point },
}

impl Gesture {
    /// Whether any gesture is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
