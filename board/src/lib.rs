//! Board transform engine for the infinite link canvas.
//!
//! This crate owns everything spatial about the board: the pan/zoom view
//! transform and its coordinate conversions, the pan-drag / item-drag gesture
//! state machine, the insertion-ordered item store, and the drop/paste
//! placement rules. The host layer (whatever paints the board) feeds pointer
//! events and drop/paste payloads in as plain data and reads item snapshots
//! back out; it never owns a coordinate decision of its own.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::BoardEngine`] tying transform, store, and gestures together |
//! | [`item`] | Board items, sparse metadata patches, and the in-memory store |
//! | [`transform`] | Pan/zoom view transform and coordinate conversions |
//! | [`input`] | Pointer targets and the gesture state machine |
//! | [`consts`] | Shared numeric constants (zoom limits, drop offsets, etc.) |

pub mod consts;
pub mod engine;
pub mod input;
pub mod item;
pub mod transform;
