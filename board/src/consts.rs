//! Shared numeric constants for the board crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lower bound for the view scale.
pub const MIN_SCALE: f64 = 0.1;

/// Upper bound for the view scale.
pub const MAX_SCALE: f64 = 5.0;

/// Multiplier applied per wheel tick when zooming in.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Multiplier applied per wheel tick when zooming out.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Placement ───────────────────────────────────────────────────

/// Offset between successive items of a multi-file drop, in board units,
/// so the cards don't land exactly on top of each other.
pub const MULTI_DROP_OFFSET: f64 = 20.0;

/// Screen-space region (in pixels) within which an item added without an
/// explicit position is spawned.
pub const SPAWN_MIN_X: f64 = 50.0;
/// See [`SPAWN_MIN_X`].
pub const SPAWN_MAX_X: f64 = 800.0;
/// See [`SPAWN_MIN_X`].
pub const SPAWN_MIN_Y: f64 = 50.0;
/// See [`SPAWN_MIN_X`].
pub const SPAWN_MAX_Y: f64 = 600.0;
