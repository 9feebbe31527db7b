//! Board engine: the one owner of view transform, item store, and gestures.
//!
//! DESIGN
//! ======
//! The host owns the rendering surface and feeds three kinds of data in:
//! pointer events (with the hit-test result attached), drop/paste payloads,
//! and the transform it actually painted this frame. The engine owns every
//! coordinate decision and all item mutation, and reports what changed via
//! [`Action`] so the host knows what to repaint. Metadata arrives later and
//! asynchronously; link items are inserted optimistically and patched in
//! place by id when (and if) a result shows up.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use rand::Rng;
use url::Url;
use uuid::Uuid;

use crate::consts::{
    MULTI_DROP_OFFSET, SPAWN_MAX_X, SPAWN_MAX_Y, SPAWN_MIN_X, SPAWN_MIN_Y,
};
use crate::input::{Gesture, PointerTarget};
use crate::item::{BoardItem, ItemId, ItemStore, MetadataPatch};
use crate::transform::{Point, RenderedTransform, ViewTransform};

/// Viewport geometry of the board container, in screen pixels. Absent until
/// the host has mounted and measured the container.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

/// What a pointer event changed, for the host to repaint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// The pan offset moved.
    Panned,
    /// The scale (and compensating pan) changed.
    Zoomed,
    /// An item moved to a new board position.
    ItemMoved { id: ItemId, x: f64, y: f64 },
}

/// An image delivered by drop or paste. The host has already filtered to
/// `image/*` MIME types and materialized a `src` the renderer can use
/// (data URL or object URL).
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub name: String,
    pub src: String,
}

/// Content extracted from a drop or paste event.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub images: Vec<ImagePayload>,
    pub text: Option<String>,
}

/// Deterministic third-party favicon URL for a hostname. A URL template
/// only — never checked against the network — so it is always available as
/// the optimistic placeholder icon.
#[must_use]
pub fn fallback_favicon_url(host: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={host}&sz=64")
}

/// Core board state and the operations that mutate it.
pub struct BoardEngine {
    transform: ViewTransform,
    items: ItemStore,
    gesture: Gesture,
    viewport: Option<Viewport>,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self {
            transform: ViewTransform::default(),
            items: ItemStore::new(),
            gesture: Gesture::default(),
            viewport: None,
        }
    }
}

impl BoardEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Host data inputs ---

    /// Update the container's measured geometry.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// The container was unmounted; conversions degrade to the origin.
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }

    // --- Queries ---

    /// Snapshot of the current view transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// The currently active gesture.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// All items in paint order.
    pub fn items(&self) -> impl Iterator<Item = &BoardItem> {
        self.items.iter()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&BoardItem> {
        self.items.get(id)
    }

    // --- Coordinate conversions ---

    /// Convert a pointer-space point to board coordinates. Returns `(0, 0)`
    /// when the container has no geometry yet.
    #[must_use]
    pub fn to_board_coords(&self, pointer: Point) -> Point {
        let Some(viewport) = self.viewport else {
            return Point::new(0.0, 0.0);
        };
        self.transform.to_board(pointer, viewport.origin)
    }

    /// Convert a board-space point to pointer coordinates. Returns `(0, 0)`
    /// when the container has no geometry yet.
    #[must_use]
    pub fn to_screen_coords(&self, board: Point) -> Point {
        let Some(viewport) = self.viewport else {
            return Point::new(0.0, 0.0);
        };
        self.transform.to_screen(board, viewport.origin)
    }

    /// Board coordinates of the visible viewport center; paste targets land
    /// here since a paste carries no cursor position.
    #[must_use]
    pub fn center_board_pos(&self) -> Point {
        let Some(viewport) = self.viewport else {
            return Point::new(
                -self.transform.pan_x / self.transform.scale,
                -self.transform.pan_y / self.transform.scale,
            );
        };
        self.to_board_coords(Point::new(
            viewport.origin.x + viewport.width / 2.0,
            viewport.origin.y + viewport.height / 2.0,
        ))
    }

    // --- Pointer events ---

    /// Pointer-down with the host's hit-test result. A press on an item
    /// starts an item drag; a press on empty board starts a pan. Ignored
    /// while another gesture is active.
    pub fn pointer_down(&mut self, pointer: Point, target: PointerTarget) -> Action {
        if self.gesture.is_active() {
            return Action::None;
        }
        self.gesture = match target {
            PointerTarget::Board => Gesture::Panning {
                grab: Point::new(pointer.x - self.transform.pan_x, pointer.y - self.transform.pan_y),
            },
            PointerTarget::Item { id, grab_offset } => Gesture::DraggingItem { id, grab_offset },
        };
        Action::None
    }

    /// Pointer-move. `rendered` is the transform the host painted this
    /// frame; item dragging uses it rather than the nominal transform so a
    /// drag stays glued to the pointer through render-frame lag.
    pub fn pointer_move(&mut self, pointer: Point, rendered: RenderedTransform) -> Action {
        match self.gesture {
            Gesture::Idle => Action::None,
            Gesture::Panning { grab } => {
                self.transform.pan_x = pointer.x - grab.x;
                self.transform.pan_y = pointer.y - grab.y;
                Action::Panned
            }
            Gesture::DraggingItem { id, grab_offset } => {
                let origin = self.viewport.map_or(Point::new(0.0, 0.0), |v| v.origin);
                let pos = rendered.item_position(pointer, origin, grab_offset);
                if self.items.update_position(&id, pos.x, pos.y) {
                    Action::ItemMoved { id, x: pos.x, y: pos.y }
                } else {
                    Action::None
                }
            }
        }
    }

    /// End the active gesture. The host also wires this to window-level
    /// pointer-up so an item drag ends even when the release happens over an
    /// embedded iframe that swallowed the event.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Pointer left the container; treated as a release.
    pub fn pointer_leave(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Wheel tick over the board. The host must have suppressed the default
    /// page scroll/zoom before calling. No-op until the container has
    /// geometry, since zoom-about-cursor needs the viewport origin.
    pub fn wheel(&mut self, pointer: Point, delta_y: f64) -> Action {
        let Some(viewport) = self.viewport else {
            return Action::None;
        };
        let cursor_offset =
            Point::new(pointer.x - viewport.origin.x, pointer.y - viewport.origin.y);
        self.transform.zoom_about(cursor_offset, delta_y);
        Action::Zoomed
    }

    // --- Item creation and mutation ---

    /// Insert an optimistic placeholder for a link and return its id, or
    /// `None` if `url` is not a valid absolute URL. The placeholder carries
    /// hostname-derived defaults; [`Self::apply_metadata`] upgrades it when
    /// the resolver answers.
    pub fn add_link(&mut self, url: &str, pos: Option<Point>) -> Option<ItemId> {
        let url = url.trim();
        let Ok(parsed) = Url::parse(url) else {
            return None;
        };
        let host = parsed.host_str().unwrap_or_default().to_owned();
        let pos = pos.unwrap_or_else(|| self.spawn_position());
        let item = BoardItem {
            id: Uuid::new_v4(),
            url: url.to_owned(),
            title: host.clone(),
            description: url.to_owned(),
            favicon: Some(fallback_favicon_url(&host)),
            image: None,
            x: pos.x,
            y: pos.y,
            is_image_only: false,
        };
        let id = item.id;
        self.items.insert(item);
        Some(id)
    }

    /// Insert an image-only item. `src` is whatever the host materialized
    /// from the file (data URL or object URL).
    pub fn add_image(&mut self, src: &str, name: &str, pos: Option<Point>) -> ItemId {
        let pos = pos.unwrap_or_else(|| self.spawn_position());
        let item = BoardItem {
            id: Uuid::new_v4(),
            url: src.to_owned(),
            title: name.to_owned(),
            description: String::new(),
            favicon: None,
            image: Some(src.to_owned()),
            x: pos.x,
            y: pos.y,
            is_image_only: true,
        };
        let id = item.id;
        self.items.insert(item);
        id
    }

    /// Place a drop payload at the pointer position. Each image of a
    /// multi-file drop is offset by [`MULTI_DROP_OFFSET`] board units from
    /// the previous one; a text payload only becomes a link if it starts
    /// with an http(s) scheme. Returns the created item ids.
    pub fn handle_drop(&mut self, payload: Payload, pointer: Point) -> Vec<ItemId> {
        let drop_pos = self.to_board_coords(pointer);
        self.place_payload(payload, drop_pos, true)
    }

    /// Place a paste payload at the visible board center; a paste carries no
    /// cursor coordinate. Returns the created item ids.
    pub fn handle_paste(&mut self, payload: Payload) -> Vec<ItemId> {
        let center = self.center_board_pos();
        self.place_payload(payload, center, false)
    }

    fn place_payload(&mut self, payload: Payload, pos: Point, stagger: bool) -> Vec<ItemId> {
        let mut created = Vec::new();
        for (index, image) in payload.images.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = if stagger { MULTI_DROP_OFFSET * index as f64 } else { 0.0 };
            let image_pos = Point::new(pos.x + offset, pos.y + offset);
            created.push(self.add_image(&image.src, &image.name, Some(image_pos)));
        }
        if let Some(text) = payload.text {
            let text = text.trim();
            if text.starts_with("http://") || text.starts_with("https://") {
                if let Some(id) = self.add_link(text, Some(pos)) {
                    created.push(id);
                }
            }
        }
        created
    }

    /// Patch a link item with a resolver result. Update-if-present: a miss
    /// (the item was removed while the fetch was in flight) returns false
    /// and changes nothing.
    pub fn apply_metadata(&mut self, id: &ItemId, patch: &MetadataPatch) -> bool {
        self.items.apply_metadata(id, patch)
    }

    /// Move an item to a new board position.
    pub fn update_item_position(&mut self, id: &ItemId, x: f64, y: f64) -> bool {
        self.items.update_position(id, x, y)
    }

    /// Delete an item. Returns false if it was already gone.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        self.items.remove(id).is_some()
    }

    /// Random screen point in the spawn region, converted to board coords.
    /// Used when an item is added without an explicit position.
    fn spawn_position(&mut self) -> Point {
        let mut rng = rand::rng();
        let screen = Point::new(
            rng.random_range(SPAWN_MIN_X..SPAWN_MAX_X),
            rng.random_range(SPAWN_MIN_Y..SPAWN_MAX_Y),
        );
        let origin = self.viewport.map_or(Point::new(0.0, 0.0), |v| v.origin);
        self.transform.to_board(screen, origin)
    }
}
