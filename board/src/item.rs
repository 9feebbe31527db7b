//! Board item model and the in-memory store.
//!
//! `BoardItem` is a card on the canvas: a dropped/pasted link or image.
//! `MetadataPatch` is the sparse update applied when a resolver response
//! arrives for an optimistically inserted link. `ItemStore` owns all live
//! items; insertion order is paint order (later items draw on top).

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a board item.
pub type ItemId = Uuid;

/// A card on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardItem {
    /// Unique, stable for the item's lifetime.
    pub id: ItemId,
    /// The link target, or the image source for image-only items.
    pub url: String,
    /// Card heading; hostname until real metadata arrives.
    pub title: String,
    /// Card body text; the raw URL until real metadata arrives.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Left edge in board coordinates.
    pub x: f64,
    /// Top edge in board coordinates.
    pub y: f64,
    /// True for dropped/pasted images, which render without link chrome.
    #[serde(default)]
    pub is_image_only: bool,
}

/// Sparse metadata update for a link item. Only present, non-empty fields
/// are applied; the optimistic placeholder wins over a blank scrape result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn non_empty(field: Option<&String>) -> Option<&String> {
    field.filter(|value| !value.is_empty())
}

/// Insertion-ordered store of board items.
pub struct ItemStore {
    items: Vec<BoardItem>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item; it paints on top of everything inserted before it.
    pub fn insert(&mut self, item: BoardItem) {
        self.items.push(item);
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<BoardItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        Some(self.items.remove(index))
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&BoardItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Move an item to a new board position. Returns false if the item
    /// doesn't exist.
    pub fn update_position(&mut self, id: &ItemId, x: f64, y: f64) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            return false;
        };
        item.x = x;
        item.y = y;
        true
    }

    /// Apply a resolver patch to an existing item. A miss (the item was
    /// removed while the fetch was in flight) is a silent no-op returning
    /// false — late results are simply discarded.
    pub fn apply_metadata(&mut self, id: &ItemId, patch: &MetadataPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            return false;
        };
        if let Some(title) = non_empty(patch.title.as_ref()) {
            item.title = title.clone();
        }
        if let Some(description) = non_empty(patch.description.as_ref()) {
            item.description = description.clone();
        }
        if let Some(favicon) = non_empty(patch.favicon.as_ref()) {
            item.favicon = Some(favicon.clone());
        }
        if let Some(image) = non_empty(patch.image.as_ref()) {
            item.image = Some(image.clone());
        }
        true
    }

    /// All items in paint order (insertion order).
    pub fn iter(&self) -> impl Iterator<Item = &BoardItem> {
        self.items.iter()
    }

    /// Number of items currently on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the board has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
