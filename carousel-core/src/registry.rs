//! Item registry: dense slot assignment in presentation order.

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::{CarouselError, CarouselResult, Item, ItemId};

/// Ordered set of carousel items.
///
/// Slot `i` always refers to `items[i]`; slots are dense and zero-based. A
/// reverse index gives O(1) handle lookups.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    slots: HashMap<ItemId, usize>,
    segment_circle: f64,
}

impl ItemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current item set. Slot `i` is assigned to `items[i]`.
    ///
    /// A handle that appears more than once keeps its first slot in the
    /// reverse index; the later copies are still laid out.
    pub fn register(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items = items.into_iter().collect();
        self.reindex();
    }

    /// Append one item and re-derive the slot set.
    ///
    /// Returns the slot assigned to the new item.
    pub fn add(&mut self, item: Item) -> usize {
        self.items.push(item);
        self.reindex();
        self.items.len() - 1
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.slots.clear();
        self.segment_circle = 0.0;
    }

    #[allow(clippy::cast_precision_loss)] // Item counts fit in f64
    fn reindex(&mut self) {
        self.slots.clear();
        for (slot, item) in self.items.iter().enumerate() {
            self.slots.entry(item.id).or_insert(slot);
        }
        self.segment_circle = if self.items.is_empty() {
            0.0
        } else {
            TAU / self.items.len() as f64
        };
    }

    /// Look up the slot of a handle.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ItemNotFound`] if the handle is not registered.
    pub fn slot_of(&self, id: ItemId) -> CarouselResult<usize> {
        self.slots
            .get(&id)
            .copied()
            .ok_or_else(|| CarouselError::ItemNotFound(id.to_string()))
    }

    /// Get the item in a slot.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.items.get(slot)
    }

    /// Get the item in a slot, failing if the slot is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ItemNotFound`] for a slot outside `0..len()`.
    pub fn require(&self, slot: usize) -> CarouselResult<&Item> {
        self.items.get(slot).ok_or_else(|| {
            CarouselError::ItemNotFound(format!("slot {slot} of {}", self.items.len()))
        })
    }

    /// Items in slot order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether a handle is registered.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Angular width of one slot in radians (`2π / N`, zero when empty).
    #[must_use]
    pub fn segment_circle(&self) -> f64 {
        self.segment_circle
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
