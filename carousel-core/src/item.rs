//! Carousel items - the drawables laid out around the ellipse.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle identifying an item supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An item handle together with its rendered bounding box.
///
/// Width and height are owned by the host; the engine only reads them to
/// centre the item on its ellipse point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Handle of the host drawable.
    pub id: ItemId,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Item {
    /// Create an item with a fresh handle and the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_id(ItemId::new(), width, height)
    }

    /// Create an item for an existing handle.
    #[must_use]
    pub fn with_id(id: ItemId, width: f64, height: f64) -> Self {
        Self { id, width, height }
    }
}
