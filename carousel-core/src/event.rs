//! Notifications raised by the engine and commands pushed by the host.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{ItemId, Preset};

/// Kinds of notification a host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A selection was requested; fired before any state changes.
    Selecting,
    /// The selection animation came to rest on its target.
    Selected,
    /// The previously current item lost the selection.
    Deselected,
}

/// A notification carrying the affected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "item", rename_all = "lowercase")]
pub enum CarouselEvent {
    /// See [`EventKind::Selecting`].
    Selecting(ItemId),
    /// See [`EventKind::Selected`].
    Selected(ItemId),
    /// See [`EventKind::Deselected`].
    Deselected(ItemId),
}

impl CarouselEvent {
    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Selecting(_) => EventKind::Selecting,
            Self::Selected(_) => EventKind::Selected,
            Self::Deselected(_) => EventKind::Deselected,
        }
    }

    /// The item this event is about.
    #[must_use]
    pub const fn item(&self) -> ItemId {
        match self {
            Self::Selecting(id) | Self::Selected(id) | Self::Deselected(id) => *id,
        }
    }
}

/// Identifies one subscription so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CarouselEvent)>;

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

/// Observer lists, one logical list per [`EventKind`].
///
/// Callbacks run synchronously in subscription order.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl Notifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&CarouselEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber of its kind.
    pub fn emit(&mut self, event: &CarouselEvent) {
        let kind = event.kind();
        for subscriber in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            (subscriber.callback)(event);
        }
    }

    /// Number of subscribers for a kind.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.kind == kind).count()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Every command a host can push into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    /// Select the item in a slot.
    Select {
        /// Target slot.
        slot: usize,
        /// Animate the transition.
        animate: bool,
    },
    /// Select an item by handle.
    SelectItem {
        /// Target handle.
        id: ItemId,
        /// Animate the transition.
        animate: bool,
    },
    /// Select the following slot, wrapping at the end.
    Next,
    /// Select the preceding slot, wrapping at the start.
    Previous,
    /// Switch auto-rotation on or off.
    EnableRotation {
        /// New state.
        enabled: bool,
    },
    /// Flip the auto-rotation direction.
    ReverseRotation,
    /// Hold or release auto-rotation.
    TogglePause,
    /// Grow the ring out from the centre.
    Open,
    /// Container size changed.
    Resize {
        /// Container width in pixels.
        width: f64,
        /// Container height in pixels.
        height: f64,
    },
    /// Swap horizontal and vertical layout.
    ToggleOrientation,
    /// Load a motion preset.
    ApplyPreset {
        /// Preset to load.
        preset: Preset,
    },
}

/// Shared list of commands raised while the engine is busy.
///
/// Callbacks run while the engine is mutably borrowed, so they cannot issue
/// commands directly. They push onto a cloned queue instead and the host
/// hands the queue to [`CarouselEngine::apply_queued`](crate::CarouselEngine::apply_queued)
/// once the call that fired them has returned.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Rc<RefCell<Vec<Command>>>,
}

impl CommandQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }

    /// Take every queued command, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }
}
