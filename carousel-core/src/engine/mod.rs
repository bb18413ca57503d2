//! The carousel engine: owns all state, advances it per tick and exposes the
//! command API.
//!
//! Split across files by concern:
//!
//! - `mod.rs` - construction, registry, configuration, tick
//! - `selection.rs` - selecting items, next/previous
//! - `rotation.rs` - auto-rotation, open, resize

mod rotation;
mod selection;

pub use selection::shortest_distance;

use crate::event::{Command, CommandQueue, Notifier, SubscriptionId};
use crate::motion::MotionState;
use crate::pose::{self, Pose, PoseContext};
use crate::{
    CarouselConfig, CarouselError, CarouselEvent, CarouselResult, EventKind, Item, ItemId,
    ItemRegistry, Orientation, Preset,
};

/// Default container width in pixels.
const DEFAULT_WIDTH: f64 = 800.0;

/// Default container height in pixels.
const DEFAULT_HEIGHT: f64 = 600.0;

/// A carousel instance.
///
/// Single-threaded and tick-driven: the host calls [`tick`](Self::tick) once
/// per frame and issues commands between ticks.
///
/// # Example
///
/// ```
/// use carousel_core::{CarouselConfig, CarouselEngine, Item};
///
/// let config = CarouselConfig::default()
///     .with_radius(200.0, 50.0)
///     .with_transition_delay(10.0);
/// let mut engine = CarouselEngine::with_config(800.0, 600.0, config).unwrap();
/// engine.register_items((0..6).map(|_| Item::new(80.0, 60.0)));
///
/// engine.next().unwrap();
/// let poses = engine.tick();
/// assert_eq!(poses.len(), 6);
/// ```
#[derive(Debug)]
pub struct CarouselEngine {
    registry: ItemRegistry,
    config: CarouselConfig,
    motion: MotionState,
    container_width: f64,
    container_height: f64,
    current_slot: usize,
    /// Slot whose Selected notification fires once the animation settles.
    pending_selected: Option<usize>,
    poses: Vec<Pose>,
    notifier: Notifier,
}

impl Default for CarouselEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl CarouselEngine {
    /// Create an engine for a container of the given size with the default
    /// configuration.
    ///
    /// A negative or non-finite size is logged and replaced by `0x0`; use
    /// [`with_config`](Self::with_config) to have it rejected instead.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let (width, height) = match rotation::check_container(width, height) {
            Ok(()) => (width, height),
            Err(e) => {
                tracing::warn!("Using an empty container: {e}");
                (0.0, 0.0)
            }
        };
        let mut engine = Self {
            registry: ItemRegistry::new(),
            config: CarouselConfig::default(),
            motion: MotionState::default(),
            container_width: width,
            container_height: height,
            current_slot: 0,
            pending_selected: None,
            poses: Vec::new(),
            notifier: Notifier::new(),
        };
        engine.apply_radii();
        engine
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfiguration`](crate::CarouselError::InvalidConfiguration)
    /// if the container size is negative or non-finite, or the configuration
    /// does not validate.
    pub fn with_config(width: f64, height: f64, config: CarouselConfig) -> CarouselResult<Self> {
        rotation::check_container(width, height)?;
        let mut engine = Self::new(width, height);
        engine.configure(config)?;
        Ok(engine)
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    /// Replace the item set. Slot `i` is assigned to the `i`-th item.
    pub fn register_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.registry.register(items);
        self.after_registry_change();
        tracing::info!("Registered {} carousel items", self.registry.len());
    }

    /// Append an item and return its slot.
    pub fn add_item(&mut self, item: Item) -> usize {
        let slot = self.registry.add(item);
        self.after_registry_change();
        tracing::debug!("Added item {} at slot {slot}", item.id);
        slot
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.after_registry_change();
        tracing::info!("Cleared carousel items");
    }

    fn after_registry_change(&mut self) {
        if self.current_slot >= self.registry.len() {
            self.current_slot = 0;
        }
        if self
            .pending_selected
            .is_some_and(|slot| slot >= self.registry.len())
        {
            self.pending_selected = None;
        }
        self.refresh_poses();
    }

    /// The item registry.
    #[must_use]
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Number of items on the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if the carousel has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Slot of the last confirmed selection.
    #[must_use]
    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// Handle of the last confirmed selection, if the carousel has items.
    #[must_use]
    pub fn current_item(&self) -> Option<ItemId> {
        self.registry.get(self.current_slot).map(|item| item.id)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Replace the whole configuration.
    ///
    /// Radii and rotation speed become the new animation targets; the eased
    /// values follow over the next ticks.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfiguration`](crate::CarouselError::InvalidConfiguration)
    /// and leaves the engine unchanged if the configuration does not validate.
    pub fn configure(&mut self, config: CarouselConfig) -> CarouselResult<()> {
        config.validate()?;
        self.config = config;
        self.motion.rotation_speed = config.rotation_speed;
        self.apply_radii();
        tracing::info!(
            radius_x = self.motion.radius_x,
            radius_y = self.motion.radius_y,
            transition_delay = config.transition_delay,
            bounce = config.uses_bounce(),
            "Carousel configured"
        );
        Ok(())
    }

    fn update_config(&mut self, change: impl FnOnce(&mut CarouselConfig)) -> CarouselResult<()> {
        let mut config = self.config;
        change(&mut config);
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected configuration change: {e}");
            return Err(e);
        }
        self.config = config;
        self.motion.rotation_speed = config.rotation_speed;
        self.apply_radii();
        Ok(())
    }

    /// Load a motion preset, keeping rotation speed and orientation.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.config = self.config.with_preset(preset);
        self.apply_radii();
        tracing::info!("Applied {preset:?} preset");
    }

    /// Set the horizontal radius (0 = half the container width).
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite radius.
    pub fn set_radius_x(&mut self, radius: f64) -> CarouselResult<()> {
        self.update_config(|c| c.radius_x = radius)
    }

    /// Set the vertical radius (0 = half the container height).
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite radius.
    pub fn set_radius_y(&mut self, radius: f64) -> CarouselResult<()> {
        self.update_config(|c| c.radius_y = radius)
    }

    /// Set the opacity bias.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite value.
    pub fn set_min_opacity(&mut self, min_opacity: f64) -> CarouselResult<()> {
        self.update_config(|c| c.min_opacity = min_opacity)
    }

    /// Set the side scale.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite value.
    pub fn set_min_scale(&mut self, min_scale: f64) -> CarouselResult<()> {
        self.update_config(|c| c.min_scale = min_scale)
    }

    /// Set the easing divisor.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite delay.
    pub fn set_transition_delay(&mut self, delay: f64) -> CarouselResult<()> {
        self.update_config(|c| c.transition_delay = delay)
    }

    /// Set the spring velocity retention.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite value.
    pub fn set_elasticity(&mut self, elasticity: f64) -> CarouselResult<()> {
        self.update_config(|c| c.elasticity = elasticity)
    }

    /// Set the spring pull.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite value.
    pub fn set_decelleration(&mut self, decelleration: f64) -> CarouselResult<()> {
        self.update_config(|c| c.decelleration = decelleration)
    }

    /// Set the target auto-rotation speed.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite speed.
    pub fn set_rotation_speed(&mut self, speed: f64) -> CarouselResult<()> {
        self.update_config(|c| c.rotation_speed = speed)
    }

    /// Set the layout orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
    }

    /// Swap between horizontal and vertical layout.
    pub fn toggle_orientation(&mut self) {
        self.config.orientation = self.config.orientation.toggled();
        tracing::debug!("Orientation now {:?}", self.config.orientation);
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current animation state.
    #[must_use]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Container size in pixels.
    #[must_use]
    pub fn container_size(&self) -> (f64, f64) {
        (self.container_width, self.container_height)
    }

    /// Resolve the target radii, deriving unset ones from the container.
    fn apply_radii(&mut self) {
        self.motion.radius_x = if self.config.radius_x == 0.0 {
            self.container_width / 2.0
        } else {
            self.config.radius_x
        };
        self.motion.radius_y = if self.config.radius_y == 0.0 {
            self.container_height / 2.0
        } else {
            self.config.radius_y
        };
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advance one frame and return the poses for it, in slot order.
    pub fn tick(&mut self) -> &[Pose] {
        self.motion.step(&self.config, self.registry.len());
        self.refresh_poses();
        self.fire_settled_selection();
        &self.poses
    }

    /// Poses computed by the last tick or command.
    #[must_use]
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Slots sorted back to front for painting.
    #[must_use]
    pub fn draw_order(&self) -> Vec<usize> {
        pose::draw_order(&self.poses)
    }

    pub(crate) fn refresh_poses(&mut self) {
        let ctx = PoseContext {
            count: self.registry.len(),
            segment_circle: self.registry.segment_circle(),
            container_width: self.container_width,
            container_height: self.container_height,
            motion: &self.motion,
            config: &self.config,
        };
        pose::compute_poses(self.registry.items(), &ctx, &mut self.poses);
    }

    fn fire_settled_selection(&mut self) {
        let Some(slot) = self.pending_selected else {
            return;
        };
        if !self.motion.selection_settled() {
            return;
        }
        self.pending_selected = None;
        if let Some(item) = self.registry.get(slot) {
            let id = item.id;
            tracing::debug!("Selection settled on slot {slot}");
            self.emit(&CarouselEvent::Selected(id));
        }
    }

    // ------------------------------------------------------------------
    // Notifications and commands
    // ------------------------------------------------------------------

    /// Subscribe to one kind of notification.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&CarouselEvent) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(kind, callback)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: &CarouselEvent) {
        self.notifier.emit(event);
    }

    /// Apply a host command.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn apply(&mut self, command: &Command) -> CarouselResult<()> {
        match command {
            Command::Select { slot, animate } => self.select(*slot, *animate),
            Command::SelectItem { id, animate } => self.select_item(*id, *animate),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::EnableRotation { enabled } => self.enable_rotation(*enabled),
            Command::ReverseRotation => {
                self.reverse_rotation();
                Ok(())
            }
            Command::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            Command::Open => {
                self.open();
                Ok(())
            }
            Command::Resize { width, height } => self.resize(*width, *height),
            Command::ToggleOrientation => {
                self.toggle_orientation();
                Ok(())
            }
            Command::ApplyPreset { preset } => {
                self.apply_preset(*preset);
                Ok(())
            }
        }
    }

    /// Apply everything in `queue`, including commands queued by the
    /// callbacks those commands fire, until it is empty.
    ///
    /// Rejected commands are logged and returned with their error; the rest
    /// still run.
    pub fn apply_queued(&mut self, queue: &CommandQueue) -> Vec<(Command, CarouselError)> {
        let mut rejected = Vec::new();
        loop {
            let pending = queue.take();
            if pending.is_empty() {
                return rejected;
            }
            for command in pending {
                if let Err(e) = self.apply(&command) {
                    tracing::warn!(?command, "Queued command rejected: {e}");
                    rejected.push((command, e));
                }
            }
        }
    }
}
