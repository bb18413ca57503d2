//! # Saorsa Carousel Core
//!
//! Tick-driven elliptical carousel layout and animation.
//! Compiles to WASM for browser hosts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               CarouselEngine                │
//! ├─────────────────────────────────────────────┤
//! │  Item Registry   │  Selection               │
//! │  - Dense slots   │  - Shortest path         │
//! │  - Handle index  │  - Notifications         │
//! ├─────────────────────────────────────────────┤
//! │  Motion          │  Pose Calculator         │
//! │  - Easing        │  - Ellipse position      │
//! │  - Spring bounce │  - Scale / opacity / z   │
//! │  - Rotation      │                          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Each frame the host calls [`CarouselEngine::tick`]: the motion state is
//! integrated first, then one [`Pose`] per item is computed from it. Commands
//! such as [`CarouselEngine::select`] or [`CarouselEngine::enable_rotation`]
//! run synchronously between ticks.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod item;
pub mod motion;
pub mod pose;
pub mod registry;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{CarouselConfig, Orientation, Preset};
pub use engine::CarouselEngine;
pub use error::{CarouselError, CarouselResult};
pub use event::{CarouselEvent, Command, CommandQueue, EventKind, Notifier, SubscriptionId};
pub use item::{Item, ItemId};
pub use motion::{ease_to_target, MotionState, SETTLE_EPSILON};
pub use pose::{Pose, PoseContext};
pub use registry::ItemRegistry;

/// Carousel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
