//! Pose calculation: where each slot sits on the ellipse this frame.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::motion::MotionState;
use crate::{CarouselConfig, Item, ItemId, Orientation};

/// Placement of one item for one frame.
///
/// `x`/`y` are the item's top-left corner in container coordinates, chosen so
/// that the item's centre lands on its ellipse point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Slot of the item.
    pub slot: usize,
    /// Handle of the item.
    pub item: ItemId,
    /// Angle on the ring in radians (not wrapped).
    pub angle: f64,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Opacity; may leave `[0, 1]` unless clamping is configured.
    pub opacity: f64,
    /// Stacking order, larger draws on top.
    pub z_order: i32,
}

/// Everything the pose calculator reads, borrowed from the engine.
#[derive(Debug, Clone, Copy)]
pub struct PoseContext<'a> {
    /// Number of items on the ring.
    pub count: usize,
    /// Angular width of one slot (`2π / count`).
    pub segment_circle: f64,
    /// Container width in pixels.
    pub container_width: f64,
    /// Container height in pixels.
    pub container_height: f64,
    /// Current animation state.
    pub motion: &'a MotionState,
    /// Active configuration.
    pub config: &'a CarouselConfig,
}

impl PoseContext<'_> {
    /// Ring angle of a slot under the current rotation and selection offsets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Slot indices fit in f64
    pub fn angle(&self, slot: usize) -> f64 {
        let position_delta = slot as f64 / self.count as f64;
        TAU * position_delta + FRAC_PI_2
            - (self.motion.rotation_offset + self.motion.segment_offset) * self.segment_circle
    }
}

/// Compute the pose of `item` in `slot`.
///
/// Pure: reads the context only. `ctx.count` must be non-zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // z-order is a small bounded integer
pub fn compute_pose(slot: usize, item: &Item, ctx: &PoseContext<'_>) -> Pose {
    let angle = ctx.angle(slot);
    let (sin, cos) = angle.sin_cos();

    let mut x = ctx.container_width / 2.0 - item.width / 2.0;
    let mut y = ctx.container_height / 2.0 - item.height / 2.0;

    match ctx.config.orientation {
        Orientation::Vertical => {
            x += sin * ctx.motion.current_radius_y;
            y += cos * ctx.motion.current_radius_x;
        }
        Orientation::Horizontal => {
            x += cos * ctx.motion.current_radius_x;
            y += sin * ctx.motion.current_radius_y;
        }
    }

    let scale = ctx.config.min_scale + sin / 4.0;
    let mut opacity = 1.0 + ctx.config.min_opacity + sin;
    if ctx.config.clamp_opacity {
        opacity = opacity.clamp(0.0, 1.0);
    }

    Pose {
        slot,
        item: item.id,
        angle,
        x,
        y,
        scale,
        opacity,
        z_order: (scale * 1000.0).floor() as i32,
    }
}

/// Recompute the poses of every item into `out`, in slot order.
///
/// Reuses the capacity of `out`. Produces nothing for an empty ring.
pub fn compute_poses(items: &[Item], ctx: &PoseContext<'_>, out: &mut Vec<Pose>) {
    out.clear();
    if ctx.count == 0 {
        return;
    }
    out.extend(
        items
            .iter()
            .enumerate()
            .map(|(slot, item)| compute_pose(slot, item, ctx)),
    );
}

/// Slots sorted back to front: ascending z-order, ties by slot.
#[must_use]
pub fn draw_order(poses: &[Pose]) -> Vec<usize> {
    let mut order: Vec<&Pose> = poses.iter().collect();
    order.sort_by_key(|pose| pose.z_order);
    order.into_iter().map(|pose| pose.slot).collect()
}
