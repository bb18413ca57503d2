//! Per-tick integration of the animated scalars.
//!
//! Three quantities move independently every frame:
//!
//! - the ellipse radii ease toward their configured values,
//! - the rotation speed eases toward the configured speed (or zero while
//!   paused/disabled) and accumulates into `rotation_offset`,
//! - the selection offset follows its target, either by plain easing or by a
//!   damped spring when elasticity and decelleration are both positive.

use serde::{Deserialize, Serialize};

use crate::CarouselConfig;

/// Distance below which the selection animation counts as settled.
pub const SETTLE_EPSILON: f64 = 1e-3;

/// Move `current` a `1 / delay` fraction of the way to `target`.
///
/// First-order lag: never overshoots for `delay >= 1` and never lands exactly
/// on the target. A `delay <= 0` snaps straight to the target.
#[inline]
pub fn ease_to_target(current: &mut f64, target: f64, delay: f64) {
    if delay <= 0.0 {
        *current = target;
    } else if *current != target {
        *current += (target - *current) / delay;
    }
}

/// Mutable animation state advanced once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionState {
    /// Target horizontal radius.
    pub radius_x: f64,
    /// Target vertical radius.
    pub radius_y: f64,
    /// Eased horizontal radius used for layout.
    pub current_radius_x: f64,
    /// Eased vertical radius used for layout.
    pub current_radius_y: f64,
    /// Target auto-rotation speed in slots per tick.
    pub rotation_speed: f64,
    /// Eased rotation speed.
    pub current_rotation_speed: f64,
    /// Accumulated auto-rotation in slot units, kept within `(-N, N)`.
    pub rotation_offset: f64,
    /// Slot the selection animation is heading for.
    pub segment_offset_target: f64,
    /// Current animated selection position in slot units.
    pub segment_offset: f64,
    /// Spring velocity of the selection animation.
    pub segment_delta: f64,
    /// Auto-rotation switched on.
    pub rotation_enabled: bool,
    /// Auto-rotation temporarily held.
    pub rotation_paused: bool,
}

impl MotionState {
    /// Advance every animated scalar by one tick for a ring of `count` slots.
    pub fn step(&mut self, config: &CarouselConfig, count: usize) {
        self.step_selection(config);
        self.step_rotation(config.transition_delay, count);
        self.step_radius(config.transition_delay);
        tracing::trace!(
            segment_offset = self.segment_offset,
            rotation_offset = self.rotation_offset,
            speed = self.current_rotation_speed,
            "motion step"
        );
    }

    /// Ease both radii toward their targets.
    pub fn step_radius(&mut self, delay: f64) {
        ease_to_target(&mut self.current_radius_x, self.radius_x, delay);
        ease_to_target(&mut self.current_radius_y, self.radius_y, delay);
    }

    /// Ease the rotation speed and accumulate it into the rotation offset.
    ///
    /// The offset wraps with `%`, so it keeps the sign of the direction it
    /// was travelling in.
    #[allow(clippy::cast_precision_loss)] // Item counts fit in f64
    pub fn step_rotation(&mut self, delay: f64, count: usize) {
        let target = if self.rotation_enabled && !self.rotation_paused {
            self.rotation_speed
        } else {
            0.0
        };
        ease_to_target(&mut self.current_rotation_speed, target, delay);

        self.rotation_offset += self.current_rotation_speed;

        if count > 0 {
            let ring = count as f64;
            if self.rotation_offset.abs() > ring {
                self.rotation_offset %= ring;
            }
        }
    }

    /// Move the selection offset toward its target.
    pub fn step_selection(&mut self, config: &CarouselConfig) {
        let delay = config.transition_delay;
        if config.uses_bounce() {
            if delay <= 0.0 {
                self.segment_offset = self.segment_offset_target;
                self.segment_delta = 0.0;
                return;
            }
            self.segment_delta = (self.segment_offset_target - self.segment_offset)
                * config.decelleration
                + self.segment_delta * config.elasticity;
            self.segment_offset += self.segment_delta / delay;
        } else {
            ease_to_target(&mut self.segment_offset, self.segment_offset_target, delay);
        }
    }

    /// Whether the selection animation has come to rest on its target.
    #[must_use]
    pub fn selection_settled(&self) -> bool {
        (self.segment_offset_target - self.segment_offset).abs() < SETTLE_EPSILON
            && self.segment_delta.abs() < SETTLE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_moves_fraction_of_gap() {
        let mut current = 0.0;
        ease_to_target(&mut current, 10.0, 4.0);
        assert!((current - 2.5).abs() < 1e-12);
        ease_to_target(&mut current, 10.0, 4.0);
        assert!((current - 4.375).abs() < 1e-12);
    }

    #[test]
    fn test_ease_with_zero_delay_snaps() {
        let mut current = 3.0;
        ease_to_target(&mut current, -7.0, 0.0);
        assert!((current + 7.0).abs() < f64::EPSILON);

        let mut current = 3.0;
        ease_to_target(&mut current, 9.0, -2.0);
        assert!((current - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_radius_eases_unconditionally() {
        let mut state = MotionState {
            radius_x: 100.0,
            radius_y: 40.0,
            ..MotionState::default()
        };
        state.step_radius(2.0);
        assert!((state.current_radius_x - 50.0).abs() < 1e-12);
        assert!((state.current_radius_y - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_accumulates_only_when_running() {
        let mut state = MotionState {
            rotation_speed: 0.5,
            ..MotionState::default()
        };
        state.step_rotation(1.0, 4);
        assert!(state.rotation_offset.abs() < f64::EPSILON);

        state.rotation_enabled = true;
        state.step_rotation(1.0, 4);
        assert!((state.current_rotation_speed - 0.5).abs() < f64::EPSILON);
        assert!((state.rotation_offset - 0.5).abs() < f64::EPSILON);

        state.rotation_paused = true;
        state.step_rotation(2.0, 4);
        assert!((state.current_rotation_speed - 0.25).abs() < f64::EPSILON);
        assert!((state.rotation_offset - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotation_offset_wraps_keeping_sign() {
        let mut state = MotionState {
            rotation_speed: -1.5,
            current_rotation_speed: -1.5,
            rotation_offset: -3.0,
            rotation_enabled: true,
            ..MotionState::default()
        };
        state.step_rotation(1.0, 4);
        // -4.5 % 4 = -0.5
        assert!((state.rotation_offset + 0.5).abs() < 1e-12);

        state.rotation_offset = 3.5;
        state.rotation_speed = 1.0;
        state.current_rotation_speed = 1.0;
        state.step_rotation(1.0, 4);
        assert!((state.rotation_offset - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_with_empty_ring_does_not_wrap() {
        let mut state = MotionState {
            rotation_speed: 2.0,
            current_rotation_speed: 2.0,
            rotation_enabled: true,
            ..MotionState::default()
        };
        state.step_rotation(1.0, 0);
        state.step_rotation(1.0, 0);
        assert!((state.rotation_offset - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounce_overshoots_then_settles() {
        let config = CarouselConfig {
            transition_delay: 1.0,
            elasticity: 0.8,
            decelleration: 0.2,
            ..CarouselConfig::default()
        };
        let mut state = MotionState {
            segment_offset_target: 1.0,
            ..MotionState::default()
        };

        let mut overshot = false;
        for _ in 0..400 {
            state.step_selection(&config);
            if state.segment_offset > 1.0 + SETTLE_EPSILON {
                overshot = true;
            }
        }
        assert!(overshot);
        assert!(state.selection_settled());
    }

    #[test]
    fn test_bounce_with_zero_delay_snaps() {
        let config = CarouselConfig {
            elasticity: 0.5,
            decelleration: 0.5,
            ..CarouselConfig::default()
        };
        let mut state = MotionState {
            segment_offset_target: 3.0,
            segment_delta: 2.0,
            ..MotionState::default()
        };
        state.step_selection(&config);
        assert!((state.segment_offset - 3.0).abs() < f64::EPSILON);
        assert!(state.segment_delta.abs() < f64::EPSILON);
        assert!(state.segment_offset.is_finite());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_ease_never_overshoots(
                start in -1000.0f64..1000.0,
                target in -1000.0f64..1000.0,
                delay in 1.5f64..50.0,
                steps in 1usize..200,
            ) {
                let mut current = start;
                let sign = (target - start).signum();
                let mut gap = (target - start).abs();
                for _ in 0..steps {
                    ease_to_target(&mut current, target, delay);
                    let remaining = target - current;
                    prop_assert!(remaining == 0.0 || remaining.signum() == sign);
                    prop_assert!(remaining.abs() <= gap);
                    gap = remaining.abs();
                }
            }
        }
    }
}
