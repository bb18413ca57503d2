//! Selection: choosing the front item and the short way round to it.

use super::CarouselEngine;
use crate::{CarouselEvent, CarouselResult, ItemId};

/// Offset, relative to the target slot, that reaches the target the short way
/// round a ring of `count` slots.
///
/// `from` is the current selection offset plus the pending rotation offset.
/// On a tie the clockwise distance wins.
#[must_use]
pub fn shortest_distance(from: f64, target: f64, count: f64) -> f64 {
    let clockwise = from - target;
    let counterwise = count - clockwise.abs();

    if clockwise.abs() <= counterwise.abs() {
        clockwise
    } else if clockwise > 0.0 {
        -counterwise
    } else {
        counterwise
    }
}

impl CarouselEngine {
    /// Bring the item in `slot` to the front.
    ///
    /// Fires Selecting (new item) then Deselected (previous item) before any
    /// state changes. With a positive transition delay and `animate`, the
    /// selection offset is re-expressed relative to the target so the
    /// integrator travels the short way round; otherwise it jumps. Any
    /// accumulated rotation is folded in and auto-rotation is paused.
    /// Selected fires from [`tick`](Self::tick) once the animation settles.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ItemNotFound`](crate::CarouselError::ItemNotFound)
    /// for a slot outside the registry; no notifications fire in that case.
    #[allow(clippy::cast_precision_loss)] // Slot indices fit in f64
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn select(&mut self, slot: usize, animate: bool) -> CarouselResult<()> {
        let target = match self.registry.require(slot) {
            Ok(item) => item.id,
            Err(e) => {
                tracing::warn!("Rejected selection: {e}");
                return Err(e);
            }
        };

        self.emit(&CarouselEvent::Selecting(target));
        if let Some(previous) = self.current_item() {
            self.emit(&CarouselEvent::Deselected(previous));
        }

        let count = self.registry.len() as f64;
        if self.config.transition_delay > 0.0 && animate {
            let target_offset = slot as f64;
            let from = self.motion.segment_offset + self.motion.rotation_offset;
            self.motion.segment_offset_target = target_offset;
            self.motion.segment_offset =
                target_offset + shortest_distance(from, target_offset, count);
        } else {
            self.motion.segment_offset_target = slot as f64;
            self.motion.segment_offset = slot as f64;
            self.motion.segment_delta = 0.0;
        }

        if self.motion.rotation_offset != 0.0 {
            self.motion.rotation_offset = 0.0;
            self.motion.current_rotation_speed = 0.0;
            self.motion.rotation_paused = true;
        }

        self.current_slot = slot;
        self.pending_selected = Some(slot);
        self.refresh_poses();

        tracing::debug!(
            segment_offset = self.motion.segment_offset,
            "Selecting slot {slot} of {count}"
        );
        Ok(())
    }

    /// Bring an item to the front by handle. See [`select`](Self::select).
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ItemNotFound`](crate::CarouselError::ItemNotFound)
    /// if the handle is not registered.
    pub fn select_item(&mut self, id: ItemId, animate: bool) -> CarouselResult<()> {
        let slot = match self.registry.slot_of(id) {
            Ok(slot) => slot,
            Err(e) => {
                tracing::warn!("Rejected selection: {e}");
                return Err(e);
            }
        };
        self.select(slot, animate)
    }

    /// Select the following slot, wrapping to slot 0 after the last.
    ///
    /// Does nothing on an empty carousel.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`select`](Self::select).
    #[allow(clippy::should_implement_trait)] // Not an iterator
    pub fn next(&mut self) -> CarouselResult<()> {
        let count = self.registry.len();
        if count == 0 {
            tracing::debug!("Next ignored: no items");
            return Ok(());
        }
        self.select((self.current_slot + 1) % count, true)
    }

    /// Select the preceding slot, wrapping to the last slot before slot 0.
    ///
    /// Does nothing on an empty carousel.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`select`](Self::select).
    pub fn previous(&mut self) -> CarouselResult<()> {
        let count = self.registry.len();
        if count == 0 {
            tracing::debug!("Previous ignored: no items");
            return Ok(());
        }
        let previous = if self.current_slot == 0 {
            count - 1
        } else {
            self.current_slot - 1
        };
        self.select(previous, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarouselConfig, CarouselError, EventKind, Item};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn animated(n: usize) -> CarouselEngine {
        let config = CarouselConfig::default().with_transition_delay(10.0);
        let mut engine =
            CarouselEngine::with_config(800.0, 600.0, config).expect("valid config");
        engine.register_items((0..n).map(|_| Item::new(50.0, 50.0)));
        engine
    }

    #[test]
    fn test_shortest_distance_prefers_clockwise_for_near_slot() {
        // From offset 0 to slot 1 on a ring of 10: distance 1 beats 9.
        let d = shortest_distance(0.0, 1.0, 10.0);
        assert!((d + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shortest_distance_wraps_the_long_way_round() {
        // From offset 0 to slot 9 on a ring of 10: go back one slot.
        let d = shortest_distance(0.0, 9.0, 10.0);
        assert!((d - 1.0).abs() < f64::EPSILON);

        // From offset 9 to slot 0: forward one slot.
        let d = shortest_distance(9.0, 0.0, 10.0);
        assert!((d + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shortest_distance_tie_goes_clockwise() {
        let d = shortest_distance(0.0, 2.0, 4.0);
        assert!((d + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_animated_selection_starts_one_slot_away() {
        let mut engine = animated(10);
        engine.select(1, true).expect("slot exists");

        let motion = engine.motion();
        assert!((motion.segment_offset_target - 1.0).abs() < f64::EPSILON);
        assert!(motion.segment_offset.abs() < f64::EPSILON);
        assert_eq!(engine.current_slot(), 1);
    }

    #[test]
    fn test_animated_selection_keeps_angle_continuous() {
        let mut engine = animated(8);
        engine.select(7, true).expect("slot exists");

        // Offset is re-expressed as 8 (== 0 mod 8), not 7 slots away.
        let motion = engine.motion();
        assert!((motion.segment_offset - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_folds_rotation_and_pauses() {
        let config = CarouselConfig::default()
            .with_transition_delay(1.0)
            .with_rotation_speed(0.25);
        let mut engine = CarouselEngine::with_config(800.0, 600.0, config).expect("valid");
        engine.register_items((0..6).map(|_| Item::new(10.0, 10.0)));
        engine.enable_rotation(true).expect("speed set");
        engine.tick();
        engine.tick();
        let before = engine.motion().segment_offset + engine.motion().rotation_offset;
        assert!(before > 0.0);

        engine.select(2, true).expect("slot exists");
        let motion = engine.motion();
        assert!(motion.rotation_offset.abs() < f64::EPSILON);
        assert!(motion.current_rotation_speed.abs() < f64::EPSILON);
        assert!(motion.rotation_paused);
        assert!(motion.rotation_enabled);
        assert!((motion.segment_offset - before).abs() < 1e-12);
    }

    #[test]
    fn test_selection_after_reversed_rotation_keeps_angle_continuous() {
        let config = CarouselConfig::default()
            .with_transition_delay(1.0)
            .with_rotation_speed(0.25);
        let mut engine = CarouselEngine::with_config(800.0, 600.0, config).expect("valid");
        engine.register_items((0..6).map(|_| Item::new(10.0, 10.0)));
        engine.select(5, false).expect("slot exists");
        engine.enable_rotation(true).expect("speed set");
        engine.reverse_rotation();
        for _ in 0..18 {
            engine.tick();
        }

        let motion = *engine.motion();
        assert!((motion.rotation_offset + 4.5).abs() < 1e-12);
        let before = motion.segment_offset + motion.rotation_offset;

        // The target lies between the folded position and the raw offset,
        // so the direction must come from the folded position.
        engine.select(4, true).expect("slot exists");
        let after = engine.motion().segment_offset;
        let drift = (after - before).rem_euclid(6.0);
        assert!(drift < 1e-9 || 6.0 - drift < 1e-9, "drift {drift}");
        assert!((after - 6.5).abs() < 1e-12);
        assert!((after - engine.motion().segment_offset_target - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_notifications_fire_selecting_then_deselected() {
        let mut engine = animated(5);
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::Selecting, EventKind::Deselected, EventKind::Selected] {
            let log = Rc::clone(&log);
            engine.subscribe(kind, move |e| log.borrow_mut().push(*e));
        }
        let first = engine.registry().get(0).map(|i| i.id).expect("slot 0");
        let third = engine.registry().get(2).map(|i| i.id).expect("slot 2");

        engine.select(2, true).expect("slot exists");
        assert_eq!(
            *log.borrow(),
            vec![
                CarouselEvent::Selecting(third),
                CarouselEvent::Deselected(first)
            ]
        );

        for _ in 0..500 {
            engine.tick();
        }
        assert_eq!(log.borrow().last(), Some(&CarouselEvent::Selected(third)));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_newer_selection_supersedes_pending_selected() {
        let mut engine = animated(5);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        engine.subscribe(EventKind::Selected, move |e| sink.borrow_mut().push(e.item()));

        engine.select(1, true).expect("slot exists");
        engine.tick();
        engine.select(3, true).expect("slot exists");
        for _ in 0..500 {
            engine.tick();
        }

        let fourth = engine.registry().get(3).map(|i| i.id).expect("slot 3");
        assert_eq!(*selected.borrow(), vec![fourth]);
    }

    #[test]
    fn test_unknown_item_is_reported_without_notifications() {
        let mut engine = animated(3);
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        engine.subscribe(EventKind::Selecting, move |_| *counter.borrow_mut() += 1);

        let result = engine.select_item(ItemId::new(), true);
        assert!(matches!(result, Err(CarouselError::ItemNotFound(_))));
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(engine.current_slot(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut engine = animated(4);
        engine.previous().expect("has items");
        assert_eq!(engine.current_slot(), 3);
        engine.next().expect("has items");
        assert_eq!(engine.current_slot(), 0);
    }

    #[test]
    fn test_next_previous_on_empty_are_noops() {
        let mut engine = CarouselEngine::default();
        assert!(engine.next().is_ok());
        assert!(engine.previous().is_ok());
        assert!(matches!(
            engine.select(0, true),
            Err(CarouselError::ItemNotFound(_))
        ));
    }
}
