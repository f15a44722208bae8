use std::collections::HashMap;
use glam::Vec2;
use crate::api::types::PointerId;

/// Movement (px) below which an update counts as jitter.
const MOVE_JITTER: f32 = 1.0;

/// One tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub start_position: Vec2,
    pub current_position: Vec2,
    pub previous_position: Vec2,
    /// Session time at pointer-down.
    pub start_time: f32,
    /// The last update moved more than a pixel. Informational only.
    pub is_moving: bool,
}

impl PointerSample {
    pub fn new(id: PointerId, position: Vec2, start_time: f32) -> Self {
        Self {
            id,
            start_position: position,
            current_position: position,
            previous_position: position,
            start_time,
            is_moving: false,
        }
    }

    pub fn update_position(&mut self, position: Vec2) {
        self.previous_position = self.current_position;
        self.current_position = position;
        self.is_moving = self.previous_position.distance(self.current_position) > MOVE_JITTER;
    }

    /// Pixels per second over the last update; zero for a non-positive `dt`.
    pub fn velocity(&self, dt: f32) -> Vec2 {
        if dt > 0.0 {
            (self.current_position - self.previous_position) / dt
        } else {
            Vec2::ZERO
        }
    }

    /// Offset from where the pointer went down.
    pub fn offset(&self) -> Vec2 {
        self.current_position - self.start_position
    }
}

/// All pointers currently down, keyed by id.
/// Which pointer is primary or secondary is decided by the gesture machine.
#[derive(Debug, Default)]
pub struct PointerTracker {
    samples: HashMap<PointerId, PointerSample>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) tracking a pointer.
    pub fn on_pointer_down(&mut self, id: PointerId, position: Vec2, now: f32) {
        self.samples.insert(id, PointerSample::new(id, position, now));
    }

    /// Update a tracked pointer. Returns false for unknown ids.
    pub fn on_pointer_move(&mut self, id: PointerId, position: Vec2) -> bool {
        match self.samples.get_mut(&id) {
            Some(sample) => {
                sample.update_position(position);
                true
            }
            None => false,
        }
    }

    /// Final position update before the pointer is removed.
    /// Returns false for unknown ids.
    pub fn on_pointer_up(&mut self, id: PointerId, position: Vec2) -> bool {
        self.on_pointer_move(id, position)
    }

    pub fn remove(&mut self, id: PointerId) -> Option<PointerSample> {
        self.samples.remove(&id)
    }

    /// Drop pointers the input source no longer reports, except `protected` ones.
    pub fn cleanup(&mut self, active: &[PointerId], protected: &[PointerId]) {
        self.samples.retain(|id, _| active.contains(id) || protected.contains(id));
    }

    pub fn get(&self, id: PointerId) -> Option<&PointerSample> {
        self.samples.get(&id)
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.samples.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_updates_previous_and_current() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_down(PointerId(1), Vec2::new(10.0, 10.0), 0.0);
        tracker.on_pointer_move(PointerId(1), Vec2::new(20.0, 10.0));
        let s = tracker.get(PointerId(1)).unwrap();
        assert_eq!(s.previous_position, Vec2::new(10.0, 10.0));
        assert_eq!(s.current_position, Vec2::new(20.0, 10.0));
        assert_eq!(s.start_position, Vec2::new(10.0, 10.0));
        assert!(s.is_moving);
    }

    #[test]
    fn sub_pixel_move_is_jitter() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_down(PointerId(1), Vec2::new(10.0, 10.0), 0.0);
        tracker.on_pointer_move(PointerId(1), Vec2::new(10.5, 10.0));
        assert!(!tracker.get(PointerId(1)).unwrap().is_moving);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.on_pointer_move(PointerId(3), Vec2::ZERO));
        assert!(!tracker.on_pointer_up(PointerId(3), Vec2::ZERO));
        assert!(tracker.is_empty());
    }

    #[test]
    fn velocity_uses_frame_delta() {
        let mut sample = PointerSample::new(PointerId(1), Vec2::ZERO, 0.0);
        sample.update_position(Vec2::new(0.0, 30.0));
        assert_eq!(sample.velocity(0.5), Vec2::new(0.0, 60.0));
        assert_eq!(sample.velocity(0.0), Vec2::ZERO);
    }

    #[test]
    fn cleanup_keeps_protected_pointers() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_down(PointerId(1), Vec2::ZERO, 0.0);
        tracker.on_pointer_down(PointerId(2), Vec2::ZERO, 0.0);
        tracker.on_pointer_down(PointerId(3), Vec2::ZERO, 0.0);
        tracker.cleanup(&[PointerId(3)], &[PointerId(1)]);
        assert!(tracker.contains(PointerId(1)));
        assert!(!tracker.contains(PointerId(2)));
        assert!(tracker.contains(PointerId(3)));
    }
}
