use glam::Vec2;
use crate::api::types::PointerId;
use super::event::{PointerEvent, PointerPhase};

/// One frame's state of a single-button pointer (mouse).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseSample {
    pub position: Vec2,
    pub pressed_this_frame: bool,
    pub held: bool,
    pub released_this_frame: bool,
}

impl MouseSample {
    /// Map the button edges onto pointer 0. Press wins over hold, hold over release.
    pub fn to_pointer_event(&self) -> Option<PointerEvent> {
        let phase = if self.pressed_this_frame {
            PointerPhase::Began
        } else if self.held {
            PointerPhase::Moved
        } else if self.released_this_frame {
            PointerPhase::Ended
        } else {
            return None;
        };
        Some(PointerEvent::new(PointerId::MOUSE, self.position, phase))
    }
}

/// Input collected for one frame from both sources.
/// The host fills it; the session reads it once per tick and it is cleared.
pub struct FrameInput {
    touches: Vec<PointerEvent>,
    mouse: Option<MouseSample>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self {
            touches: Vec::with_capacity(10),
            mouse: None,
        }
    }

    /// Record a touch report (multi-touch adapter).
    pub fn push_touch(&mut self, event: PointerEvent) {
        self.touches.push(event);
    }

    /// Record this frame's mouse state (pointer adapter). Last write wins.
    pub fn set_mouse(&mut self, sample: MouseSample) {
        self.mouse = Some(sample);
    }

    /// Whether any touch was reported this frame.
    pub fn has_touch(&self) -> bool {
        !self.touches.is_empty()
    }

    /// The events to feed the gesture machine, in arrival order.
    /// Touch takes priority: if any touch was reported, the mouse is ignored.
    pub fn pointer_events(&self) -> Vec<PointerEvent> {
        if self.has_touch() {
            self.touches.clone()
        } else {
            self.mouse
                .as_ref()
                .and_then(MouseSample::to_pointer_event)
                .into_iter()
                .collect()
        }
    }

    /// Pointers the sources still report as down this frame.
    pub fn active_ids(&self) -> Vec<PointerId> {
        let mut ids: Vec<PointerId> = self
            .touches
            .iter()
            .filter(|e| e.phase.is_active())
            .map(|e| e.id)
            .collect();
        if self.mouse.map_or(false, |m| m.held) && !ids.contains(&PointerId::MOUSE) {
            ids.push(PointerId::MOUSE);
        }
        ids
    }

    /// Drop everything collected so far.
    pub fn clear(&mut self) {
        self.touches.clear();
        self.mouse = None;
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty() && self.mouse.is_none()
    }
}

impl Default for FrameInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(pressed: bool, held: bool, released: bool) -> MouseSample {
        MouseSample {
            position: Vec2::new(400.0, 400.0),
            pressed_this_frame: pressed,
            held,
            released_this_frame: released,
        }
    }

    #[test]
    fn touch_takes_priority_over_mouse() {
        let mut input = FrameInput::new();
        input.set_mouse(mouse(true, true, false));
        input.push_touch(PointerEvent::began(7, 500.0, 500.0));
        let events = input.pointer_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, PointerId(7));
    }

    #[test]
    fn mouse_used_without_touch() {
        let mut input = FrameInput::new();
        input.set_mouse(mouse(true, true, false));
        let events = input.pointer_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, PointerId::MOUSE);
        assert_eq!(events[0].phase, PointerPhase::Began);
    }

    #[test]
    fn mouse_edges_map_to_phases() {
        assert_eq!(mouse(false, true, false).to_pointer_event().unwrap().phase, PointerPhase::Moved);
        assert_eq!(mouse(false, false, true).to_pointer_event().unwrap().phase, PointerPhase::Ended);
        assert!(mouse(false, false, false).to_pointer_event().is_none());
    }

    #[test]
    fn active_ids_skip_ended_touches() {
        let mut input = FrameInput::new();
        input.push_touch(PointerEvent::moved(1, 500.0, 500.0));
        input.push_touch(PointerEvent::ended(2, 500.0, 500.0));
        input.set_mouse(mouse(false, true, false));
        let ids = input.active_ids();
        assert_eq!(ids, vec![PointerId(1), PointerId::MOUSE]);
    }

    #[test]
    fn clear_empties_frame() {
        let mut input = FrameInput::new();
        input.push_touch(PointerEvent::began(1, 500.0, 500.0));
        input.set_mouse(mouse(false, true, false));
        assert!(!input.is_empty());
        input.clear();
        assert!(input.is_empty());
        assert!(input.pointer_events().is_empty());
    }
}
