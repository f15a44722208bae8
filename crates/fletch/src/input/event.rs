use glam::Vec2;
use crate::api::types::PointerId;

/// Lifecycle phase of a pointer report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Moved,
    /// Still down, did not move this frame. Handled like `Moved`.
    Stationary,
    Ended,
    /// The platform took the pointer away. Handled like `Ended`.
    Canceled,
}

impl PointerPhase {
    /// Decode the numeric phase used by the WASM bridge (0..=4).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(PointerPhase::Began),
            1 => Some(PointerPhase::Moved),
            2 => Some(PointerPhase::Stationary),
            3 => Some(PointerPhase::Ended),
            4 => Some(PointerPhase::Canceled),
            _ => None,
        }
    }

    /// Whether a pointer reported with this phase is still down.
    pub fn is_active(self) -> bool {
        !matches!(self, PointerPhase::Ended | PointerPhase::Canceled)
    }
}

/// One pointer report in screen coordinates, independent of the source device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub position: Vec2,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(id: PointerId, position: Vec2, phase: PointerPhase) -> Self {
        Self { id, position, phase }
    }

    pub fn began(id: u32, x: f32, y: f32) -> Self {
        Self::new(PointerId(id), Vec2::new(x, y), PointerPhase::Began)
    }

    pub fn moved(id: u32, x: f32, y: f32) -> Self {
        Self::new(PointerId(id), Vec2::new(x, y), PointerPhase::Moved)
    }

    pub fn ended(id: u32, x: f32, y: f32) -> Self {
        Self::new(PointerId(id), Vec2::new(x, y), PointerPhase::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_codes_round_trip_known_values() {
        assert_eq!(PointerPhase::from_code(0), Some(PointerPhase::Began));
        assert_eq!(PointerPhase::from_code(4), Some(PointerPhase::Canceled));
        assert_eq!(PointerPhase::from_code(9), None);
    }

    #[test]
    fn ended_and_canceled_are_inactive() {
        assert!(PointerPhase::Stationary.is_active());
        assert!(!PointerPhase::Ended.is_active());
        assert!(!PointerPhase::Canceled.is_active());
    }
}
