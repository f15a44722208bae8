use bytemuck::{Pod, Zeroable};

/// Identifier of a tracked pointer (finger or mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The mouse is always reported as pointer 0.
    pub const MOUSE: PointerId = PointerId(0);
}

/// The single authoritative gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Primary pointer is pulling the string.
    Drawing,
    /// Primary pointer pulling, secondary pointer fine-aiming.
    Aiming,
    /// Transient: the shot is being fired this frame.
    Released,
}

impl GestureState {
    /// Drawing or Aiming: a pull is in progress.
    pub fn is_pulling(self) -> bool {
        matches!(self, GestureState::Drawing | GestureState::Aiming)
    }

    pub fn as_f32(self) -> f32 {
        match self {
            GestureState::Idle => 0.0,
            GestureState::Drawing => 1.0,
            GestureState::Aiming => 2.0,
            GestureState::Released => 3.0,
        }
    }
}

/// A gesture event flattened for SharedArrayBuffer-style reads.
/// `kind` is the `GestureEventKind` code.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GestureRecord {
    pub kind: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub current_x: f32,
    pub current_y: f32,
    pub distance: f32,
    pub power: f32,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
    pub aim_offset_x: f32,
    pub aim_offset_y: f32,
    pub duration: f32,
}

impl GestureRecord {
    pub const FLOATS: usize = 12;
}

/// A shot request flattened for the host's physics layer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShotRecord {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub dir_x: f32,
    pub dir_y: f32,
    pub dir_z: f32,
    pub force: f32,
    pub power: f32,
}

impl ShotRecord {
    pub const FLOATS: usize = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes_match_float_counts() {
        assert_eq!(std::mem::size_of::<GestureRecord>(), GestureRecord::FLOATS * 4);
        assert_eq!(std::mem::size_of::<ShotRecord>(), ShotRecord::FLOATS * 4);
    }

    #[test]
    fn only_drawing_and_aiming_pull() {
        assert!(!GestureState::Idle.is_pulling());
        assert!(GestureState::Drawing.is_pulling());
        assert!(GestureState::Aiming.is_pulling());
        assert!(!GestureState::Released.is_pulling());
    }
}
