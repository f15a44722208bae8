use glam::Vec2;
use crate::aim::resolver::aim_angles;
use crate::api::config::AimConfig;
use crate::api::types::GestureRecord;

/// Value copy of the gesture at one instant. Consumers never hold a
/// reference into the machine; they get one of these.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSnapshot {
    pub start_position: Vec2,
    pub current_position: Vec2,
    /// Unit pull direction, zero for a degenerate pull.
    pub direction: Vec2,
    pub distance: f32,
    /// `distance / max_draw_distance`, clamped to [0, 1].
    pub normalized_power: f32,
    /// Screen-space heading of the pull in degrees.
    pub angle_deg: f32,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
    /// Primary pointer velocity in px/s.
    pub velocity: Vec2,
    /// Secondary pointer travel, zero without a secondary pointer.
    pub aim_offset: Vec2,
    /// Seconds since the draw started.
    pub duration: f32,
}

impl GestureSnapshot {
    /// The snapshot outside a gesture: everything zero.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Derive pull geometry and angles from two positions.
    pub fn from_positions(start: Vec2, current: Vec2, config: &AimConfig) -> Self {
        let pull = current - start;
        let angles = aim_angles(pull, config);
        let angle_deg = if pull == Vec2::ZERO {
            0.0
        } else {
            pull.y.atan2(pull.x).to_degrees()
        };
        Self {
            start_position: start,
            current_position: current,
            direction: angles.drag_dir,
            distance: pull.length(),
            normalized_power: angles.normalized_distance,
            angle_deg,
            pitch_deg: angles.pitch_deg,
            yaw_deg: angles.yaw_deg,
            velocity: Vec2::ZERO,
            aim_offset: Vec2::ZERO,
            duration: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_aim_offset(mut self, aim_offset: Vec2) -> Self {
        self.aim_offset = aim_offset;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// `current - start`.
    pub fn pull_vector(&self) -> Vec2 {
        self.current_position - self.start_position
    }

    /// Flatten into a record tagged with an event kind code.
    pub fn to_record(&self, kind: f32) -> GestureRecord {
        GestureRecord {
            kind,
            start_x: self.start_position.x,
            start_y: self.start_position.y,
            current_x: self.current_position.x,
            current_y: self.current_position.y,
            distance: self.distance,
            power: self.normalized_power,
            pitch_deg: self.pitch_deg,
            yaw_deg: self.yaw_deg,
            aim_offset_x: self.aim_offset.x,
            aim_offset_y: self.aim_offset.y,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_is_zero() {
        let s = GestureSnapshot::neutral();
        assert_eq!(s.start_position, Vec2::ZERO);
        assert_eq!(s.current_position, Vec2::ZERO);
        assert_eq!(s.distance, 0.0);
        assert_eq!(s.normalized_power, 0.0);
    }

    #[test]
    fn pull_geometry() {
        let s = GestureSnapshot::from_positions(
            Vec2::new(500.0, 500.0),
            Vec2::new(500.0, 650.0),
            &AimConfig::default(),
        );
        assert_eq!(s.distance, 150.0);
        assert_eq!(s.direction, Vec2::new(0.0, 1.0));
        assert!((s.normalized_power - 0.5).abs() < 1e-6);
        assert!((s.pitch_deg - 40.0).abs() < 1e-4);
        assert!((s.angle_deg - 90.0).abs() < 1e-4);
    }

    #[test]
    fn power_is_strictly_monotonic_below_max() {
        let config = AimConfig::default();
        let start = Vec2::new(500.0, 500.0);
        let near = GestureSnapshot::from_positions(start, start + Vec2::new(-30.0, -40.0), &config);
        let far = GestureSnapshot::from_positions(start, start + Vec2::new(-60.0, -80.0), &config);
        assert!(near.normalized_power < far.normalized_power);
        assert!(near.pitch_deg.abs() <= far.pitch_deg.abs());
        assert!(near.yaw_deg.abs() <= far.yaw_deg.abs());
    }

    #[test]
    fn record_carries_fields() {
        let s = GestureSnapshot::from_positions(
            Vec2::new(1.0, 2.0),
            Vec2::new(4.0, 6.0),
            &AimConfig::default(),
        )
        .with_aim_offset(Vec2::new(7.0, 8.0))
        .with_duration(1.5);
        let r = s.to_record(2.0);
        assert_eq!(r.kind, 2.0);
        assert_eq!(r.distance, 5.0);
        assert_eq!(r.aim_offset_x, 7.0);
        assert_eq!(r.duration, 1.5);
    }
}
