//! Pull-to-launch mapping.
//!
//! One implementation feeds the preview arrow, the trajectory line and the
//! fired arrow, so all three agree on the aim bit for bit.

use glam::{Quat, Vec2, Vec3};
use crate::api::config::{AimConfig, ForceMode};
use crate::core::math::{fraction_of, lerp, normalize_or_zero};
use crate::gesture::snapshot::GestureSnapshot;

/// Angles derived from a screen-space drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AimAngles {
    /// Unit drag direction, or zero for a degenerate drag.
    pub drag_dir: Vec2,
    /// Drag length as a fraction of `max_draw_distance`, in [0, 1].
    pub normalized_distance: f32,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
}

/// Map a drag vector to pitch/yaw.
///
/// Angles scale with both direction and travel: a short drag aims almost
/// level whatever its heading. Yaw is mirrored (pull right, shoot left).
pub fn aim_angles(drag: Vec2, config: &AimConfig) -> AimAngles {
    let drag_dir = normalize_or_zero(drag);
    let normalized_distance = fraction_of(drag.length(), config.max_draw_distance);

    let max_pitch = config.max_pitch_deg.abs();
    let max_yaw = config.max_yaw_deg.abs();

    let raw_pitch = drag_dir.y * max_pitch * normalized_distance;
    let raw_yaw = -drag_dir.x * max_yaw * normalized_distance;

    AimAngles {
        drag_dir,
        normalized_distance,
        pitch_deg: raw_pitch.clamp(-max_pitch, max_pitch),
        yaw_deg: raw_yaw.clamp(-max_yaw, max_yaw),
    }
}

/// Where the shot is aimed from: the bow's forward axis and, when a camera
/// exists, the camera's right axis to pitch around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchFrame {
    pub forward: Vec3,
    pub camera_right: Option<Vec3>,
}

impl LaunchFrame {
    pub fn new(forward: Vec3) -> Self {
        Self {
            forward,
            camera_right: None,
        }
    }

    pub fn with_camera_right(mut self, right: Vec3) -> Self {
        self.camera_right = Some(right);
        self
    }

    /// Pitch axis: camera right, or world X without a camera.
    pub fn pitch_axis(&self) -> Vec3 {
        self.camera_right
            .map(|r| r.normalize_or_zero())
            .filter(|r| *r != Vec3::ZERO)
            .unwrap_or(Vec3::X)
    }
}

impl Default for LaunchFrame {
    fn default() -> Self {
        Self::new(Vec3::Z)
    }
}

/// Resolved launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimResult {
    /// Unit launch direction.
    pub launch_direction: Vec3,
    /// Yaw (about world up) composed with pitch (about the frame's right axis).
    pub rotation: Quat,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
    pub power: f32,
    pub force: f32,
}

impl AimResult {
    pub fn impulse(&self) -> Vec3 {
        self.launch_direction * self.force
    }

    /// Initial velocity of a body of `mass` receiving the impulse.
    pub fn initial_velocity(&self, mass: f32) -> Vec3 {
        if mass > 0.0 {
            self.impulse() / mass
        } else {
            Vec3::ZERO
        }
    }
}

/// Shot force for a given normalized power.
pub fn shot_force(config: &AimConfig, power: f32) -> f32 {
    match config.force_mode {
        ForceMode::Fixed => config.max_force,
        ForceMode::ScaledByPower { min_force } => lerp(min_force, config.max_force, power),
    }
}

/// Resolve a snapshot into a launch direction and force. Pure.
pub fn resolve(snapshot: &GestureSnapshot, frame: &LaunchFrame, config: &AimConfig) -> AimResult {
    let angles = aim_angles(snapshot.pull_vector(), config);
    let pitch_deg = if config.use_gesture_pitch { angles.pitch_deg } else { 0.0 };
    let yaw_deg = if config.use_gesture_yaw { angles.yaw_deg } else { 0.0 };

    let rotation = Quat::from_axis_angle(Vec3::Y, yaw_deg.to_radians())
        * Quat::from_axis_angle(frame.pitch_axis(), pitch_deg.to_radians());

    let forward = frame.forward.normalize_or_zero();
    let forward = if forward == Vec3::ZERO { Vec3::Z } else { forward };
    let launch_direction = (rotation * forward).normalize_or_zero();

    AimResult {
        launch_direction,
        rotation,
        pitch_deg,
        yaw_deg,
        power: angles.normalized_distance,
        force: shot_force(config, angles.normalized_distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(start: Vec2, current: Vec2) -> GestureSnapshot {
        GestureSnapshot::from_positions(start, current, &AimConfig::default())
    }

    #[test]
    fn straight_pull_up_half_distance() {
        let config = AimConfig::default();
        let a = aim_angles(Vec2::new(0.0, 150.0), &config);
        assert_eq!(a.drag_dir, Vec2::new(0.0, 1.0));
        assert!((a.normalized_distance - 0.5).abs() < 1e-6);
        assert!((a.pitch_deg - 40.0).abs() < 1e-4);
        assert!(a.yaw_deg.abs() < 1e-6);
    }

    #[test]
    fn angles_clamp_beyond_max_draw() {
        let config = AimConfig::default();
        for drag in [
            Vec2::new(0.0, 5000.0),
            Vec2::new(-5000.0, 0.0),
            Vec2::new(3000.0, -3000.0),
            Vec2::new(1e9, 1e9),
        ] {
            let a = aim_angles(drag, &config);
            assert!(a.pitch_deg.abs() <= config.max_pitch_deg);
            assert!(a.yaw_deg.abs() <= config.max_yaw_deg);
        }
    }

    #[test]
    fn angle_magnitude_grows_with_distance() {
        let config = AimConfig::default();
        let dir = Vec2::new(0.6, -0.8);
        let mut last_pitch = 0.0;
        let mut last_yaw = 0.0;
        for step in 1..=30 {
            let a = aim_angles(dir * (step as f32 * 10.0), &config);
            assert!(a.pitch_deg.abs() >= last_pitch);
            assert!(a.yaw_deg.abs() >= last_yaw);
            last_pitch = a.pitch_deg.abs();
            last_yaw = a.yaw_deg.abs();
        }
    }

    #[test]
    fn degenerate_inputs_are_neutral() {
        let a = aim_angles(Vec2::new(0.001, 0.0), &AimConfig::default());
        assert_eq!(a.pitch_deg, 0.0);
        assert_eq!(a.yaw_deg, 0.0);

        let zero_max = AimConfig {
            max_draw_distance: 0.0,
            ..AimConfig::default()
        };
        let a = aim_angles(Vec2::new(0.0, 200.0), &zero_max);
        assert_eq!(a.pitch_deg, 0.0);
        assert_eq!(a.normalized_distance, 0.0);
    }

    #[test]
    fn pull_right_yaws_left() {
        let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(650.0, 500.0));
        let r = resolve(&s, &LaunchFrame::default(), &AimConfig::default());
        assert!(r.yaw_deg < 0.0);
        assert!(r.launch_direction.x < 0.0);
    }

    #[test]
    fn pull_down_aims_up() {
        let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(500.0, 350.0));
        let r = resolve(&s, &LaunchFrame::default(), &AimConfig::default());
        assert!(r.pitch_deg < 0.0);
        assert!(r.launch_direction.y > 0.0);
    }

    #[test]
    fn zero_pull_keeps_forward() {
        let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(500.0, 500.0));
        let frame = LaunchFrame::new(Vec3::new(0.0, 0.0, 2.0));
        let r = resolve(&s, &frame, &AimConfig::default());
        assert!((r.launch_direction - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn direction_is_unit_and_force_fixed() {
        let config = AimConfig::default();
        let frame = LaunchFrame::new(Vec3::new(0.3, 0.1, 1.0))
            .with_camera_right(Vec3::new(1.0, 0.0, -0.3));
        for (dx, dy) in [(10.0, 60.0), (-200.0, 90.0), (120.0, -400.0)] {
            let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(500.0 + dx, 500.0 + dy));
            let r = resolve(&s, &frame, &config);
            assert!((r.launch_direction.length() - 1.0).abs() < 1e-5);
            assert_eq!(r.force, config.max_force);
        }
    }

    #[test]
    fn resolve_is_deterministic() {
        let config = AimConfig::default();
        let frame = LaunchFrame::new(Vec3::new(0.0, 0.2, 1.0)).with_camera_right(Vec3::X);
        let s = snapshot(Vec2::new(480.0, 520.0), Vec2::new(391.5, 611.25));
        let a = resolve(&s, &frame, &config);
        let b = resolve(&s, &frame, &config);
        assert_eq!(a.launch_direction.to_array(), b.launch_direction.to_array());
        assert_eq!(a.rotation.to_array(), b.rotation.to_array());
        assert_eq!(a.force.to_bits(), b.force.to_bits());
    }

    #[test]
    fn scaled_force_mode_follows_power() {
        let config = AimConfig {
            force_mode: ForceMode::ScaledByPower { min_force: 5.0 },
            ..AimConfig::default()
        };
        assert_eq!(shot_force(&config, 0.0), 5.0);
        assert_eq!(shot_force(&config, 1.0), 30.0);
        assert!((shot_force(&config, 0.5) - 17.5).abs() < 1e-6);
    }

    #[test]
    fn angle_toggles_pin_the_bow_axis() {
        let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(650.0, 350.0));
        let frame = LaunchFrame::default();

        let no_pitch = AimConfig { use_gesture_pitch: false, ..AimConfig::default() };
        let r = resolve(&s, &frame, &no_pitch);
        assert_eq!(r.pitch_deg, 0.0);
        assert!(r.yaw_deg < 0.0);
        assert!(r.launch_direction.y.abs() < 1e-6);

        let no_yaw = AimConfig { use_gesture_yaw: false, ..AimConfig::default() };
        let r = resolve(&s, &frame, &no_yaw);
        assert_eq!(r.yaw_deg, 0.0);
        assert!(r.pitch_deg < 0.0);
        assert!(r.launch_direction.x.abs() < 1e-6);

        let neither = AimConfig { use_gesture_pitch: false, use_gesture_yaw: false, ..AimConfig::default() };
        let r = resolve(&s, &frame, &neither);
        assert!((r.launch_direction - Vec3::Z).length() < 1e-6);
        // Power still follows the pull.
        assert!(r.power > 0.0);
    }

    #[test]
    fn initial_velocity_divides_by_mass() {
        let s = snapshot(Vec2::new(500.0, 500.0), Vec2::new(500.0, 500.0));
        let r = resolve(&s, &LaunchFrame::default(), &AimConfig::default());
        assert!((r.initial_velocity(2.0) - Vec3::new(0.0, 0.0, 15.0)).length() < 1e-5);
        assert_eq!(r.initial_velocity(0.0), Vec3::ZERO);
    }
}
