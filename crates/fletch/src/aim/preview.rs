use glam::{Quat, Vec3};
use crate::api::config::BowConfig;
use crate::api::types::GestureState;
use crate::core::math::lerp;
use crate::gesture::snapshot::GestureSnapshot;
use crate::shot::SpawnAnchor;
use super::resolver::resolve;
use super::trajectory::predict_trajectory;

/// What the preview arrow and trajectory line should show this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AimPreview {
    pub visible: bool,
    pub position: Vec3,
    pub direction: Vec3,
    pub rotation: Quat,
    /// Model scale multiplier. Cosmetic only.
    pub scale: f32,
    pub power: f32,
    /// Predicted arc, starting at `position`. Empty while hidden.
    pub trajectory: Vec<Vec3>,
}

impl AimPreview {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 0.0,
            power: 0.0,
            trajectory: Vec::new(),
        }
    }

    /// Recompute from the current gesture.
    ///
    /// Shown only while pulling and past the minimum draw distance, so a bare
    /// tap never flashes an arrow. Direction and force come from the same
    /// resolver the shot uses.
    pub fn build(
        state: GestureState,
        snapshot: &GestureSnapshot,
        anchor: Option<&SpawnAnchor>,
        config: &BowConfig,
    ) -> Self {
        let Some(anchor) = anchor else {
            return Self::hidden();
        };
        if !state.is_pulling() || snapshot.distance < config.gesture.min_draw_distance {
            return Self::hidden();
        }

        let aim = resolve(snapshot, &anchor.frame, &config.aim);
        let preview = &config.preview;
        let scale = if preview.scale_by_power {
            lerp(preview.min_scale, preview.max_scale, aim.power)
        } else {
            preview.max_scale
        };

        let velocity = aim.initial_velocity(config.projectile.mass);
        let trajectory = predict_trajectory(anchor.position, velocity, &config.trajectory);

        Self {
            visible: true,
            position: anchor.position,
            direction: aim.launch_direction,
            rotation: aim.rotation,
            scale,
            power: aim.power,
            trajectory,
        }
    }
}

impl Default for AimPreview {
    fn default() -> Self {
        Self::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aim::resolver::LaunchFrame;
    use glam::Vec2;

    fn anchor() -> SpawnAnchor {
        SpawnAnchor::new(Vec3::new(0.0, 1.5, 0.0), LaunchFrame::default())
    }

    fn pulled(distance: f32) -> GestureSnapshot {
        GestureSnapshot::from_positions(
            Vec2::new(500.0, 500.0),
            Vec2::new(500.0, 500.0 - distance),
            &BowConfig::default().aim,
        )
    }

    #[test]
    fn hidden_when_idle_or_short() {
        let config = BowConfig::default();
        let a = anchor();
        assert!(!AimPreview::build(GestureState::Idle, &pulled(200.0), Some(&a), &config).visible);
        assert!(!AimPreview::build(GestureState::Drawing, &pulled(20.0), Some(&a), &config).visible);
        assert!(!AimPreview::build(GestureState::Drawing, &pulled(200.0), None, &config).visible);
    }

    #[test]
    fn visible_preview_matches_shot_direction() {
        let config = BowConfig::default();
        let a = anchor();
        let snapshot = pulled(200.0);
        let preview = AimPreview::build(GestureState::Aiming, &snapshot, Some(&a), &config);
        assert!(preview.visible);
        let aim = resolve(&snapshot, &a.frame, &config.aim);
        assert_eq!(preview.direction, aim.launch_direction);
        assert_eq!(preview.trajectory[0], a.position);
        assert_eq!(preview.scale, config.preview.max_scale);
    }

    #[test]
    fn cosmetic_scale_by_power() {
        let mut config = BowConfig::default();
        config.preview.scale_by_power = true;
        let preview = AimPreview::build(GestureState::Drawing, &pulled(150.0), Some(&anchor()), &config);
        assert!((preview.scale - 1.0).abs() < 1e-6);
    }
}
