//! Turning a release into a projectile.
//!
//! The core never simulates flight. It hands a `ShotRequest` to whatever
//! implements `ProjectileSpawner` (a physics world, a network layer, a test
//! recorder) and forgets about it.

use glam::{Quat, Vec3};
use crate::aim::resolver::{resolve, AimResult, LaunchFrame};
use crate::api::config::AimConfig;
use crate::api::types::ShotRecord;
use crate::gesture::snapshot::GestureSnapshot;

/// Where arrows leave the bow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnAnchor {
    pub position: Vec3,
    pub frame: LaunchFrame,
}

impl SpawnAnchor {
    pub fn new(position: Vec3, frame: LaunchFrame) -> Self {
        Self { position, frame }
    }
}

/// Everything the physics collaborator needs to launch one arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub position: Vec3,
    /// Unit launch direction.
    pub direction: Vec3,
    /// Orientation for the spawned model.
    pub rotation: Quat,
    pub force: f32,
    /// Normalized pull at release. Informational; force is decided by the aim config.
    pub power: f32,
}

impl ShotRequest {
    pub fn from_aim(position: Vec3, aim: &AimResult) -> Self {
        Self {
            position,
            direction: aim.launch_direction,
            rotation: aim.rotation,
            force: aim.force,
            power: aim.power,
        }
    }

    /// Instantaneous impulse to apply: `direction * force`.
    pub fn impulse(&self) -> Vec3 {
        self.direction * self.force
    }

    pub fn to_record(&self) -> ShotRecord {
        ShotRecord {
            pos_x: self.position.x,
            pos_y: self.position.y,
            pos_z: self.position.z,
            dir_x: self.direction.x,
            dir_y: self.direction.y,
            dir_z: self.direction.z,
            force: self.force,
            power: self.power,
        }
    }
}

/// The projectile/physics collaborator.
pub trait ProjectileSpawner {
    /// Instantiate a projectile at `request.position` and apply `request.impulse()`.
    fn spawn(&mut self, request: &ShotRequest);
}

/// Collects requests instead of spawning anything. Handy for hosts that
/// read shots back in bulk, and for tests.
#[derive(Debug, Default)]
pub struct ShotLog {
    pub shots: Vec<ShotRequest>,
}

impl ShotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<ShotRequest> {
        std::mem::take(&mut self.shots)
    }
}

impl ProjectileSpawner for ShotLog {
    fn spawn(&mut self, request: &ShotRequest) {
        self.shots.push(*request);
    }
}

/// Resolve a release snapshot and hand the shot to the spawner.
/// Without an anchor nothing is fired and a warning is logged.
pub fn fire(
    snapshot: &GestureSnapshot,
    anchor: Option<&SpawnAnchor>,
    config: &AimConfig,
    spawner: &mut dyn ProjectileSpawner,
) -> Option<ShotRequest> {
    let Some(anchor) = anchor else {
        log::warn!("release ignored: no spawn anchor configured");
        return None;
    };

    let aim = resolve(snapshot, &anchor.frame, config);
    let request = ShotRequest::from_aim(anchor.position, &aim);
    log::debug!(
        "shoot: dir={} force={:.1} pitch={:.1} yaw={:.1}",
        request.direction,
        request.force,
        aim.pitch_deg,
        aim.yaw_deg
    );
    spawner.spawn(&request);
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn release_snapshot() -> GestureSnapshot {
        GestureSnapshot::from_positions(
            Vec2::new(500.0, 500.0),
            Vec2::new(450.0, 380.0),
            &AimConfig::default(),
        )
    }

    #[test]
    fn fire_spawns_resolved_shot() {
        let anchor = SpawnAnchor::new(Vec3::new(0.0, 1.5, 0.0), LaunchFrame::default());
        let mut log = ShotLog::new();
        let config = AimConfig::default();
        let shot = fire(&release_snapshot(), Some(&anchor), &config, &mut log).unwrap();

        assert_eq!(log.shots.len(), 1);
        assert_eq!(log.shots[0], shot);
        assert_eq!(shot.position, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(shot.force, config.max_force);

        let aim = resolve(&release_snapshot(), &anchor.frame, &config);
        assert_eq!(shot.direction, aim.launch_direction);
        assert_eq!(shot.impulse(), aim.impulse());
    }

    #[test]
    fn missing_anchor_fires_nothing() {
        let mut log = ShotLog::new();
        assert!(fire(&release_snapshot(), None, &AimConfig::default(), &mut log).is_none());
        assert!(log.shots.is_empty());
    }

    #[test]
    fn record_flattens_request() {
        let request = ShotRequest {
            position: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::Z,
            rotation: Quat::IDENTITY,
            force: 30.0,
            power: 0.5,
        };
        let r = request.to_record();
        assert_eq!((r.pos_x, r.pos_y, r.pos_z), (1.0, 2.0, 3.0));
        assert_eq!(r.dir_z, 1.0);
        assert_eq!(r.force, 30.0);
    }
}
