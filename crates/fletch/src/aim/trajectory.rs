use glam::Vec3;
use crate::api::config::TrajectoryConfig;

/// Upper bound on samples, whatever the config says.
const MAX_SAMPLES: usize = 512;

/// Sample the ballistic arc `p(t) = start + v0·t + ½·g·t²`.
///
/// The first point is `start`. Sampling stops at `max_time`. A shot launched
/// downward also stops after the first point more than `drop_tolerance` below
/// the launch height; level and upward shots always run the full time.
pub fn predict_trajectory(start: Vec3, velocity: Vec3, config: &TrajectoryConfig) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(48);
    points.push(start);

    if !(config.time_step > 0.0) || !(config.max_time > 0.0) {
        return points;
    }

    let steps = ((config.max_time / config.time_step) + 1e-4).floor() as usize;
    let steps = steps.min(MAX_SAMPLES);
    let gravity = config.gravity;

    for i in 1..=steps {
        let t = i as f32 * config.time_step;
        let pos = start + velocity * t + 0.5 * gravity * t * t;
        points.push(pos);

        if velocity.y < 0.0 && pos.y < start.y - config.drop_tolerance {
            break;
        }
    }
    points
}
