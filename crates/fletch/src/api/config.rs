use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Full tuning for a bow session. Every section falls back to its defaults,
/// so a JSON document only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BowConfig {
    pub screen: ScreenConfig,
    pub gesture: GestureConfig,
    pub aim: AimConfig,
    pub projectile: ProjectileConfig,
    pub trajectory: TrajectoryConfig,
    pub preview: PreviewConfig,
}

impl BowConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Screen dimensions in pixels, used by the border-cancel rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

impl ScreenConfig {
    /// Whether `pos` lies within `border` pixels of any screen edge.
    pub fn is_near_border(&self, pos: Vec2, border: f32) -> bool {
        pos.x < border
            || pos.x > self.width - border
            || pos.y < border
            || pos.y > self.height - border
    }
}

/// Gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pull distance (px) below which a gesture is a tap, not a shot.
    pub min_draw_distance: f32,
    /// Width (px) of the edge band that cancels gestures.
    pub cancel_border_size: f32,
    /// Cancel when the primary pointer is dragged upward past the minimum
    /// draw distance. Off by default; one game revision shipped with it on.
    pub cancel_on_upward_drag: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_draw_distance: 50.0,
            cancel_border_size: 100.0,
            cancel_on_upward_drag: false,
        }
    }
}

/// How shot force relates to the pull.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ForceMode {
    /// Every shot uses `max_force`; the pull only steers.
    #[default]
    Fixed,
    /// Force interpolates from `min_force` to `max_force` with normalized power.
    ScaledByPower { min_force: f32 },
}

/// Pull-to-angle mapping and shot force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Pull distance (px) that maps to full power and full angle.
    pub max_draw_distance: f32,
    /// Largest pitch offset in degrees.
    pub max_pitch_deg: f32,
    /// Largest yaw offset in degrees.
    pub max_yaw_deg: f32,
    pub max_force: f32,
    pub force_mode: ForceMode,
    /// When false the shot keeps the bow's pitch whatever the drag says.
    pub use_gesture_pitch: bool,
    /// When false the shot keeps the bow's heading.
    pub use_gesture_yaw: bool,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            max_draw_distance: 300.0,
            max_pitch_deg: 80.0,
            max_yaw_deg: 70.0,
            max_force: 30.0,
            force_mode: ForceMode::Fixed,
            use_gesture_pitch: true,
            use_gesture_yaw: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Arrow mass; turns the impulse into an initial velocity for prediction.
    pub mass: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self { mass: 1.0 }
    }
}

/// Ballistic preview sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub time_step: f32,
    pub max_time: f32,
    pub gravity: Vec3,
    /// How far below the launch height a downward shot may go before
    /// sampling stops.
    pub drop_tolerance: f32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            max_time: 2.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            drop_tolerance: 0.1,
        }
    }
}

/// Cosmetic scaling of the preview arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Grow the preview with power instead of always drawing it at
    /// `max_scale`. Visual only; shot force is unaffected.
    pub scale_by_power: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 1.5,
            scale_by_power: false,
        }
    }
}
