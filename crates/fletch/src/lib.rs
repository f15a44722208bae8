pub mod api;
pub mod core;
pub mod input;
pub mod gesture;
pub mod aim;
pub mod shot;
pub mod session;

// Re-export key types at crate root for convenience
pub use api::config::{
    BowConfig, ScreenConfig, GestureConfig, AimConfig, ForceMode,
    ProjectileConfig, TrajectoryConfig, PreviewConfig,
};
pub use api::types::{PointerId, GestureState, GestureRecord, ShotRecord};
pub use crate::core::clock::FrameClock;
pub use input::{PointerEvent, PointerPhase, FrameInput, MouseSample, PointerSample, PointerTracker};
pub use gesture::{EventBus, GestureEvent, GestureEventKind, GestureMachine, GestureSnapshot, ListenerId};
pub use aim::{
    aim_angles, resolve, shot_force, predict_trajectory,
    AimAngles, AimResult, AimPreview, LaunchFrame,
};
pub use shot::{fire, ProjectileSpawner, ShotLog, ShotRequest, SpawnAnchor};
pub use session::BowSession;
