pub mod preview;
pub mod resolver;
pub mod trajectory;

pub use preview::AimPreview;
pub use resolver::{aim_angles, resolve, shot_force, AimAngles, AimResult, LaunchFrame};
pub use trajectory::predict_trajectory;
