pub mod event;
pub mod queue;
pub mod tracker;

pub use event::{PointerEvent, PointerPhase};
pub use queue::{FrameInput, MouseSample};
pub use tracker::{PointerSample, PointerTracker};
