pub mod events;
pub mod machine;
pub mod snapshot;

pub use events::{EventBus, GestureEvent, GestureEventKind, ListenerId};
pub use machine::GestureMachine;
pub use snapshot::GestureSnapshot;
