pub mod clock;
pub mod math;
