/// Session clock driven by the host's frame deltas.
/// Provides "now" for gesture timestamps and the last frame's delta for
/// pointer velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    /// Seconds since the clock started.
    now: f32,
    /// Delta of the most recent frame in seconds.
    dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. Negative or NaN deltas are treated as zero.
    pub fn advance(&mut self, frame_dt: f32) {
        let dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        self.dt = dt;
        self.now += dt;
    }

    /// Current time in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// The last frame's delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
