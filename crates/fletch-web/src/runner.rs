use glam::Vec3;
use fletch::{
    BowConfig, BowSession, FrameInput, GestureRecord, LaunchFrame, MouseSample,
    PointerEvent, PointerId, PointerPhase, ShotLog, ShotRecord, SpawnAnchor,
};

/// Hosts one bow session for the browser.
///
/// JS pushes pointer reports between frames, calls `tick`, then reads the
/// flat event/shot buffers and the preview through the accessors.
pub struct BowRunner {
    session: BowSession,
    input: FrameInput,
    shots: ShotLog,
    event_buffer: Vec<GestureRecord>,
    shot_buffer: Vec<ShotRecord>,
    /// Preview arc as x, y, z triples.
    trajectory_buffer: Vec<f32>,
}

impl BowRunner {
    pub fn new(config: BowConfig) -> Self {
        Self {
            session: BowSession::new(config),
            input: FrameInput::new(),
            shots: ShotLog::new(),
            event_buffer: Vec::with_capacity(8),
            shot_buffer: Vec::with_capacity(2),
            trajectory_buffer: Vec::with_capacity(41 * 3),
        }
    }

    pub fn session(&self) -> &BowSession {
        &self.session
    }

    /// Queue a touch report. `phase` uses the `PointerPhase::from_code` numbering.
    pub fn push_touch(&mut self, id: u32, x: f32, y: f32, phase: u32) {
        match PointerPhase::from_code(phase) {
            Some(phase) => self
                .input
                .push_touch(PointerEvent::new(PointerId(id), glam::Vec2::new(x, y), phase)),
            None => log::warn!("touch {} ignored: unknown phase {}", id, phase),
        }
    }

    /// Record this frame's mouse state.
    pub fn set_mouse(&mut self, x: f32, y: f32, pressed: bool, held: bool, released: bool) {
        self.input.set_mouse(MouseSample {
            position: glam::Vec2::new(x, y),
            pressed_this_frame: pressed,
            held,
            released_this_frame: released,
        });
    }

    pub fn set_spawn_anchor(&mut self, position: Vec3, forward: Vec3, camera_right: Option<Vec3>) {
        let mut frame = LaunchFrame::new(forward);
        frame.camera_right = camera_right;
        self.session.set_spawn_anchor(Some(SpawnAnchor::new(position, frame)));
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_screen_size(width, height);
    }

    pub fn scene_reloaded(&mut self) {
        self.session.scene_reloaded();
        self.input.clear();
    }

    /// Run one frame and rebuild the flat buffers.
    pub fn tick(&mut self, dt: f32) {
        self.session.update(&self.input, dt, &mut self.shots);
        self.input.clear();

        self.event_buffer.clear();
        self.event_buffer
            .extend(self.session.take_events().iter().map(|e| e.to_record()));

        self.shot_buffer.clear();
        self.shot_buffer
            .extend(self.shots.drain().iter().map(|s| s.to_record()));
        self.session.take_shots();

        self.trajectory_buffer.clear();
        for p in &self.session.preview().trajectory {
            self.trajectory_buffer.extend_from_slice(&p.to_array());
        }
    }

    // ---- Flat buffer accessors ----

    pub fn events_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.event_buffer)
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn shots_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.shot_buffer)
    }

    pub fn shots_len(&self) -> u32 {
        self.shot_buffer.len() as u32
    }

    pub fn trajectory_floats(&self) -> &[f32] {
        &self.trajectory_buffer
    }

    // ---- State accessors ----

    pub fn state_code(&self) -> f32 {
        self.session.state().as_f32()
    }

    pub fn preview_visible(&self) -> bool {
        self.session.preview().visible
    }

    /// Preview as [pos xyz, rotation xyzw, scale, power].
    pub fn preview_floats(&self) -> [f32; 9] {
        let p = self.session.preview();
        let r = p.rotation.to_array();
        [
            p.position.x, p.position.y, p.position.z,
            r[0], r[1], r[2], r[3],
            p.scale, p.power,
        ]
    }
}
