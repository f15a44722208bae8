use glam::Vec2;
use crate::aim::preview::AimPreview;
use crate::api::config::{BowConfig, ScreenConfig};
use crate::api::types::GestureState;
use crate::core::clock::FrameClock;
use crate::gesture::events::{EventBus, GestureEvent};
use crate::gesture::machine::GestureMachine;
use crate::gesture::snapshot::GestureSnapshot;
use crate::input::event::PointerEvent;
use crate::input::queue::FrameInput;
use crate::shot::{fire, ProjectileSpawner, ShotRequest, SpawnAnchor};

/// One gameplay session of the bow: input in, events, shots and preview out.
///
/// Owned by whoever runs the game loop and scoped to the active stage; there
/// is no global instance. Listeners subscribe through `events()`.
pub struct BowSession {
    config: BowConfig,
    machine: GestureMachine,
    clock: FrameClock,
    events: EventBus,
    anchor: Option<SpawnAnchor>,
    preview: AimPreview,
    /// Events published since the host last took them.
    pending_events: Vec<GestureEvent>,
    /// Shots fired since the host last took them.
    pending_shots: Vec<ShotRequest>,
}

impl BowSession {
    pub fn new(config: BowConfig) -> Self {
        let machine = GestureMachine::new(&config);
        Self {
            config,
            machine,
            clock: FrameClock::new(),
            events: EventBus::new(),
            anchor: None,
            preview: AimPreview::hidden(),
            pending_events: Vec::with_capacity(8),
            pending_shots: Vec::with_capacity(2),
        }
    }

    pub fn config(&self) -> &BowConfig {
        &self.config
    }

    /// The observer list. Clone it to keep a handle inside a listener.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        self.machine.snapshot(&self.clock)
    }

    pub fn preview(&self) -> &AimPreview {
        &self.preview
    }

    /// Events not yet taken, including any published by `cancel` or
    /// `scene_reloaded` between frames.
    pub fn pending_events(&self) -> &[GestureEvent] {
        &self.pending_events
    }

    pub fn pending_shots(&self) -> &[ShotRequest] {
        &self.pending_shots
    }

    /// Hand the queued events to the host. Call once per frame; nothing else
    /// empties the queue.
    pub fn take_events(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn take_shots(&mut self) -> Vec<ShotRequest> {
        std::mem::take(&mut self.pending_shots)
    }

    pub fn spawn_anchor(&self) -> Option<&SpawnAnchor> {
        self.anchor.as_ref()
    }

    /// Set where arrows leave the bow. `None` disables shooting and the preview.
    pub fn set_spawn_anchor(&mut self, anchor: Option<SpawnAnchor>) {
        if anchor.is_none() {
            log::warn!("spawn anchor cleared; releases will not fire");
        }
        self.anchor = anchor;
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        let screen = ScreenConfig { width, height };
        self.config.screen = screen;
        self.machine.set_screen(screen);
    }

    /// Run one frame: advance the clock, route this frame's pointers, drop
    /// pointers the host stopped reporting, refresh the preview.
    pub fn update(&mut self, input: &FrameInput, dt: f32, spawner: &mut dyn ProjectileSpawner) {
        self.clock.advance(dt);

        for event in input.pointer_events() {
            self.route(&event, spawner);
        }
        self.machine.cleanup(&input.active_ids());
        self.refresh_preview();
    }

    /// Route a single pointer event outside of `update`. Its events and shots
    /// queue with the rest until taken.
    pub fn handle_pointer(&mut self, event: &PointerEvent, spawner: &mut dyn ProjectileSpawner) {
        self.route(event, spawner);
        self.refresh_preview();
    }

    /// The host loaded another scene/level: drop the gesture and every tracked pointer.
    pub fn scene_reloaded(&mut self) {
        if let Some(event) = self.machine.reset_for_scene_change() {
            self.publish(event);
        }
        self.preview = AimPreview::hidden();
    }

    /// Cancel any gesture in progress (e.g. the stage timer ran out).
    pub fn cancel(&mut self) {
        if let Some(event) = self.machine.cancel() {
            self.publish(event);
        }
        self.preview = AimPreview::hidden();
    }

    fn route(&mut self, event: &PointerEvent, spawner: &mut dyn ProjectileSpawner) {
        let events = self.machine.handle(event, &self.clock);
        for gesture_event in events {
            self.publish(gesture_event);
            if let GestureEvent::Release(snapshot) = gesture_event {
                if let Some(shot) = fire(&snapshot, self.anchor.as_ref(), &self.config.aim, spawner) {
                    self.pending_shots.push(shot);
                }
            }
        }
        self.machine.complete_release();
    }

    fn publish(&mut self, event: GestureEvent) {
        self.events.dispatch(&event);
        self.pending_events.push(event);
    }

    fn refresh_preview(&mut self) {
        let snapshot = self.machine.snapshot(&self.clock);
        self.preview = AimPreview::build(self.machine.state(), &snapshot, self.anchor.as_ref(), &self.config);
    }

    /// Primary pull in screen space, zero outside a gesture.
    pub fn pull_vector(&self) -> Vec2 {
        self.snapshot().pull_vector()
    }
}
