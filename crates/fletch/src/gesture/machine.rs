use glam::Vec2;
use crate::api::config::{AimConfig, BowConfig, GestureConfig, ScreenConfig};
use crate::api::types::{GestureState, PointerId};
use crate::core::clock::FrameClock;
use crate::input::event::{PointerEvent, PointerPhase};
use crate::input::tracker::PointerTracker;
use super::events::GestureEvent;
use super::snapshot::GestureSnapshot;

/// Turns pointer events into the bow gesture.
///
/// Only two pointers matter: the primary (pulls the string) and an optional
/// secondary (fine aim). Every other pointer is tracked but ignored.
///
/// A successful release leaves the machine in `Released` with
/// `[Release, DrawEnd]` returned; the owner fires the shot between the two
/// and then calls `complete_release`. Any further input completes a pending
/// release first.
#[derive(Debug)]
pub struct GestureMachine {
    gesture: GestureConfig,
    aim: AimConfig,
    screen: ScreenConfig,
    tracker: PointerTracker,
    state: GestureState,
    primary: Option<PointerId>,
    secondary: Option<PointerId>,
    draw_start: Vec2,
    draw_current: Vec2,
    draw_start_time: f32,
}

impl GestureMachine {
    pub fn new(config: &BowConfig) -> Self {
        Self {
            gesture: config.gesture,
            aim: config.aim,
            screen: config.screen,
            tracker: PointerTracker::new(),
            state: GestureState::Idle,
            primary: None,
            secondary: None,
            draw_start: Vec2::ZERO,
            draw_current: Vec2::ZERO,
            draw_start_time: 0.0,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn primary(&self) -> Option<PointerId> {
        self.primary
    }

    pub fn secondary(&self) -> Option<PointerId> {
        self.secondary
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    pub fn aim_config(&self) -> &AimConfig {
        &self.aim
    }

    /// Update screen dimensions (rotation, resize).
    pub fn set_screen(&mut self, screen: ScreenConfig) {
        self.screen = screen;
    }

    /// Route one pointer event. Returns the events to publish, in order.
    pub fn handle(&mut self, event: &PointerEvent, clock: &FrameClock) -> Vec<GestureEvent> {
        self.complete_release();
        match event.phase {
            PointerPhase::Began => self.pointer_down(event.id, event.position, clock),
            PointerPhase::Moved | PointerPhase::Stationary => {
                self.pointer_move(event.id, event.position, clock)
            }
            PointerPhase::Ended | PointerPhase::Canceled => {
                self.pointer_up(event.id, event.position, clock)
            }
        }
    }

    /// Current gesture, safe in any state. Neutral outside a gesture.
    pub fn snapshot(&self, clock: &FrameClock) -> GestureSnapshot {
        if self.primary.is_none() {
            return GestureSnapshot::neutral();
        }

        let aim_offset = self
            .secondary
            .and_then(|id| self.tracker.get(id))
            .map(|s| s.offset())
            .unwrap_or(Vec2::ZERO);
        let velocity = self
            .primary
            .and_then(|id| self.tracker.get(id))
            .map(|s| s.velocity(clock.dt()))
            .unwrap_or(Vec2::ZERO);

        GestureSnapshot::from_positions(self.draw_start, self.draw_current, &self.aim)
            .with_aim_offset(aim_offset)
            .with_velocity(velocity)
            .with_duration(clock.now() - self.draw_start_time)
    }

    /// Abandon the gesture. Emits `Cancel` only if one was in progress;
    /// always leaves no tracked pointers behind.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        let was_active = self.primary.is_some();
        self.reset();
        self.tracker.clear();
        if was_active {
            log::debug!("gesture cancelled");
            Some(GestureEvent::Cancel)
        } else {
            None
        }
    }

    /// Scene/level reload: total reset regardless of state, so no pointer id
    /// survives into the next scene.
    pub fn reset_for_scene_change(&mut self) -> Option<GestureEvent> {
        log::info!("scene changed, resetting gesture (state={:?})", self.state);
        self.cancel()
    }

    /// Finish a `Released` gesture once the shot has been handled.
    pub fn complete_release(&mut self) {
        if self.state == GestureState::Released {
            self.reset();
        }
    }

    /// Forget pointers the input source stopped reporting, keeping the
    /// primary and secondary until the gesture ends explicitly.
    pub fn cleanup(&mut self, active: &[PointerId]) {
        let protected: Vec<PointerId> = self.primary.into_iter().chain(self.secondary).collect();
        self.tracker.cleanup(active, &protected);
    }

    fn pointer_down(&mut self, id: PointerId, pos: Vec2, clock: &FrameClock) -> Vec<GestureEvent> {
        if self.is_near_border(pos) {
            log::debug!("pointer {:?} down at {} ignored: near border", id, pos);
            return Vec::new();
        }

        // A repeated Began for a pointer we already drive is just a move.
        if Some(id) == self.primary || Some(id) == self.secondary {
            return self.pointer_move(id, pos, clock);
        }

        self.tracker.on_pointer_down(id, pos, clock.now());

        match self.state {
            GestureState::Idle => {
                self.primary = Some(id);
                self.draw_start = pos;
                self.draw_current = pos;
                self.draw_start_time = clock.now();
                self.state = GestureState::Drawing;
                log::debug!("draw start: primary={:?} at {}", id, pos);
                vec![GestureEvent::DrawStart(self.snapshot(clock))]
            }
            GestureState::Drawing if self.secondary.is_none() => {
                self.secondary = Some(id);
                self.state = GestureState::Aiming;
                log::debug!("aiming: secondary={:?}", id);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn pointer_move(&mut self, id: PointerId, pos: Vec2, clock: &FrameClock) -> Vec<GestureEvent> {
        if !self.tracker.on_pointer_move(id, pos) {
            return Vec::new();
        }

        if self.state.is_pulling() && self.is_near_border(pos) {
            log::debug!("pointer {:?} reached border at {}", id, pos);
            return self.cancel().into_iter().collect();
        }

        if Some(id) == self.primary {
            self.draw_current = pos;
            let snapshot = self.snapshot(clock);
            if snapshot.distance < self.gesture.min_draw_distance {
                return Vec::new();
            }
            if self.gesture.cancel_on_upward_drag && snapshot.pull_vector().y > 0.0 {
                log::debug!("upward drag cancels gesture");
                return self.cancel().into_iter().collect();
            }
            return vec![GestureEvent::Drawing(snapshot)];
        }

        if Some(id) == self.secondary && self.state == GestureState::Aiming {
            return vec![GestureEvent::AimAdjust(self.snapshot(clock))];
        }

        Vec::new()
    }

    fn pointer_up(&mut self, id: PointerId, pos: Vec2, clock: &FrameClock) -> Vec<GestureEvent> {
        if !self.tracker.on_pointer_up(id, pos) {
            return Vec::new();
        }

        if Some(id) == self.primary {
            self.draw_current = pos;
            let snapshot = self.snapshot(clock);

            if !self.state.is_pulling() || snapshot.distance < self.gesture.min_draw_distance {
                log::debug!("release below minimum draw ({:.1}px), cancelling", snapshot.distance);
                return self.cancel().into_iter().collect();
            }

            self.tracker.remove(id);
            self.secondary = None;
            self.state = GestureState::Released;
            log::debug!(
                "release: distance={:.1} power={:.2} pitch={:.1} yaw={:.1}",
                snapshot.distance,
                snapshot.normalized_power,
                snapshot.pitch_deg,
                snapshot.yaw_deg
            );
            return vec![GestureEvent::Release(snapshot), GestureEvent::DrawEnd(snapshot)];
        }

        if Some(id) == self.secondary {
            self.secondary = None;
            if self.state == GestureState::Aiming {
                self.state = GestureState::Drawing;
                log::debug!("secondary lifted, back to drawing");
            }
        }

        self.tracker.remove(id);
        Vec::new()
    }

    fn is_near_border(&self, pos: Vec2) -> bool {
        self.screen.is_near_border(pos, self.gesture.cancel_border_size)
    }

    fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.primary = None;
        self.secondary = None;
        self.draw_start = Vec2::ZERO;
        self.draw_current = Vec2::ZERO;
    }
}
