pub mod runner;

pub use runner::BowRunner;

use std::cell::RefCell;
use glam::Vec3;
use wasm_bindgen::prelude::*;
use fletch::BowConfig;

thread_local! {
    static RUNNER: RefCell<Option<BowRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut BowRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Bow not initialized. Call fletch_init() first.");
        f(runner)
    })
}

/// Create the session. An empty or invalid `config_json` falls back to defaults
/// (the parse error is logged).
#[wasm_bindgen]
pub fn fletch_init(width: f32, height: f32, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = if config_json.trim().is_empty() {
        BowConfig::default()
    } else {
        match BowConfig::from_json(config_json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("invalid bow config, using defaults: {}", e);
                BowConfig::default()
            }
        }
    };
    config.screen.width = width;
    config.screen.height = height;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(BowRunner::new(config));
    });
    log::info!("fletch: initialized ({}x{})", width, height);
}

#[wasm_bindgen]
pub fn fletch_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Touch report. Phase: 0 began, 1 moved, 2 stationary, 3 ended, 4 canceled.
#[wasm_bindgen]
pub fn fletch_touch(id: u32, x: f32, y: f32, phase: u32) {
    with_runner(|r| r.push_touch(id, x, y, phase));
}

#[wasm_bindgen]
pub fn fletch_mouse(x: f32, y: f32, pressed: bool, held: bool, released: bool) {
    with_runner(|r| r.set_mouse(x, y, pressed, held, released));
}

#[wasm_bindgen]
pub fn fletch_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn fletch_scene_reloaded() {
    with_runner(|r| r.scene_reloaded());
}

/// Bow position and forward axis; camera right is used when `has_camera`.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn fletch_set_spawn_anchor(
    px: f32, py: f32, pz: f32,
    fx: f32, fy: f32, fz: f32,
    rx: f32, ry: f32, rz: f32,
    has_camera: bool,
) {
    let right = has_camera.then(|| Vec3::new(rx, ry, rz));
    with_runner(|r| r.set_spawn_anchor(Vec3::new(px, py, pz), Vec3::new(fx, fy, fz), right));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_floats().as_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_shots_ptr() -> *const f32 {
    with_runner(|r| r.shots_floats().as_ptr())
}

#[wasm_bindgen]
pub fn get_shots_len() -> u32 {
    with_runner(|r| r.shots_len())
}

#[wasm_bindgen]
pub fn get_state() -> f32 {
    with_runner(|r| r.state_code())
}

#[wasm_bindgen]
pub fn get_preview_visible() -> bool {
    with_runner(|r| r.preview_visible())
}

#[wasm_bindgen]
pub fn get_preview() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(&r.preview_floats()[..]))
}

#[wasm_bindgen]
pub fn get_trajectory() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.trajectory_floats()))
}
