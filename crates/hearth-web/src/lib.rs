mod accordion;
mod app;
mod canvas;
mod input;

pub use accordion::{AccordionChange, AccordionState};

use std::cell::RefCell;
use std::rc::Rc;

use hearth_core::error::HearthError;
use hearth_rules::ConfigError;
use hearth_sim::events::EventQueue;
use hearth_sim::rng::SimRng;
use hearth_sim::scene::EffectScene;
use wasm_bindgen::prelude::*;

/// WASM entry point. Sets panic hook and initializes logging.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    log::info!("Hearth starting...");

    if let Err(e) = run() {
        show_error_to_user(&format!("{e}"));
    }
}

/// Loads config, binds canvases and input, then starts both frame loops.
fn run() -> Result<(), HearthError> {
    let window = web_sys::window().ok_or_else(|| HearthError::ElementNotFound("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| HearthError::ElementNotFound("document".into()))?;

    let params = hearth_rules::load_default_params().map_err(config_error)?;

    let sky = canvas::SkyCanvas::new(&document, canvas::SKY_CANVAS_ID, params.sky.buffer_size)?;
    let overlay = canvas::CanvasSurface::new(&document, canvas::EMBER_CANVAS_ID)?;

    let viewport = input::read_viewport(&window);
    log::info!("Height scale: {}", viewport.height_scale);

    let seed_time = window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    let rng = SimRng::from_timestamp(seed_time);
    log::info!("Ember seed: {:#010x}", rng.seed());

    let scene = EffectScene::new(&params.sky, params.embers, viewport, rng);

    // Register input listeners ONCE
    let events = Rc::new(RefCell::new(EventQueue::new()));
    input::register_mode_buttons(&document, events.clone())?;
    input::register_resize_listener(&window, events.clone())?;
    accordion::bind(&document)?;

    let application = app::Application::new(scene, events, sky, overlay);
    app::Application::start_loops(Rc::new(RefCell::new(application)))
}

/// Bad color text keeps its typed error; everything else is reported as text.
fn config_error(e: ConfigError) -> HearthError {
    match e {
        ConfigError::Color(e) => HearthError::Color(e),
        other => HearthError::Config(other.to_string()),
    }
}

/// Show a user-visible error (not just console).
fn show_error_to_user(msg: &str) {
    log::error!("{msg}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("Hearth Error: {msg}"));
    }
}
