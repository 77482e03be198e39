use std::cell::RefCell;
use std::rc::Rc;

use hearth_core::error::HearthError;
use hearth_render::ember_painter::EmberPainter;
use hearth_render::surface::DrawSurface;
use hearth_sim::events::EventQueue;
use hearth_sim::frame_loop::{FrameLoop, FrameOutcome};
use hearth_sim::scene::EffectScene;
use wasm_bindgen::prelude::*;

use crate::canvas::{js_error, CanvasSurface, SkyCanvas};

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Main application struct. Owns the scene and both canvases.
pub struct Application {
    scene: EffectScene,
    events: Rc<RefCell<EventQueue>>,
    sky: SkyCanvas,
    overlay: CanvasSurface,
    painter: EmberPainter,
}

impl Application {
    pub fn new(
        scene: EffectScene,
        events: Rc<RefCell<EventQueue>>,
        sky: SkyCanvas,
        overlay: CanvasSurface,
    ) -> Self {
        let painter = EmberPainter::new(scene.field().params().pixel_scale);
        let mut app = Self {
            scene,
            events,
            sky,
            overlay,
            painter,
        };
        app.sync_overlay_size();
        app
    }

    /// Apply queued host events. Both loops call this, so whichever runs
    /// first after an input sees it.
    fn apply_pending(&mut self) {
        let applied = {
            let mut queue = self.events.borrow_mut();
            self.scene.drain(&mut queue)
        };
        if applied > 0 {
            self.sync_overlay_size();
        }
    }

    fn sync_overlay_size(&mut self) {
        let wanted = self.scene.viewport().surface_size();
        if self.overlay.size() != wanted {
            self.overlay.resize(wanted.0, wanted.1);
        }
    }

    /// Sky frame: sample colors at wall-clock time and repaint the background.
    fn sky_frame(&mut self) {
        self.apply_pending();
        let colors = self.scene.sample_sky(js_sys::Date::now());
        if let Err(e) = self.sky.paint(colors) {
            log::error!("Sky paint failed: {e}");
        }
    }

    /// Ember frame: one simulation tick, then a full overlay redraw.
    fn ember_frame(&mut self) {
        self.apply_pending();
        self.scene.tick_embers();
        self.painter
            .draw(&mut self.overlay, self.scene.field().embers(), self.scene.viewport());
    }

    /// Start the independent sky and ember loops.
    pub fn start_loops(app: Rc<RefCell<Self>>) -> Result<(), HearthError> {
        let sky_app = app.clone();
        start_loop("sky", move |_, _| sky_app.borrow_mut().sky_frame())?;
        start_loop("embers", move |_, _| app.borrow_mut().ember_frame())
    }
}

/// Start a requestAnimationFrame loop driving `frame`.
/// Creates the rAF closure ONCE and reschedules it from inside itself.
fn start_loop(name: &str, mut frame: impl FnMut(f64, f64) + 'static) -> Result<(), HearthError> {
    let closure: RafClosure = Rc::new(RefCell::new(None));
    let closure_clone = closure.clone();
    let mut frame_loop = FrameLoop::new(name);

    *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if frame_loop.step(timestamp, &mut frame) == FrameOutcome::Stopped {
            return;
        }
        if let Err(e) = request_frame(&closure_clone) {
            log::error!("{} loop halted: {e}", frame_loop.name());
            frame_loop.stop_handle().stop();
        }
    }) as Box<dyn FnMut(f64)>));

    // Kick off first frame
    request_frame(&closure)?;
    log::info!("Started {name} loop");
    Ok(())
}

fn request_frame(closure: &RafClosure) -> Result<(), HearthError> {
    let window = web_sys::window().ok_or_else(|| HearthError::ElementNotFound("window".into()))?;
    let callback = closure.borrow();
    let callback = callback
        .as_ref()
        .ok_or_else(|| HearthError::CanvasOperation("rAF closure missing".into()))?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| js_error("requestAnimationFrame", e))?;
    Ok(())
}
