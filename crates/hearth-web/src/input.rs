use std::cell::RefCell;
use std::rc::Rc;

use hearth_core::error::HearthError;
use hearth_core::types::ViewportMetrics;
use hearth_sim::events::{EventQueue, HostEvent};
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, Window};

use crate::canvas::js_error;

/// Button element ids and the mode each one selects.
pub const MODE_BUTTONS: [(&str, &str); 4] = [
    ("Midnight-btn", "midnight"),
    ("Morning-btn", "morning"),
    ("Twilight-btn", "twilight"),
    ("Cycle-btn", "cycle"),
];

/// Window inner size and full document scroll height.
fn host_size(window: &Window) -> (f64, f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    (width, height, document_height)
}

pub fn read_viewport(window: &Window) -> ViewportMetrics {
    let (width, height, document_height) = host_size(window);
    ViewportMetrics::new(width, height, document_height)
}

/// Register click listeners on the mode buttons ONCE at init.
/// Closures are leaked via `.forget()` since they live for the page lifetime.
pub fn register_mode_buttons(
    document: &Document,
    events: Rc<RefCell<EventQueue>>,
) -> Result<(), HearthError> {
    for (id, mode) in MODE_BUTTONS {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("Mode button '{id}' not found; '{mode}' is unreachable");
            continue;
        };
        let events = events.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
            events.borrow_mut().push(HostEvent::SetMode(mode.to_string()));
        });
        let target: &EventTarget = button.as_ref();
        target
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("click listener", e))?;
        closure.forget();
    }
    Ok(())
}

/// Queue a resize event whenever the window changes size.
pub fn register_resize_listener(
    window: &Window,
    events: Rc<RefCell<EventQueue>>,
) -> Result<(), HearthError> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
        if let Some(window) = web_sys::window() {
            let (width, height, document_height) = host_size(&window);
            events.borrow_mut().push(HostEvent::Resize {
                width,
                height,
                document_height,
            });
        }
    });
    let target: &EventTarget = window.as_ref();
    target
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| js_error("resize listener", e))?;
    closure.forget();
    Ok(())
}
