use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::config;
use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle big enough to cover the button, centred where it was clicked.
/// `left`/`top` are relative to the button's box.
pub fn ripple_geometry(click_x: f64, click_y: f64, left: f64, top: f64, width: f64, height: f64) -> RippleGeometry {
    let size = width.max(height);
    RippleGeometry {
        size,
        left: click_x - left - size / 2.0,
        top: click_y - top - size / 2.0,
    }
}

fn spawn_ripple(button: &Element, e: &MouseEvent) -> Result<(), JsValue> {
    let rect = button.get_bounding_client_rect();
    let geometry = ripple_geometry(
        e.client_x() as f64,
        e.client_y() as f64,
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
    );

    let ripple = dom::document()?.create_element("span")?;
    ripple.set_attribute(
        "style",
        &format!(
            "position: absolute; border-radius: 50%; background: rgba(255, 255, 255, 0.3); \
             transform: scale(0); animation: ripple 0.6s ease-out; pointer-events: none; \
             width: {size}px; height: {size}px; left: {left}px; top: {top}px;",
            size = geometry.size,
            left = geometry.left,
            top = geometry.top,
        ),
    )?;

    dom::set_style(button, "position", "relative")?;
    dom::set_style(button, "overflow", "hidden")?;
    button.append_child(&ripple)?;

    Timeout::new(config::RIPPLE_DURATION_MS, move || ripple.remove()).forget();
    Ok(())
}

pub fn init_ripples() -> Result<(), JsValue> {
    for button in dom::query_all(".btn")? {
        let target = button.clone();
        dom::listen(&button, "click", move |e: MouseEvent| {
            let _ = spawn_ripple(&target, &e);
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_longer_side() {
        let g = ripple_geometry(0.0, 0.0, 0.0, 0.0, 200.0, 48.0);
        assert_eq!(g.size, 200.0);
    }

    #[test]
    fn centred_on_click() {
        // click at the middle of a 200x50 button placed at (100, 300)
        let g = ripple_geometry(200.0, 325.0, 100.0, 300.0, 200.0, 50.0);
        assert_eq!(g, RippleGeometry { size: 200.0, left: 0.0, top: -75.0 });
    }
}
