use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::bus::{EventBus, PageEvent, PointerPosition};
use crate::dom;

const EASE: f64 = 0.1;

/// Trails the pointer, closing a tenth of the gap every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowFollower {
    pub current: PointerPosition,
}

impl Default for GlowFollower {
    fn default() -> Self {
        Self { current: PointerPosition { x: 0.0, y: 0.0 } }
    }
}

impl GlowFollower {
    pub fn step(&mut self, target: PointerPosition) -> PointerPosition {
        self.current.x += (target.x - self.current.x) * EASE;
        self.current.y += (target.y - self.current.y) * EASE;
        self.current
    }
}

pub fn init_cursor_glow(bus: &EventBus) -> Result<(), JsValue> {
    let Some(glow) = dom::query(".cursor-glow")? else {
        return Ok(());
    };
    if dom::is_narrow_viewport() {
        return Ok(());
    }

    let target = Rc::new(Cell::new(PointerPosition { x: 0.0, y: 0.0 }));
    {
        let target = target.clone();
        bus.subscribe(move |event| {
            if let PageEvent::PointerMove { pointer, .. } = event {
                target.set(*pointer);
            }
        });
    }

    let mut follower = GlowFollower::default();
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let pos = follower.step(target.get());
        let _ = dom::set_style(&glow, "left", &format!("{}px", pos.x));
        let _ = dom::set_style(&glow, "top", &format!("{}px", pos.y));
        if let (Ok(window), Some(cb)) = (dom::window(), next.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    // Kick off the loop
    if let Some(cb) = frame.borrow().as_ref() {
        cb.as_ref().unchecked_ref::<js_sys::Function>().call0(&JsValue::NULL)?;
    }

    info!("Cursor glow running");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_a_tenth_of_the_gap() {
        let mut glow = GlowFollower::default();
        let pos = glow.step(PointerPosition { x: 100.0, y: -50.0 });
        assert_eq!(pos, PointerPosition { x: 10.0, y: -5.0 });
    }

    #[test]
    fn converges_on_a_still_pointer() {
        let mut glow = GlowFollower::default();
        let target = PointerPosition { x: 640.0, y: 360.0 };
        for _ in 0..200 {
            glow.step(target);
        }
        assert!((glow.current.x - target.x).abs() < 0.01);
        assert!((glow.current.y - target.y).abs() < 0.01);
    }
}
