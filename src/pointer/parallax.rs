use log::info;
use wasm_bindgen::prelude::*;

use crate::bus::{EventBus, PageEvent, PointerPosition, Viewport};
use crate::dom;

/// Translation of the `index`-th hero shape for a pointer position.
/// Shapes further down the list move faster, which reads as depth.
pub fn shape_offset(pointer: PointerPosition, viewport: Viewport, index: usize) -> (f64, f64) {
    let center = viewport.center();
    let x = (pointer.x - center.x) / 50.0;
    let y = (pointer.y - center.y) / 50.0;
    let speed = (index + 1) as f64 * 0.5;
    (x * speed, y * speed)
}

pub fn init_hero_parallax(bus: &EventBus) -> Result<(), JsValue> {
    if dom::query(".hero-shapes")?.is_none() || dom::is_narrow_viewport() {
        return Ok(());
    }
    let shapes = dom::query_all(".shape")?;
    let count = shapes.len();

    bus.subscribe(move |event| {
        let PageEvent::PointerMove { pointer, viewport } = *event else {
            return;
        };
        for (index, shape) in shapes.iter().enumerate() {
            let (dx, dy) = shape_offset(pointer, viewport, index);
            let _ = dom::set_style(shape, "transform", &format!("translate({}px, {}px)", dx, dy));
        }
    });

    info!("Hero parallax wired for {} shapes", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { width: 1000.0, height: 800.0 };

    #[test]
    fn centered_pointer_does_not_move_shapes() {
        let center = VIEWPORT.center();
        for index in 0..4 {
            assert_eq!(shape_offset(center, VIEWPORT, index), (0.0, 0.0));
        }
    }

    #[test]
    fn offset_scales_with_shape_index() {
        let pointer = PointerPosition { x: 1000.0, y: 0.0 };
        // (1000 - 500) / 50 = 10, (0 - 400) / 50 = -8
        assert_eq!(shape_offset(pointer, VIEWPORT, 0), (5.0, -4.0));
        assert_eq!(shape_offset(pointer, VIEWPORT, 1), (10.0, -8.0));
        assert_eq!(shape_offset(pointer, VIEWPORT, 3), (20.0, -16.0));
    }
}
