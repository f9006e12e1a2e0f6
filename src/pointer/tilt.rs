use log::info;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use crate::bus::PointerPosition;
use crate::config;
use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Card rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub fn to_transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-8px)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Pointer below the card center tips the top edge away, pointer to the
/// right of center turns the card to the right.
pub fn card_tilt(pointer: PointerPosition, rect: CardRect) -> Tilt {
    let x = pointer.x - rect.left;
    let y = pointer.y - rect.top;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    Tilt {
        rotate_x: (y - center_y) / 20.0,
        rotate_y: (center_x - x) / 20.0,
    }
}

pub fn init_card_tilt() -> Result<(), JsValue> {
    let cards = dom::query_all(config::TILT_CARD_SELECTOR)?;

    for card in &cards {
        let target = card.clone();
        dom::listen(card, "mousemove", move |e: MouseEvent| {
            if dom::is_narrow_viewport() {
                return;
            }
            let bounds = target.get_bounding_client_rect();
            let tilt = card_tilt(
                PointerPosition { x: e.client_x() as f64, y: e.client_y() as f64 },
                CardRect {
                    left: bounds.left(),
                    top: bounds.top(),
                    width: bounds.width(),
                    height: bounds.height(),
                },
            );
            let _ = dom::set_style(&target, "transform", &tilt.to_transform());
        })?;

        let target = card.clone();
        dom::listen(card, "mouseleave", move |_: MouseEvent| {
            let _ = dom::clear_style(&target, "transform");
        })?;
    }

    info!("Card tilt wired for {} cards", cards.len());
    Ok(())
}
