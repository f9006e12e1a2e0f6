use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> PointerPosition {
        PointerPosition {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent {
    Scroll(ScrollMetrics),
    PointerMove {
        pointer: PointerPosition,
        viewport: Viewport,
    },
}

type Subscriber = Box<dyn FnMut(&PageEvent)>;

/// Single-threaded fan-out of page events. Subscribers run synchronously in
/// the order they subscribed. A subscriber must not subscribe from inside
/// its own callback.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl FnMut(&PageEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    pub fn publish(&self, event: &PageEvent) {
        for subscriber in self.subscribers.borrow_mut().iter_mut() {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

pub fn sample_scroll() -> Result<ScrollMetrics, JsValue> {
    let window = dom::window()?;
    let scroll_height = dom::document()?
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    Ok(ScrollMetrics {
        scroll_y: window.scroll_y()?,
        scroll_height,
        viewport_height: window.inner_height()?.as_f64().unwrap_or(0.0),
    })
}

/// Feeds window scroll and document pointer movement into `bus`.
pub fn install_window_sources(bus: &EventBus) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let scroll_bus = bus.clone();
    dom::listen(&window, "scroll", move |_: web_sys::Event| {
        if let Ok(metrics) = sample_scroll() {
            scroll_bus.publish(&PageEvent::Scroll(metrics));
        }
    })?;

    let pointer_bus = bus.clone();
    dom::listen(&document, "mousemove", move |e: MouseEvent| {
        let Ok((width, height)) = dom::viewport_size() else {
            return;
        };
        pointer_bus.publish(&PageEvent::PointerMove {
            pointer: PointerPosition {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            },
            viewport: Viewport { width, height },
        });
    })?;

    log::info!("Window event sources installed ({} subscribers)", bus.len());
    Ok(())
}
