use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config;
use crate::dom;
use crate::observer::{ObserverConfig, VisibilityObserver};

const HIDDEN_OFFSET: &str = "translateY(30px)";
const SHOWN_OFFSET: &str = "translateY(0)";
const REVEAL_TRANSITION: &str = "all 0.8s cubic-bezier(0.16, 1, 0.3, 1)";

/// Scroll-in state of one revealable element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimatableElement {
    pub revealed: bool,
    /// Position among the children of a grid container, `-1` otherwise.
    pub stagger_index: i32,
}

/// What to apply the first time an element becomes visible.
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub transition_delay: Option<String>,
}

impl AnimatableElement {
    pub fn new(stagger_index: i32) -> Self {
        Self { revealed: false, stagger_index }
    }

    /// Returns the reveal to apply on the first intersecting event only.
    pub fn observe(&mut self, is_intersecting: bool) -> Option<Reveal> {
        if !is_intersecting || self.revealed {
            return None;
        }
        self.revealed = true;
        Some(Reveal {
            transition_delay: stagger_delay(self.stagger_index).map(|secs| format!("{}s", secs)),
        })
    }
}

/// Delay in seconds for the `index`-th child of a grid, `None` outside grids.
pub fn stagger_delay(index: i32) -> Option<f64> {
    (index >= 0).then(|| index as f64 / 10.0)
}

pub fn is_grid_container(class_names: &str) -> bool {
    class_names
        .split_whitespace()
        .any(|c| config::GRID_CONTAINER_CLASSES.contains(&c))
}

fn stagger_index_of(el: &Element) -> i32 {
    let Some(parent) = el.parent_element() else {
        return -1;
    };
    if !is_grid_container(&parent.class_name()) {
        return -1;
    }
    let siblings = parent.children();
    (0..siblings.length())
        .find(|&i| siblings.item(i).as_ref() == Some(el))
        .map(|i| i as i32)
        .unwrap_or(-1)
}

pub fn init_reveal() -> Result<(), JsValue> {
    let elements = dom::query_all(config::REVEAL_SELECTOR)?;
    let tracked: Rc<RefCell<Vec<(Element, AnimatableElement)>>> = Rc::new(RefCell::new(
        elements
            .iter()
            .map(|el| (el.clone(), AnimatableElement::new(stagger_index_of(el))))
            .collect(),
    ));

    let state = tracked.clone();
    let observer = VisibilityObserver::new(&ObserverConfig::reveal(), move |event| {
        let mut state = state.borrow_mut();
        let Some((el, anim)) = state.iter_mut().find(|(el, _)| *el == event.target) else {
            return;
        };
        if let Some(reveal) = anim.observe(event.is_intersecting) {
            debug!("Revealing element (stagger {})", anim.stagger_index);
            let _ = apply_reveal(el, &reveal);
        }
    })?;

    for el in &elements {
        dom::set_style(el, "opacity", "0")?;
        dom::set_style(el, "transform", HIDDEN_OFFSET)?;
        dom::set_style(el, "transition", REVEAL_TRANSITION)?;
        observer.observe(el);
    }
    observer.leak();

    info!("Reveal animations wired for {} elements", elements.len());
    Ok(())
}

fn apply_reveal(el: &Element, reveal: &Reveal) -> Result<(), JsValue> {
    if let Some(delay) = &reveal.transition_delay {
        dom::set_style(el, "transition-delay", delay)?;
    }
    el.class_list().add_1("visible")?;
    dom::set_style(el, "opacity", "1")?;
    dom::set_style(el, "transform", SHOWN_OFFSET)
}

pub fn hero_intro_delay_ms(index: usize) -> u32 {
    config::HERO_INTRO_BASE_DELAY_MS + index as u32 * config::HERO_INTRO_STEP_MS
}

/// Fades the hero copy in one line after another on load.
pub fn init_hero_intro() -> Result<(), JsValue> {
    for (index, el) in dom::query_all(".hero .animate-in")?.into_iter().enumerate() {
        Timeout::new(hero_intro_delay_ms(index), move || {
            let _ = el.class_list().add_1("visible");
        })
        .forget();
    }
    Ok(())
}

pub fn init_floating_stats() -> Result<(), JsValue> {
    for (index, el) in dom::query_all(".stat")?.iter().enumerate() {
        dom::set_style(el, "animation", "floatSoft 3s ease-in-out infinite")?;
        dom::set_style(el, "animation-delay", &format!("{}s", index as f64 * 2.0 / 10.0))?;
    }
    Ok(())
}
