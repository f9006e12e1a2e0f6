use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;
use crate::observer::{ObserverConfig, VisibilityObserver};

const FRAMES: f64 = 60.0;

/// Counts a stat up from zero to the number it was authored with,
/// keeping whatever follows the number ("+", "%", "k", ...).
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    suffix: String,
    value: f64,
}

impl CounterAnimation {
    pub fn parse(text: &str) -> Option<Self> {
        let target = parse_leading_int(text)?;
        let suffix = text.replacen(&target.to_string(), "", 1);
        Some(Self { target, suffix, value: 0.0 })
    }

    /// Advances one frame and returns the text to show and whether it was the last.
    pub fn step(&mut self) -> (String, bool) {
        self.value += self.target as f64 / FRAMES;
        if self.value < self.target as f64 {
            (format!("{}{}", self.value.floor() as i64, self.suffix), false)
        } else {
            (format!("{}{}", self.target, self.suffix), true)
        }
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn run(el: Element, mut counter: CounterAnimation) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (text, done) = counter.step();
        el.set_text_content(Some(&text));
        if done {
            // drop the closure to end the loop
            next.borrow_mut().take();
            return;
        }
        if let (Ok(window), Some(cb)) = (dom::window(), next.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let (Ok(window), Some(cb)) = (dom::window(), frame.borrow().as_ref()) {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

pub fn init_counters() -> Result<(), JsValue> {
    let stats = dom::query_all(".stat")?;
    let observer = VisibilityObserver::new(&ObserverConfig::stats(), |event| {
        if !event.is_intersecting {
            return;
        }
        let Ok(Some(number)) = event.target.query_selector(".stat-number") else {
            return;
        };
        if number.has_attribute("data-animated") {
            return;
        }
        let _ = number.set_attribute("data-animated", "true");
        let text = number.text_content().unwrap_or_default();
        if let Some(counter) = CounterAnimation::parse(&text) {
            run(number, counter);
        }
    })?;

    for stat in &stats {
        observer.observe(stat);
    }
    observer.leak();

    info!("Stat counters wired for {} stats", stats.len());
    Ok(())
}
