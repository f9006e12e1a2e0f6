use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverConfig {
    pub root_margin: &'static str,
    pub thresholds: Vec<f64>,
}

impl ObserverConfig {
    /// Scroll-in animations fire once a tenth of the element shows.
    pub fn reveal() -> Self {
        Self { root_margin: "0px", thresholds: vec![0.1] }
    }

    /// A section counts once its top is 100px under the viewport top and
    /// until its bottom passes the middle of the viewport.
    pub fn sections() -> Self {
        Self { root_margin: "-100px 0px -50% 0px", thresholds: vec![0.3] }
    }

    pub fn stats() -> Self {
        Self { root_margin: "0px", thresholds: vec![0.5] }
    }

    pub fn lazy() -> Self {
        Self { root_margin: "0px", thresholds: vec![0.0] }
    }

    fn to_init(&self) -> IntersectionObserverInit {
        let init = IntersectionObserverInit::new();
        init.set_root_margin(self.root_margin);
        let thresholds: Array = self.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        init.set_threshold(&thresholds);
        init
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityEvent {
    pub target: Element,
    pub is_intersecting: bool,
    pub ratio: f64,
    observer: IntersectionObserver,
}

impl VisibilityEvent {
    /// Stops further events for this event's target.
    pub fn stop_observing(&self) {
        self.observer.unobserve(&self.target);
    }
}

/// Owns an `IntersectionObserver` and the closure it calls. Entries are
/// delivered one by one in the order the browser reports them.
pub struct VisibilityObserver {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    pub fn new(
        config: &ObserverConfig,
        mut on_event: impl FnMut(VisibilityEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                on_event(VisibilityEvent {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                    observer: observer.clone(),
                });
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let inner = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &config.to_init(),
        )?;
        Ok(Self { inner, _callback: callback })
    }

    pub fn observe(&self, el: &Element) {
        self.inner.observe(el);
    }

    /// Keeps the observer alive for the rest of the page.
    pub fn leak(self) -> &'static VisibilityObserver {
        Box::leak(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_margin_is_top_and_bottom_biased() {
        let cfg = ObserverConfig::sections();
        assert_eq!(cfg.root_margin, "-100px 0px -50% 0px");
        assert_eq!(cfg.thresholds, vec![0.3]);
    }

    #[test]
    fn presets_use_single_thresholds() {
        assert_eq!(ObserverConfig::reveal().thresholds, vec![0.1]);
        assert_eq!(ObserverConfig::stats().thresholds, vec![0.5]);
        assert_eq!(ObserverConfig::lazy().thresholds, vec![0.0]);
    }
}
