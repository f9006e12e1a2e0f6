use log::info;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::observer::{ObserverConfig, VisibilityObserver};

/// Marks `[data-lazy]` elements `loaded` the first time they scroll into
/// view, then stops watching them.
pub fn init_lazy_loading() -> Result<(), JsValue> {
    let elements = dom::query_all("[data-lazy]")?;
    if elements.is_empty() {
        return Ok(());
    }

    let observer = VisibilityObserver::new(&ObserverConfig::lazy(), |event| {
        if event.is_intersecting {
            let _ = event.target.class_list().add_1("loaded");
            event.stop_observing();
        }
    })?;
    for el in &elements {
        observer.observe(el);
    }
    observer.leak();

    info!("Lazy loading wired for {} elements", elements.len());
    Ok(())
}
