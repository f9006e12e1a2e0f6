use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config;
use crate::dom;
use crate::observer::{ObserverConfig, VisibilityObserver};

/// Tracks which page section the nav should point at.
///
/// There is no debouncing: during a fast scroll several sections may report
/// in quick succession and the last one wins, even when it is not the one
/// currently highest in the viewport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionTracker {
    active: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Makes `id` the only active section. Returns whether it changed.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.active.as_deref() == Some(id) {
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    pub fn link_is_active(&self, href: Option<&str>) -> bool {
        match (self.active.as_deref(), href.and_then(|h| h.strip_prefix('#'))) {
            (Some(active), Some(target)) => active == target,
            _ => false,
        }
    }
}

pub fn init_section_highlight() -> Result<(), JsValue> {
    let sections = dom::query_all(config::SECTION_SELECTOR)?;
    let links = dom::query_all(config::NAV_LINK_SELECTOR)?;
    let tracker = Rc::new(RefCell::new(SectionTracker::new()));

    let observer = VisibilityObserver::new(&ObserverConfig::sections(), move |event| {
        if !event.is_intersecting {
            return;
        }
        let Some(id) = event.target.get_attribute("id") else {
            return;
        };
        let mut tracker = tracker.borrow_mut();
        if tracker.activate(&id) {
            debug!("Active section: {:?} (ratio {:.2})", tracker.active(), event.ratio);
        }
        let _ = project_links(&tracker, &links);
    })?;

    for section in &sections {
        observer.observe(section);
    }
    observer.leak();

    info!("Section highlighting wired for {} sections", sections.len());
    Ok(())
}

fn project_links(tracker: &SectionTracker, links: &[Element]) -> Result<(), JsValue> {
    for link in links {
        let on = tracker.link_is_active(link.get_attribute("href").as_deref());
        dom::set_class(link, "active", on)?;
    }
    Ok(())
}
