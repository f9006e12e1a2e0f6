use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::bus::{EventBus, PageEvent};
use crate::config;
use crate::dom;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > config::NAV_SCROLLED_THRESHOLD
}

/// Inline styles for the three hamburger bars. `None` clears the property.
pub fn bar_styles(open: bool) -> [(&'static str, Option<&'static str>); 3] {
    if open {
        [
            ("transform", Some("rotate(45deg) translate(5px, 5px)")),
            ("opacity", Some("0")),
            ("transform", Some("rotate(-45deg) translate(5px, -5px)")),
        ]
    } else {
        [("transform", None), ("opacity", None), ("transform", None)]
    }
}

/// Where a smooth anchor jump should land so the target clears the fixed nav.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, nav_height: f64) -> f64 {
    target_top + scroll_y - nav_height
}

pub fn init_navigation(bus: &EventBus) -> Result<(), JsValue> {
    let nav = dom::require(".nav")?;
    bus.subscribe(move |event| {
        if let PageEvent::Scroll(metrics) = event {
            let _ = dom::set_class(&nav, "scrolled", is_scrolled(metrics.scroll_y));
        }
    });

    if let (Some(toggle), Some(menu)) = (dom::query(".nav-toggle")?, dom::query(".mobile-menu")?) {
        init_mobile_menu(toggle, menu)?;
    }
    info!("Navigation wired");
    Ok(())
}

fn render_menu(toggle: &Element, menu: &Element, open: bool) -> Result<(), JsValue> {
    dom::set_class(menu, "active", open)?;
    dom::set_class(toggle, "active", open)?;
    let bars = dom::query_all_in(toggle, "span")?;
    for (bar, (property, value)) in bars.iter().zip(bar_styles(open)) {
        match value {
            Some(value) => dom::set_style(bar, property, value)?,
            None => dom::clear_style(bar, property)?,
        }
    }
    Ok(())
}

fn init_mobile_menu(toggle: Element, menu: Element) -> Result<(), JsValue> {
    let open = Rc::new(Cell::new(false));

    {
        let open = open.clone();
        let (t, m) = (toggle.clone(), menu.clone());
        dom::listen(&toggle, "click", move |_: MouseEvent| {
            open.set(!open.get());
            debug!("Mobile menu open: {}", open.get());
            let _ = render_menu(&t, &m, open.get());
        })?;
    }

    for link in dom::query_all_in(&menu, "a")? {
        let open = open.clone();
        let (t, m) = (toggle.clone(), menu.clone());
        dom::listen(&link, "click", move |_: MouseEvent| {
            open.set(false);
            let _ = render_menu(&t, &m, false);
        })?;
    }
    Ok(())
}

/// In-page anchors glide to their section instead of jumping.
pub fn init_smooth_scroll() -> Result<(), JsValue> {
    for link in dom::query_all(r##"a[href^="#"]"##)? {
        let anchor = link.clone();
        dom::listen(&link, "click", move |e: MouseEvent| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            if href == "#" {
                return;
            }
            let Ok(Some(target)) = dom::query(&href) else {
                return;
            };
            e.prevent_default();
            let _ = scroll_to_target(&target);
        })?;
    }
    Ok(())
}

fn scroll_to_target(target: &Element) -> Result<(), JsValue> {
    let window = dom::window()?;
    let nav_height = dom::require(".nav")?
        .dyn_into::<HtmlElement>()
        .map(|nav| nav.offset_height() as f64)
        .unwrap_or(0.0);
    let top = anchor_scroll_top(target.get_bounding_client_rect().top(), window.scroll_y()?, nav_height);

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_after_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }

    #[test]
    fn closed_menu_clears_bar_styles() {
        assert!(bar_styles(false).iter().all(|(_, v)| v.is_none()));
        assert!(bar_styles(true).iter().all(|(_, v)| v.is_some()));
        assert_eq!(bar_styles(true)[1], ("opacity", Some("0")));
    }

    #[test]
    fn anchor_lands_below_nav() {
        assert_eq!(anchor_scroll_top(300.0, 1200.0, 80.0), 1420.0);
    }
}
