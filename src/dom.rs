use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(collect(document()?.query_selector_all(selector)?))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(collect(root.query_selector_all(selector)?))
}

fn collect(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(selector: &str) -> Result<Option<Element>, JsValue> {
    document()?.query_selector(selector)
}

/// Like [`query`] but a missing element is an error.
pub fn require(selector: &str) -> Result<Element, JsValue> {
    query(selector)?.ok_or_else(|| JsValue::from_str(&format!("missing element: {}", selector)))
}

pub fn require_in(root: &Element, selector: &str) -> Result<Element, JsValue> {
    root.query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element: {}", selector)))
}

pub fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().set_property(property, value),
        None => Ok(()),
    }
}

pub fn clear_style(el: &Element, property: &str) -> Result<(), JsValue> {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().remove_property(property).map(|_| ()),
        None => Ok(()),
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    if on {
        el.class_list().add_1(class)
    } else {
        el.class_list().remove_1(class)
    }
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

pub fn is_narrow_viewport() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(crate::config::NARROW_VIEWPORT_QUERY).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Registers `callback` for the page lifetime.
pub fn listen<E>(
    target: &web_sys::EventTarget,
    event: &str,
    callback: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
