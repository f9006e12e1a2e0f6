use yew::prelude::*;
use yew_hooks::prelude::*;
use wasm_bindgen::JsValue;

use crate::bus::sample_scroll;
use crate::dom;
use crate::scroll::progress::progress_percent;

fn current_percent() -> f64 {
    sample_scroll().map(|m| progress_percent(&m)).unwrap_or(0.0)
}

#[function_component(ScrollProgressBar)]
pub fn scroll_progress_bar() -> Html {
    let percent = use_state(current_percent);

    {
        let percent = percent.clone();
        use_event_with_window("scroll", move |_: Event| {
            percent.set(current_percent());
        });
    }

    let style = format!(
        "position: fixed; \
         top: 0; \
         left: 0; \
         height: 3px; \
         background: linear-gradient(90deg, var(--accent-light), var(--accent-slate)); \
         z-index: 9999; \
         transition: width 0.1s ease; \
         width: {}%;",
        *percent
    );

    html! {
        <div class="scroll-progress" style={style}></div>
    }
}

/// Appends a host element to the body and renders the bar into it.
pub fn mount_scroll_progress() -> Result<(), JsValue> {
    let host = dom::document()?.create_element("div")?;
    dom::body()?.append_child(&host)?;
    yew::Renderer::<ScrollProgressBar>::with_root(host).render();
    Ok(())
}
