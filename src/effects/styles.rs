use wasm_bindgen::prelude::*;

use crate::dom;

/// Keyframes and states the behaviors rely on but the page stylesheet
/// doesn't ship.
const INJECTED_CSS: &str = r#"
    @keyframes floatSoft {
        0%, 100% {
            transform: translateY(0);
        }
        50% {
            transform: translateY(-8px);
        }
    }
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
    .dud {
        color: var(--accent-light);
    }
    .nav-links a.active:not(.nav-cta),
    .mobile-menu a.active:not(.nav-cta) {
        color: var(--accent-light);
    }
    .nav-links a.active:not(.nav-cta)::after {
        width: 100%;
    }
"#;

pub fn inject_styles() -> Result<(), JsValue> {
    let document = dom::document()?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(INJECTED_CSS));
    document
        .head()
        .ok_or_else(|| JsValue::from_str("no head"))?
        .append_child(&style)?;
    Ok(())
}
