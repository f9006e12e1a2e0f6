use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, KeyboardEvent, MouseEvent};

use crate::config;
use crate::dom;
use crate::modal::state::{BookingModal, ModalView};
use crate::modal::submit::{self, SubmitButton, SubmitEffect, SubmitError};

/// The markup the booking dialog is made of. All of it must exist.
#[derive(Clone)]
struct ModalElements {
    root: Element,
    header: Element,
    form: HtmlFormElement,
    success: Element,
}

impl ModalElements {
    fn find() -> Result<Self, JsValue> {
        let root = dom::require("#bookingModal")?;
        let header = dom::require_in(&root, ".modal-header")?;
        let form = dom::require("#bookingForm")?.dyn_into::<HtmlFormElement>()?;
        let success = dom::require("#formSuccess")?;
        Ok(Self { root, header, form, success })
    }

    fn render(&self, view: &ModalView) -> Result<(), JsValue> {
        dom::set_class(&self.root, "active", view.active)?;
        dom::set_class(&self.form, "hidden", view.form_hidden)?;
        dom::set_class(&self.header, "hidden", view.header_hidden)?;
        dom::set_class(&self.success, "show", view.success_shown)?;

        let body = dom::body()?;
        if view.scroll_locked {
            body.style().set_property("overflow", "hidden")
        } else {
            body.style().remove_property("overflow").map(|_| ())
        }
    }
}

#[derive(Clone)]
struct ModalController {
    modal: Rc<RefCell<BookingModal>>,
    elements: ModalElements,
}

impl ModalController {
    fn render(&self) {
        let view = self.modal.borrow().view();
        if let Err(e) = self.elements.render(&view) {
            log::warn!("Failed to render booking modal: {:?}", e);
        }
    }

    fn open(&self) {
        if !self.modal.borrow_mut().open() {
            return;
        }
        debug!("Booking modal opened");
        self.render();

        let root = self.elements.root.clone();
        Timeout::new(config::MODAL_FOCUS_DELAY_MS, move || {
            let first_input = root
                .query_selector("input")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(input) = first_input {
                let _ = input.focus();
            }
        })
        .forget();
    }

    fn close(&self) {
        if !self.modal.borrow_mut().close() {
            return;
        }
        debug!("Booking modal closed");
        self.render();

        let this = self.clone();
        Timeout::new(config::MODAL_RESET_DELAY_MS, move || {
            if this.modal.borrow_mut().finish_close() {
                this.elements.form.reset();
            }
            this.render();
        })
        .forget();
    }

    fn submit(&self, e: Event) {
        e.prevent_default();
        let form = self.elements.form.clone();
        let button = form
            .query_selector(".form-submit")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let body = FormData::new_with_form(&form).map_err(|e| SubmitError::Form(format!("{:?}", e)));

        self.apply(button.as_ref(), submit::begin_submit());

        let this = self.clone();
        spawn_local(async move {
            let result = match body {
                Ok(body) => submit::send_booking(body).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                gloo_console::error!("Error:", e.to_string());
            }

            let effects = submit::finish_submit(&mut this.modal.borrow_mut(), &result);
            this.apply(button.as_ref(), effects);
        });
    }

    fn apply(&self, button: Option<&HtmlButtonElement>, effects: Vec<SubmitEffect>) {
        for effect in effects {
            match effect {
                SubmitEffect::Button(state) => set_button(button, state),
                SubmitEffect::Render => self.render(),
                SubmitEffect::Alert(message) => {
                    if let Ok(window) = dom::window() {
                        let _ = window.alert_with_message(message);
                    }
                }
            }
        }
    }
}

fn set_button(button: Option<&HtmlButtonElement>, state: SubmitButton) {
    if let Some(button) = button {
        button.set_inner_html(state.label());
        button.set_disabled(state.disabled());
    }
}

/// Wires the booking dialog. Fails without wiring anything if any part of
/// the dialog markup is missing.
pub fn init_modal() -> Result<(), JsValue> {
    let elements = ModalElements::find()?;
    let overlay = dom::require_in(&elements.root, ".modal-overlay")?;
    let close_button = dom::require_in(&elements.root, ".modal-close")?;
    let controller = ModalController {
        modal: Rc::new(RefCell::new(BookingModal::new())),
        elements,
    };

    for button in dom::query_all(".open-modal")? {
        let c = controller.clone();
        dom::listen(&button, "click", move |e: MouseEvent| {
            e.prevent_default();
            c.open();
        })?;
    }

    let c = controller.clone();
    dom::listen(&overlay, "click", move |_: MouseEvent| c.close())?;

    let c = controller.clone();
    dom::listen(&close_button, "click", move |_: MouseEvent| c.close())?;

    let document = dom::document()?;
    let c = controller.clone();
    dom::listen(&document, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" && c.modal.borrow().is_open() {
            c.close();
        }
    })?;

    let c = controller.clone();
    dom::listen(&controller.elements.form, "submit", move |e: Event| c.submit(e))?;

    // The success pane's button calls `closeModal()` from inline markup.
    let c = controller.clone();
    let close_hook = Closure::wrap(Box::new(move || c.close()) as Box<dyn FnMut()>);
    let window = dom::window()?;
    js_sys::Reflect::set(&window, &JsValue::from_str("closeModal"), close_hook.as_ref())?;
    close_hook.forget();

    info!("Booking modal wired");
    Ok(())
}
