use log::{error, info, Level};
use wasm_bindgen::JsValue;

mod bus;
mod config;
mod dom;
mod nav;
mod observer;
mod scroll {
    pub mod counter;
    pub mod lazy;
    pub mod progress;
    pub mod reveal;
    pub mod sections;
}
mod pointer {
    pub mod glow;
    pub mod parallax;
    pub mod tilt;
}
mod modal {
    pub mod booking;
    pub mod state;
    pub mod submit;
}
mod effects {
    pub mod ripple;
    pub mod scramble;
    pub mod styles;
}
mod components {
    pub mod scroll_progress;
}

use bus::EventBus;

fn wire(name: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        error!("Failed to wire {}: {:?}", name, e);
    }
}

fn print_banner() {
    web_sys::console::log_2(
        &"%c Website Weaver ".into(),
        &"background: linear-gradient(90deg, #e8ecf2, #64748b); color: #1a2332; font-size: 20px; padding: 10px 20px; border-radius: 5px; font-weight: bold;".into(),
    );
    web_sys::console::log_2(
        &"%c Crafting digital masterpieces, one thread at a time. ".into(),
        &"color: #a0a0b0; font-size: 12px;".into(),
    );
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting page behaviors");

    let bus = EventBus::new();

    wire("styles", effects::styles::inject_styles());
    wire("cursor glow", pointer::glow::init_cursor_glow(&bus));
    wire("navigation", nav::init_navigation(&bus));
    wire("reveal animations", scroll::reveal::init_reveal());
    wire("hero intro", scroll::reveal::init_hero_intro());
    wire("hero parallax", pointer::parallax::init_hero_parallax(&bus));
    wire("card tilt", pointer::tilt::init_card_tilt());
    wire("floating stats", scroll::reveal::init_floating_stats());
    wire("smooth scroll", nav::init_smooth_scroll());
    wire("booking modal", modal::booking::init_modal());
    wire("stat counters", scroll::counter::init_counters());
    wire("scramble text", effects::scramble::init_scramble_text());
    wire("ripples", effects::ripple::init_ripples());
    wire("scroll progress", components::scroll_progress::mount_scroll_progress());
    wire("section highlight", scroll::sections::init_section_highlight());
    wire("lazy loading", scroll::lazy::init_lazy_loading());
    wire("event sources", bus::install_window_sources(&bus));

    print_banner();
}
