//! Interactive enhancements for the IslandBytes landing page.
//!
//! The module decorates markup the page already contains: parallax
//! decorations, the simulated terminal, scroll reveals, stat counters and a
//! few smaller touches. Anything missing from the page is simply skipped.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
pub mod error;
pub mod pages;
pub mod terminal;
pub mod utils;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    let (window, document) = match (utils::dom::window(), utils::dom::document()) {
        (Ok(window), Ok(document)) => (window, document),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Landing effects disabled: {}", e);
            return;
        }
    };

    if document.ready_state() != "loading" {
        mount(&window, &document);
        return;
    }

    let target = document.clone();
    let listener = utils::dom::listen_with_options(
        &target,
        "DOMContentLoaded",
        &utils::dom::once(),
        move |_| mount(&window, &document),
    );
    if let Err(e) = listener {
        log::warn!("Landing effects disabled: {}", e);
    }
}

fn mount(window: &web_sys::Window, document: &web_sys::Document) {
    let config = config::from_document(document);
    pages::landing::mount(window, document, &config);
}
