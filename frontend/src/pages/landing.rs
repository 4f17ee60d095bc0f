use web_sys::{Document, Window};

use crate::config::EffectsConfig;
use crate::effects::{
    counter, easter_egg, fallback, page, parallax, performance, reveal, scroll, touch,
};
use crate::error::EffectError;
use crate::terminal;

fn attach(name: &str, result: Result<(), EffectError>) {
    match result {
        Ok(()) => log::debug!("Mounted {}", name),
        Err(e) => log::warn!("Skipping {}: {}", name, e),
    }
}

/// Wires every landing page effect. A failing effect never prevents the
/// others from mounting.
pub fn mount(window: &Window, document: &Document, config: &EffectsConfig) {
    attach("parallax", parallax::mount(window, document, &config.parallax));
    attach("stats counter", counter::mount(document, &config.counter));
    attach("terminal", terminal::mount(document, &config.typing));
    attach("smooth scroll", scroll::mount(window, document, &config.scroll));
    attach("reveal", reveal::mount(document, &config.reveal));
    attach("easter egg", easter_egg::mount(document, &config.easter_egg));
    attach("logo fallback", fallback::mount(document, &config.fallback));
    attach("spin keyframes", page::inject_keyframes(document));
    attach("email link", page::mount_email_press(document));
    attach("performance", performance::mount(window, document, &config.performance));
    attach("touch", touch::mount(window, document, &config.touch));
    attach("loaded marker", page::mark_loaded(window, document));

    page::print_banner();
}
