use gloo_timers::callback::Timeout;
use web_sys::{Document, Window};

use crate::error::EffectError;
use crate::utils::dom;

const LOADED_CLASS: &str = "loaded";
const EMAIL_LINK: &str = ".email-link";
const EMAIL_PRESS_MS: u32 = 150;

pub const SPIN_KEYFRAMES: &str = r#"
    @keyframes spin {
        from { transform: rotate(0deg); }
        to { transform: rotate(360deg); }
    }
"#;

/// Adds `loaded` to the body once the page has finished loading.
pub fn mark_loaded(window: &Window, document: &Document) -> Result<(), EffectError> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    if document.ready_state() == "complete" {
        body.class_list().add_1(LOADED_CLASS)?;
        return Ok(());
    }
    dom::listen_with_options(window, "load", &dom::once(), move |_| {
        if let Err(e) = body.class_list().add_1(LOADED_CLASS) {
            log::warn!("Failed to mark page loaded: {:?}", e);
        }
    })
}

/// Makes the `spin` animation available without stylesheet support.
pub fn inject_keyframes(document: &Document) -> Result<(), EffectError> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(SPIN_KEYFRAMES));
    head.append_child(&style)?;
    Ok(())
}

pub fn mount_email_press(document: &Document) -> Result<(), EffectError> {
    let Some(link) = document.query_selector(EMAIL_LINK)? else {
        return Ok(());
    };

    let pressed = link.clone();
    dom::listen(&link, "click", move |_| {
        dom::set_style(&pressed, "transform", "scale(0.95)");
        let released = pressed.clone();
        Timeout::new(EMAIL_PRESS_MS, move || {
            dom::set_style(&released, "transform", "");
        })
        .forget();
    })
}

pub fn print_banner() {
    gloo_console::log!("%c🌴 IslandBytes", "font-size: 24px; color: #14b8a6; font-weight: bold;");
    gloo_console::log!(
        "%cTechnical Excellence Meets Island Innovation",
        "font-size: 14px; color: #ffd4cc;"
    );
    gloo_console::log!("%cBuilt with ❤️ and precision", "font-size: 12px; color: #4b5563;");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasterEggConfig;

    #[test]
    fn keyframes_match_easter_egg_animation() {
        let animation = EasterEggConfig::default().animation;
        let name = animation.split_whitespace().next().unwrap();
        assert!(SPIN_KEYFRAMES.contains(&format!("@keyframes {} ", name)));
    }
}
