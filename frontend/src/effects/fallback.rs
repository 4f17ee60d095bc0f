use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use crate::config::FallbackConfig;
use crate::error::EffectError;
use crate::utils::dom;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub const FALLBACK_WIDTH: &str = "160";
pub const FALLBACK_HEIGHT: &str = "48";

/// Gradient text logo drawn inside the fallback `<svg>`.
pub fn fallback_logo_markup() -> &'static str {
    r##"
        <defs>
            <linearGradient id="logoGrad" x1="0%" y1="0%" x2="100%" y2="100%">
                <stop offset="0%" style="stop-color:#14b8a6;stop-opacity:1" />
                <stop offset="100%" style="stop-color:#ffd4cc;stop-opacity:1" />
            </linearGradient>
        </defs>
        <text x="80" y="32" font-family="Space Grotesk, sans-serif" font-size="20" font-weight="700" fill="url(#logoGrad)" text-anchor="middle">IslandBytes</text>
    "##
}

pub fn create_fallback_logo(document: &Document) -> Result<Element, EffectError> {
    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("width", FALLBACK_WIDTH)?;
    svg.set_attribute("height", FALLBACK_HEIGHT)?;
    svg.set_attribute(
        "viewBox",
        &format!("0 0 {} {}", FALLBACK_WIDTH, FALLBACK_HEIGHT),
    )?;
    svg.set_inner_html(fallback_logo_markup());
    Ok(svg)
}

/// Swaps `image` for the vector logo. A detached image is left alone.
pub fn replace_with_fallback(document: &Document, image: &Element) -> Result<bool, EffectError> {
    let Some(parent) = image.parent_node() else {
        return Ok(false);
    };
    let fallback = create_fallback_logo(document)?;
    parent.replace_child(&fallback, image)?;
    Ok(true)
}

/// An image that settled without pixels while having a source has failed.
/// Such an image will not fire `error` again.
pub fn load_failed(complete: bool, natural_width: u32, src: &str) -> bool {
    complete && natural_width == 0 && !src.is_empty()
}

fn already_failed(image: &Element) -> bool {
    image
        .dyn_ref::<HtmlImageElement>()
        .is_some_and(|img| load_failed(img.complete(), img.natural_width(), &img.src()))
}

fn show_fallback(document: &Document, image: &Element) {
    match replace_with_fallback(document, image) {
        Ok(true) => log::warn!("Logo image failed to load, showing fallback"),
        Ok(false) => {}
        Err(e) => log::warn!("Could not show fallback logo: {}", e),
    }
}

pub fn mount(document: &Document, config: &FallbackConfig) -> Result<(), EffectError> {
    for image in dom::query_all(document, &config.selector)? {
        if already_failed(&image) {
            show_fallback(document, &image);
            continue;
        }

        let document = document.clone();
        let target = image.clone();
        dom::listen_with_options(&image, "error", &dom::once(), move |_| {
            show_fallback(&document, &target);
        })?;
    }
    Ok(())
}
