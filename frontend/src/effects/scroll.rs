use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

use crate::config::ScrollConfig;
use crate::error::EffectError;
use crate::utils::dom;

const IN_PAGE_ANCHORS: &str = r##"a[href^="#"]"##;

/// Selector for an in-page link target. A bare `#` points nowhere.
pub fn anchor_selector(href: &str) -> Option<&str> {
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

pub fn grid_transform(scroll_y: f64, factor: f64) -> String {
    format!("translateY({}px)", scroll_y * factor)
}

pub fn mount(window: &Window, document: &Document, config: &ScrollConfig) -> Result<(), EffectError> {
    mount_smooth_anchors(document)?;
    mount_grid_overlay(window, document, config)
}

fn mount_smooth_anchors(document: &Document) -> Result<(), EffectError> {
    let anchors = document.query_selector_all(IN_PAGE_ANCHORS)?;
    for index in 0..anchors.length() {
        let Some(anchor) = anchors
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let document = document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            // Hrefs that are not valid selectors just do nothing.
            if let Ok(Some(target)) = document.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn mount_grid_overlay(
    window: &Window,
    document: &Document,
    config: &ScrollConfig,
) -> Result<(), EffectError> {
    let Some(grid) = document.query_selector(&config.grid_selector)? else {
        return Ok(());
    };

    let factor = config.grid_factor;
    let scrolled = window.clone();
    dom::listen(window, "scroll", move |_| {
        let scroll_y = scrolled.scroll_y().unwrap_or(0.0);
        dom::set_style(&grid, "transform", &grid_transform(scroll_y, factor));
    })
}
