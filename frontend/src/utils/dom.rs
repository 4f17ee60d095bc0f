use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, Document, Element, Event, EventTarget,
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    SvgElement, Window,
};

use crate::error::EffectError;

pub fn window() -> Result<Window, EffectError> {
    web_sys::window().ok_or(EffectError::NoWindow)
}

pub fn document() -> Result<Document, EffectError> {
    window()?.document().ok_or(EffectError::NoDocument)
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, EffectError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Inline style of an HTML or SVG element. Other elements have none.
pub fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    let Some(style) = inline_style(element) else {
        return;
    };
    if let Err(e) = style.set_property(property, value) {
        log::warn!("Failed to set {} on element: {:?}", property, e);
    }
}

/// Current inline value of `property`, empty when unset.
pub fn get_style(element: &Element, property: &str) -> String {
    inline_style(element)
        .and_then(|style| style.get_property_value(property).ok())
        .unwrap_or_default()
}

/// Inner viewport size, or `None` when it is unknown or empty.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    (width > 0.0 && height > 0.0).then_some((width, height))
}

/// Attaches a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), EffectError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn listen_with_options<F>(
    target: &EventTarget,
    event: &str,
    options: &AddEventListenerOptions,
    handler: F,
) -> Result<(), EffectError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        options,
    )?;
    callback.forget();
    Ok(())
}

/// Creates an intersection observer whose handler receives the typed entries
/// of each notification. The callback lives for the rest of the page.
pub fn intersection_observer<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut handler: F,
) -> Result<IntersectionObserver, EffectError>
where
    F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let entries: Vec<IntersectionObserverEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            handler(entries, &observer);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

pub fn passive() -> AddEventListenerOptions {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    options
}

pub fn once() -> AddEventListenerOptions {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    options
}
