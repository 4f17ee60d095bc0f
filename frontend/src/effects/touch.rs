use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, TouchEvent, Window};

use crate::config::{TouchConfig, TouchLayer};
use crate::error::EffectError;
use crate::utils::dom;

/// Drag distance relative to the viewport size.
pub fn drag_delta(start: (f64, f64), current: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    (
        (current.0 - start.0) / viewport.0,
        (current.1 - start.1) / viewport.1,
    )
}

pub fn touch_transform(layer: &TouchLayer, index: usize, delta: (f64, f64)) -> String {
    let speed = (index as f64 + 1.0) * layer.speed * layer.scale;
    format!("translate({}px, {}px)", delta.0 * speed, delta.1 * speed)
}

fn first_touch(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

pub fn mount(window: &Window, document: &Document, config: &TouchConfig) -> Result<(), EffectError> {
    if config.layers.is_empty() {
        return Ok(());
    }
    let start: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));

    {
        let start = start.clone();
        dom::listen_with_options(document, "touchstart", &dom::passive(), move |event| {
            if let Some(event) = event.dyn_ref::<TouchEvent>() {
                start.set(first_touch(event));
            }
        })?;
    }

    let layers = config.layers.clone();
    let window = window.clone();
    let query_root = document.clone();
    dom::listen_with_options(document, "touchmove", &dom::passive(), move |event| {
        let Some(origin) = start.get() else {
            return;
        };
        let Some(current) = event.dyn_ref::<TouchEvent>().and_then(first_touch) else {
            return;
        };
        let Some(viewport) = dom::viewport_size(&window) else {
            return;
        };
        let delta = drag_delta(origin, current, viewport);

        for layer in &layers {
            let Ok(elements) = dom::query_all(&query_root, &layer.selector) else {
                continue;
            };
            for (index, element) in elements.iter().enumerate() {
                dom::set_style(element, "transform", &touch_transform(layer, index, delta));
            }
        }
    })
}
