use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use crate::config::{ParallaxConfig, ParallaxLayer};
use crate::error::EffectError;
use crate::utils::dom;

const ROTATION_ATTR: &str = "data-rotation";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Pointer position relative to the viewport center, each axis in [-1, 1].
pub fn normalized_offset(pointer: Pointer, viewport: (f64, f64)) -> (f64, f64) {
    let center_x = viewport.0 / 2.0;
    let center_y = viewport.1 / 2.0;
    (
        ((pointer.x - center_x) / center_x).clamp(-1.0, 1.0),
        ((pointer.y - center_y) / center_y).clamp(-1.0, 1.0),
    )
}

/// CSS transform for the `index`-th element of `layer`.
pub fn layer_transform(
    layer: &ParallaxLayer,
    index: usize,
    offset: (f64, f64),
    rotation: Option<f64>,
) -> String {
    let direction = if layer.reversed { -1.0 } else { 1.0 };
    let speed = (index as f64 + 1.0) * layer.speed * direction;
    let translate = format!("translate({}px, {}px)", offset.0 * speed, offset.1 * speed);
    match rotation {
        Some(degrees) => format!("{} rotate({}deg)", translate, degrees),
        None => translate,
    }
}

/// Extracts the rotation angle in whole degrees from a computed
/// `matrix(...)` / `matrix3d(...)` transform. `none` has no rotation.
pub fn rotation_from_matrix(transform: &str) -> Option<i32> {
    let inner = transform.split_once('(')?.1.split_once(')')?.0;
    let mut values = inner.split(',').map(|v| v.trim().parse::<f64>());
    let a = values.next()?.ok()?;
    let b = values.next()?.ok()?;
    Some(b.atan2(a).to_degrees().round() as i32)
}

/// Coalesces pointer moves so at most one parallax pass runs per frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Option<Pointer>,
    scheduled: bool,
}

impl FrameThrottle {
    /// Records the latest pointer. Returns true when the caller has to
    /// request an animation frame.
    pub fn offer(&mut self, pointer: Pointer) -> bool {
        self.pending = Some(pointer);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    pub fn begin_frame(&mut self) -> Option<Pointer> {
        self.pending.take()
    }

    pub fn end_frame(&mut self) {
        self.scheduled = false;
    }
}

pub fn mount(window: &Window, document: &Document, config: &ParallaxConfig) -> Result<(), EffectError> {
    if config.layers.is_empty() {
        return Ok(());
    }
    capture_rotations(window, document, &config.layers)?;

    let throttle = Rc::new(RefCell::new(FrameThrottle::default()));
    let layers = Rc::new(config.layers.clone());
    let window = window.clone();
    let target = document.clone();
    let document = document.clone();

    dom::listen(&target, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pointer = Pointer {
            x: event.client_x() as f64,
            y: event.client_y() as f64,
        };
        if !throttle.borrow_mut().offer(pointer) {
            return;
        }

        let frame = {
            let throttle = throttle.clone();
            let layers = layers.clone();
            let window = window.clone();
            let document = document.clone();
            Closure::once_into_js(move || {
                let pending = throttle.borrow_mut().begin_frame();
                if let Some(pointer) = pending {
                    apply(&window, &document, &layers, pointer);
                }
                throttle.borrow_mut().end_frame();
            })
        };
        if let Err(e) = window.request_animation_frame(frame.unchecked_ref()) {
            log::warn!("Failed to request parallax frame: {:?}", e);
            throttle.borrow_mut().end_frame();
        }
    })
}

fn capture_rotations(
    window: &Window,
    document: &Document,
    layers: &[ParallaxLayer],
) -> Result<(), EffectError> {
    for layer in layers.iter().filter(|layer| layer.keep_rotation) {
        for element in dom::query_all(document, &layer.selector)? {
            let Some(style) = window.get_computed_style(&element)? else {
                continue;
            };
            let transform = style.get_property_value("transform")?;
            if let Some(angle) = rotation_from_matrix(&transform) {
                element.set_attribute(ROTATION_ATTR, &angle.to_string())?;
            }
        }
    }
    Ok(())
}

/// Moves every layer for one pointer position.
pub fn apply(window: &Window, document: &Document, layers: &[ParallaxLayer], pointer: Pointer) {
    let Some(viewport) = dom::viewport_size(window) else {
        return;
    };
    let offset = normalized_offset(pointer, viewport);

    for layer in layers {
        let elements = match dom::query_all(document, &layer.selector) {
            Ok(elements) => elements,
            Err(e) => {
                log::warn!("Skipping parallax layer {}: {}", layer.selector, e);
                continue;
            }
        };
        for (index, element) in elements.iter().enumerate() {
            let rotation = layer.keep_rotation.then(|| {
                element
                    .get_attribute(ROTATION_ATTR)
                    .and_then(|r| r.parse::<f64>().ok())
                    .unwrap_or(0.0)
            });
            dom::set_style(
                element,
                "transform",
                &layer_transform(layer, index, offset, rotation),
            );
        }
    }
}
