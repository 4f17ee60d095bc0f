use web_sys::Document;

use crate::config::RevealConfig;
use crate::error::EffectError;
use crate::utils::dom;

/// Marks elements as visible whenever they scroll into view.
/// Targets are never unobserved.
pub fn mount(document: &Document, config: &RevealConfig) -> Result<(), EffectError> {
    let targets = dom::query_all(document, &config.selector)?;
    if targets.is_empty() {
        return Ok(());
    }

    let class_name = config.class_name.clone();
    let observer = dom::intersection_observer(
        config.threshold,
        Some(config.root_margin.as_str()),
        move |entries, _| {
            for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
                if let Err(e) = entry.target().class_list().add_1(&class_name) {
                    log::warn!("Failed to reveal element: {:?}", e);
                }
            }
        },
    )?;
    for target in &targets {
        observer.observe(target);
    }
    log::debug!("Observing {} reveal targets", targets.len());
    Ok(())
}
