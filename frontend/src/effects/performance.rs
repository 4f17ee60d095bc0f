use web_sys::{Document, Window};

use crate::config::PerformanceConfig;
use crate::error::EffectError;
use crate::utils::dom;

/// Devices reporting fewer than `min_cores` logical cores get static
/// decorations. An unreported core count (0) is not treated as low-end.
pub fn is_low_end(cores: f64, min_cores: u32) -> bool {
    cores > 0.0 && cores < min_cores as f64
}

pub fn mount(window: &Window, document: &Document, config: &PerformanceConfig) -> Result<(), EffectError> {
    let cores = window.navigator().hardware_concurrency();
    if !is_low_end(cores, config.min_cores) {
        return Ok(());
    }

    let elements = dom::query_all(document, &config.selector)?;
    for element in &elements {
        dom::set_style(element, "animation", "none");
    }
    log::info!(
        "Low-end device ({} cores), disabled {} decorative animations",
        cores,
        elements.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_threshold() {
        assert!(is_low_end(2.0, 4));
        assert!(is_low_end(3.0, 4));
        assert!(!is_low_end(4.0, 4));
        assert!(!is_low_end(8.0, 4));
        assert!(!is_low_end(0.0, 4));
    }
}
