use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

use crate::config::EasterEggConfig;
use crate::error::EffectError;
use crate::utils::dom;

/// Counts logo clicks. The count is debounced: a gap of `reset_ms` or more
/// since the previous click drops it back to zero before the new click counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickCounter {
    count: u32,
    threshold: u32,
    reset_ms: f64,
    last_click_ms: Option<f64>,
}

impl ClickCounter {
    pub fn new(threshold: u32, reset_ms: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
            reset_ms: reset_ms as f64,
            last_click_ms: None,
        }
    }

    /// Registers a click at `now_ms`. Returns true exactly when the threshold
    /// is reached, in which case the count starts over.
    pub fn click(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_click_ms {
            if now_ms - last >= self.reset_ms {
                self.count = 0;
            }
        }
        self.last_click_ms = Some(now_ms);

        self.count += 1;
        if self.count == self.threshold {
            self.count = 0;
            return true;
        }
        false
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Start offset of each element's animation.
pub fn stagger_offsets(elements: usize, stagger_ms: u32) -> impl Iterator<Item = u32> {
    (0..elements).map(move |index| {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(stagger_ms)
    })
}

pub fn mount(document: &Document, config: &EasterEggConfig) -> Result<(), EffectError> {
    for id in &config.logo_ids {
        let Some(logo) = document.get_element_by_id(id) else {
            continue;
        };

        let counter = Rc::new(RefCell::new(ClickCounter::new(config.clicks, config.reset_ms)));
        let config = config.clone();
        let document = document.clone();
        dom::listen(&logo, "click", move |_| {
            let triggered = counter.borrow_mut().click(js_sys::Date::now());
            if !triggered {
                return;
            }
            log::info!("🌴 Easter egg unlocked");
            match dom::query_all(&document, &config.target_selector) {
                Ok(elements) => spin(elements, &config),
                Err(e) => log::warn!("Easter egg targets unavailable: {}", e),
            }
        })?;
    }
    Ok(())
}

/// Plays the spin on each element in turn, then puts back whatever inline
/// animation the element had before.
pub fn spin(elements: Vec<Element>, config: &EasterEggConfig) {
    let offsets = stagger_offsets(elements.len(), config.stagger_ms);
    for (element, offset) in elements.into_iter().zip(offsets) {
        let animation = config.animation.clone();
        let animation_ms = config.animation_ms;
        Timeout::new(offset, move || {
            let previous = dom::get_style(&element, "animation");
            dom::set_style(&element, "animation", &animation);
            Timeout::new(animation_ms, move || {
                dom::set_style(&element, "animation", &previous);
            })
            .forget();
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicks_at(counter: &mut ClickCounter, times: &[f64]) -> Vec<bool> {
        times.iter().map(|&at| counter.click(at)).collect()
    }

    #[test]
    fn fifth_click_triggers_once_and_resets() {
        let mut counter = ClickCounter::new(5, 2000);
        let fired = clicks_at(&mut counter, &[0.0, 100.0, 200.0, 300.0, 400.0]);

        assert_eq!(fired, vec![false, false, false, false, true]);
        assert_eq!(counter.count(), 0);

        assert!(!counter.click(500.0));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn clicks_just_inside_the_window_keep_counting() {
        let mut counter = ClickCounter::new(5, 2000);
        let fired = clicks_at(&mut counter, &[0.0, 1999.0, 3998.0, 5997.0, 7996.0]);
        assert_eq!(fired, vec![false, false, false, false, true]);
    }

    #[test]
    fn long_pause_restarts_the_count_at_one() {
        let mut counter = ClickCounter::new(5, 2000);
        clicks_at(&mut counter, &[0.0, 100.0, 200.0, 300.0]);
        assert_eq!(counter.count(), 4);

        assert!(!counter.click(2301.0));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn every_click_rearms_the_reset_window() {
        let mut counter = ClickCounter::new(5, 2000);
        // Total span is far beyond 2000ms, but no single gap reaches it.
        let fired = clicks_at(&mut counter, &[0.0, 1500.0, 3000.0, 4500.0, 6000.0]);
        assert_eq!(fired.last(), Some(&true));

        assert!(!counter.click(6100.0));
        assert!(!counter.click(8101.0));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn ten_quick_clicks_trigger_twice() {
        let mut counter = ClickCounter::new(5, 2000);
        let times: Vec<f64> = (0..10).map(|i| i as f64 * 50.0).collect();
        let triggers = clicks_at(&mut counter, &times).into_iter().filter(|f| *f).count();
        assert_eq!(triggers, 2);
    }

    #[test]
    fn offsets_are_staggered_by_index() {
        assert_eq!(stagger_offsets(4, 100).collect::<Vec<_>>(), vec![0, 100, 200, 300]);
        assert_eq!(stagger_offsets(0, 100).count(), 0);
    }

    #[test]
    fn huge_stagger_saturates_instead_of_overflowing() {
        let stagger = u32::MAX / 2 + 1;
        assert_eq!(
            stagger_offsets(3, stagger).collect::<Vec<_>>(),
            vec![0, stagger, u32::MAX]
        );
    }
}
