use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::config::CounterConfig;
use crate::error::EffectError;
use crate::utils::dom;
use crate::utils::scheduler::{Scheduler, TimeoutScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    /// One decimal place, for values shown with a `%` suffix.
    Percent,
    Integer,
}

impl CounterFormat {
    pub fn detect(text: &str) -> Self {
        if text.contains('%') {
            CounterFormat::Percent
        } else {
            CounterFormat::Integer
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            CounterFormat::Percent => format!("{:.1}", value),
            CounterFormat::Integer => format!("{}", value.round() as i64),
        }
    }
}

/// Reads a `data-target` value the way `parseFloat` does: the longest
/// leading decimal number counts and any suffix (`98%`, `50K`) is ignored.
/// Values without a leading number, or that are not finite, are ignored.
pub fn parse_target(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim_start();
    let number = &text[..leading_number_len(text)?];
    number.parse::<f64>().ok().filter(|t| t.is_finite())
}

/// Byte length of the decimal number at the start of `text`.
fn leading_number_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    Some(end)
}

/// Linear count from 0 to `target`, one fixed step per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    step: f64,
    current: f64,
    format: CounterFormat,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: u32, interval_ms: u32, format: CounterFormat) -> Self {
        let samples = (duration_ms as f64 / interval_ms.max(1) as f64).max(1.0);
        Self {
            target,
            step: target / samples,
            current: 0.0,
            format,
            done: false,
        }
    }

    /// Advances one sample and returns the text to display, or `None` once
    /// the target has been reached.
    pub fn advance(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(self.format.format(self.current))
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

pub fn mount(document: &Document, config: &CounterConfig) -> Result<(), EffectError> {
    let Some(grid) = document.query_selector(&config.grid_selector)? else {
        return Ok(());
    };

    let config = config.clone();
    let document = document.clone();
    let observer = dom::intersection_observer(config.threshold, None, move |entries, observer| {
        for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
            if let Err(e) = animate_all(&document, &config) {
                log::warn!("Stats counter failed: {}", e);
            }
            observer.unobserve(&entry.target());
        }
    })?;
    observer.observe(&grid);
    Ok(())
}

fn animate_all(document: &Document, config: &CounterConfig) -> Result<(), EffectError> {
    let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
    for element in dom::query_all(document, &config.value_selector)? {
        let Some(target) = parse_target(element.get_attribute("data-target").as_deref()) else {
            continue;
        };
        let format = CounterFormat::detect(&element.text_content().unwrap_or_default());
        let animation = CounterAnimation::new(target, config.duration_ms, config.interval_ms, format);
        run(
            Rc::new(RefCell::new(animation)),
            element,
            scheduler.clone(),
            config.interval_ms,
        );
    }
    Ok(())
}

fn run(
    animation: Rc<RefCell<CounterAnimation>>,
    element: Element,
    scheduler: Rc<dyn Scheduler>,
    interval_ms: u32,
) {
    let next = scheduler.clone();
    scheduler.schedule(
        interval_ms,
        Box::new(move || {
            let text = animation.borrow_mut().advance();
            if let Some(text) = text {
                element.set_text_content(Some(&text));
            }
            if !animation.borrow().is_done() {
                run(animation, element, next, interval_ms);
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(animation: &mut CounterAnimation) -> Vec<String> {
        let mut frames = Vec::new();
        while let Some(text) = animation.advance() {
            frames.push(text);
            assert!(frames.len() < 10_000, "counter never converged");
        }
        frames
    }

    #[test]
    fn percent_counter_converges_to_one_decimal_target() {
        let mut animation = CounterAnimation::new(100.0, 2000, 16, CounterFormat::detect("0%"));
        let frames = run_to_end(&mut animation);

        assert_eq!(frames.last().map(String::as_str), Some("100.0"));
        assert!(frames.len() >= 125 && frames.len() <= 126);
        assert_eq!(frames[0], "0.8");
        assert!(animation.is_done());
        assert_eq!(animation.advance(), None);
        assert_eq!(animation.advance(), None);
    }

    #[test]
    fn integer_counter_rounds_each_sample() {
        let mut animation = CounterAnimation::new(50.0, 2000, 16, CounterFormat::detect("50+"));
        let frames = run_to_end(&mut animation);

        assert_eq!(frames[0], "0");
        assert_eq!(frames[1], "1");
        assert_eq!(frames.last().map(String::as_str), Some("50"));
    }

    #[test]
    fn k_suffix_counts_as_integer() {
        assert_eq!(CounterFormat::detect("10K"), CounterFormat::Integer);
        assert_eq!(CounterFormat::Integer.format(9.6), "10");
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut animation = CounterAnimation::new(0.0, 2000, 16, CounterFormat::Integer);
        assert_eq!(animation.advance(), Some("0".to_string()));
        assert_eq!(animation.advance(), None);
    }

    #[test]
    fn suffixed_targets_keep_their_leading_number() {
        assert_eq!(parse_target(Some("98%")), Some(98.0));
        assert_eq!(parse_target(Some("50K")), Some(50.0));
        assert_eq!(parse_target(Some("  12.5 users")), Some(12.5));
        assert_eq!(parse_target(Some("1.5e3x")), Some(1500.0));
        assert_eq!(parse_target(Some("7e")), Some(7.0));
        assert_eq!(parse_target(Some(".5")), Some(0.5));
        assert_eq!(parse_target(Some("3.")), Some(3.0));
        assert_eq!(parse_target(Some("-4kg")), Some(-4.0));
    }

    #[test]
    fn invalid_targets_are_skipped() {
        assert_eq!(parse_target(Some(" 99.9 ")), Some(99.9));
        assert_eq!(parse_target(Some("abc")), None);
        assert_eq!(parse_target(Some("inf")), None);
        assert_eq!(parse_target(Some("Infinity")), None);
        assert_eq!(parse_target(Some("-")), None);
        assert_eq!(parse_target(Some(".")), None);
        assert_eq!(parse_target(Some("")), None);
        assert_eq!(parse_target(Some("1e999")), None);
        assert_eq!(parse_target(None), None);
    }
}
