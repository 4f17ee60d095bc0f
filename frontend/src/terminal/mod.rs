//! Simulated terminal session: types a command, shows its output, deletes it,
//! and moves on to the next one, forever.

pub mod animator;
pub mod machine;
pub mod surface;

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::Document;

use crate::config::TypingConfig;
use crate::error::EffectError;
use crate::utils::scheduler::TimeoutScheduler;
use animator::TypingAnimator;
use surface::DomTerminal;

pub fn mount(document: &Document, config: &TypingConfig) -> Result<(), EffectError> {
    let Some(surface) = DomTerminal::find(document, &config.text_selector, &config.output_selector)?
    else {
        log::debug!("Terminal elements not present, typing animation disabled");
        return Ok(());
    };

    let animator = TypingAnimator::new(
        config.steps.clone(),
        config.timing.clone(),
        surface,
        Rc::new(TimeoutScheduler),
        StdRng::from_entropy(),
    );
    match animator {
        Some(animator) => {
            animator.start(config.start_delay_ms);
            log::debug!("Typing animation starts in {}ms", config.start_delay_ms);
        }
        None => log::debug!("No terminal commands configured, typing animation disabled"),
    }
    Ok(())
}
