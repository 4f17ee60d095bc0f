use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use super::machine::{AnimatorState, CommandStep, TypingTiming};
use super::surface::TerminalSurface;
use crate::utils::scheduler::Scheduler;

struct Shared<S, R> {
    steps: Vec<CommandStep>,
    timing: TypingTiming,
    surface: S,
    scheduler: Rc<dyn Scheduler>,
    rng: RefCell<R>,
    state: RefCell<AnimatorState>,
}

/// Drives the typing loop forever by rescheduling itself after each tick.
pub struct TypingAnimator<S, R> {
    shared: Rc<Shared<S, R>>,
}

impl<S, R> TypingAnimator<S, R>
where
    S: TerminalSurface + 'static,
    R: Rng + 'static,
{
    /// Returns `None` for an empty sequence; there is nothing to loop over.
    pub fn new(
        steps: Vec<CommandStep>,
        timing: TypingTiming,
        surface: S,
        scheduler: Rc<dyn Scheduler>,
        rng: R,
    ) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            shared: Rc::new(Shared {
                steps,
                timing,
                surface,
                scheduler,
                rng: RefCell::new(rng),
                state: RefCell::new(AnimatorState::default()),
            }),
        })
    }

    /// Schedules the first tick. The loop keeps itself alive from then on.
    pub fn start(&self, start_delay_ms: u32) {
        schedule_tick(Rc::clone(&self.shared), start_delay_ms);
    }

    pub fn state(&self) -> AnimatorState {
        self.shared.state.borrow().clone()
    }
}

fn schedule_tick<S, R>(shared: Rc<Shared<S, R>>, delay_ms: u32)
where
    S: TerminalSurface + 'static,
    R: Rng + 'static,
{
    let scheduler = Rc::clone(&shared.scheduler);
    scheduler.schedule(delay_ms, Box::new(move || run_tick(shared)));
}

fn run_tick<S, R>(shared: Rc<Shared<S, R>>)
where
    S: TerminalSurface + 'static,
    R: Rng + 'static,
{
    let tick = {
        let mut state = shared.state.borrow_mut();
        let mut rng = shared.rng.borrow_mut();
        state.tick(&shared.steps, &shared.timing, &mut *rng)
    };
    if let Some(render) = &tick.render {
        shared.surface.apply(render);
    }
    schedule_tick(shared, tick.delay_ms);
}
