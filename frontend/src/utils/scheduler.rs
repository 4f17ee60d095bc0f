use gloo_timers::callback::Timeout;

/// Single-shot timer abstraction.
///
/// Every scheduled task fires exactly once after its delay and cannot be
/// cancelled.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser scheduler backed by `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
