use std::cell::{Cell, RefCell};
use std::rc::Rc;

use frontend::terminal::animator::TypingAnimator;
use frontend::terminal::machine::{CommandStep, Phase, TypingTiming};
use frontend::terminal::surface::TerminalSurface;
use frontend::utils::scheduler::Scheduler;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic scheduler: tasks run in due-time order on a virtual clock.
#[derive(Default)]
struct VirtualClock {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<(u64, u64, Box<dyn FnOnce()>)>>,
}

impl Scheduler for VirtualClock {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue
            .borrow_mut()
            .push((self.now.get() + delay_ms as u64, seq, task));
    }
}

impl VirtualClock {
    fn next_due(&self) -> Option<u64> {
        self.queue.borrow().iter().map(|(due, _, _)| *due).min()
    }

    fn run_next(&self) -> bool {
        let task = {
            let mut queue = self.queue.borrow_mut();
            let Some(index) = queue
                .iter()
                .enumerate()
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                .map(|(index, _)| index)
            else {
                return false;
            };
            let (due, _, task) = queue.remove(index);
            self.now.set(due);
            task
        };
        task();
        true
    }

    fn run_until(&self, time: u64) {
        while self.next_due().is_some_and(|due| due <= time) {
            self.run_next();
        }
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Shown {
    Command(String),
    Output(String),
    ClearOutput,
}

struct Recorder {
    clock: Rc<VirtualClock>,
    log: Rc<RefCell<Vec<(u64, Shown)>>>,
}

impl Recorder {
    fn push(&self, shown: Shown) {
        self.log.borrow_mut().push((self.clock.now.get(), shown));
    }
}

impl TerminalSurface for Recorder {
    fn show_command(&self, text: &str) {
        self.push(Shown::Command(text.to_string()));
    }

    fn show_output(&self, text: &str) {
        self.push(Shown::Output(text.to_string()));
    }

    fn clear_output(&self) {
        self.push(Shown::ClearOutput);
    }
}

struct Harness {
    clock: Rc<VirtualClock>,
    log: Rc<RefCell<Vec<(u64, Shown)>>>,
    animator: TypingAnimator<Recorder, StdRng>,
}

fn harness(steps: Vec<CommandStep>) -> Harness {
    let clock = Rc::new(VirtualClock::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    let recorder = Recorder {
        clock: clock.clone(),
        log: log.clone(),
    };
    let animator = TypingAnimator::new(
        steps,
        TypingTiming::default(),
        recorder,
        clock.clone(),
        StdRng::seed_from_u64(2024),
    )
    .expect("non-empty sequence");
    animator.start(1000);
    Harness {
        clock,
        log,
        animator,
    }
}

fn landing_steps() -> Vec<CommandStep> {
    vec![
        CommandStep::new("npm install @islandbytes/core", "✓ Package installed successfully", 1000),
        CommandStep::new("islandbytes init --template modern", "✓ Project initialized", 2000),
        CommandStep::new("npm run dev", "🌴 IslandBytes v2.0.0", 2500),
    ]
}

#[test]
fn nothing_renders_before_startup_delay() {
    let h = harness(landing_steps());
    h.clock.run_until(999);
    assert!(h.log.borrow().is_empty());
    assert_eq!(h.clock.pending(), 1);

    h.clock.run_until(1000);
    assert_eq!(
        h.log.borrow().as_slice(),
        &[(1000, Shown::Command("n".to_string()))]
    );
}

#[test]
fn typing_npm_run_dev_then_awaits_output() {
    let h = harness(vec![CommandStep::new("npm run dev", "ready", 2500)]);
    for _ in 0..11 {
        assert!(h.clock.run_next());
    }

    let log = h.log.borrow();
    assert_eq!(log.len(), 11);
    assert_eq!(log.last().unwrap().1, Shown::Command("npm run dev".to_string()));
    assert_eq!(h.animator.state().phase(), Phase::AwaitingOutput);
    assert_eq!(h.animator.state().char_index(), 11);
}

#[test]
fn output_stays_visible_for_its_delay() {
    let h = harness(vec![CommandStep::new("npm run dev", "ready", 2500)]);
    h.clock.run_until(20_000);

    let log = h.log.borrow();
    let (shown_at, _) = log
        .iter()
        .find(|(_, shown)| *shown == Shown::Output("ready".to_string()))
        .expect("output shown");
    let (cleared_at, _) = log
        .iter()
        .find(|(at, shown)| at >= shown_at && *shown == Shown::ClearOutput)
        .expect("output cleared");
    assert!(cleared_at - shown_at >= 2500);
}

#[test]
fn steps_are_visited_in_cyclic_order() {
    let h = harness(landing_steps());
    let mut visited = vec![h.animator.state().step_index()];

    while visited.len() < 10 {
        assert!(h.clock.run_next());
        let step = h.animator.state().step_index();
        if *visited.last().unwrap() != step {
            visited.push(step);
        }
    }
    assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn only_one_tick_is_ever_pending() {
    let h = harness(landing_steps());
    for _ in 0..500 {
        assert_eq!(h.clock.pending(), 1);
        h.clock.run_next();
    }
}

#[test]
fn command_is_deleted_before_next_step() {
    let h = harness(vec![CommandStep::new("ls", "a", 100), CommandStep::new("pwd", "/", 100)]);
    h.clock.run_until(10_000);

    let log = h.log.borrow();
    let commands: Vec<&str> = log
        .iter()
        .filter_map(|(_, shown)| match shown {
            Shown::Command(text) => Some(text.as_str()),
            _ => None,
        })
        .take(10)
        .collect();
    assert_eq!(commands, vec!["l", "ls", "l", "", "p", "pw", "pwd", "pw", "p", ""]);
}

#[test]
fn empty_sequence_never_starts() {
    let clock = Rc::new(VirtualClock::default());
    let recorder = Recorder {
        clock: clock.clone(),
        log: Rc::new(RefCell::new(Vec::new())),
    };
    let animator = TypingAnimator::new(
        Vec::new(),
        TypingTiming::default(),
        recorder,
        clock.clone(),
        StdRng::seed_from_u64(1),
    );
    assert!(animator.is_none());
    assert_eq!(clock.pending(), 0);
}
