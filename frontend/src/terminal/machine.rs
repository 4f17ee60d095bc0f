use rand::Rng;
use serde::Deserialize;

/// One simulated terminal interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandStep {
    pub command: String,
    pub output: String,
    pub post_output_delay_ms: u32,
}

impl CommandStep {
    pub fn new(command: &str, output: &str, post_output_delay_ms: u32) -> Self {
        Self {
            command: command.to_string(),
            output: output.to_string(),
            post_output_delay_ms,
        }
    }

    fn len(&self) -> usize {
        self.command.chars().count()
    }

    fn prefix(&self, chars: usize) -> String {
        self.command.chars().take(chars).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingTiming {
    /// Inclusive lower bound of the keystroke delay.
    pub keystroke_min_ms: u32,
    /// Exclusive upper bound of the keystroke delay.
    pub keystroke_max_ms: u32,
    pub delete_ms: u32,
    pub output_pause_ms: u32,
    pub restart_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            keystroke_min_ms: 50,
            keystroke_max_ms: 100,
            delete_ms: 30,
            output_pause_ms: 500,
            restart_ms: 500,
        }
    }
}

impl TypingTiming {
    fn keystroke_delay<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.keystroke_max_ms <= self.keystroke_min_ms {
            return self.keystroke_min_ms;
        }
        rng.gen_range(self.keystroke_min_ms..self.keystroke_max_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    AwaitingOutput,
    ShowingOutput,
    Deleting,
    AdvancingStep,
}

/// What a tick asks the display surface to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Command(String),
    Output(String),
    ClearOutput,
}

/// Result of one transition: an optional render and the delay until the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub render: Option<Render>,
    pub delay_ms: u32,
}

impl Tick {
    fn after(delay_ms: u32) -> Self {
        Self {
            render: None,
            delay_ms,
        }
    }

    fn render(render: Render, delay_ms: u32) -> Self {
        Self {
            render: Some(render),
            delay_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatorState {
    step_index: usize,
    char_index: usize,
    phase: Phase,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            step_index: 0,
            char_index: 0,
            phase: Phase::Typing,
        }
    }
}

impl AnimatorState {
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Performs exactly one transition of the typing loop.
    ///
    /// `steps` must be non-empty and must not change between ticks.
    pub fn tick<R: Rng>(&mut self, steps: &[CommandStep], timing: &TypingTiming, rng: &mut R) -> Tick {
        debug_assert!(!steps.is_empty());
        let step = &steps[self.step_index % steps.len()];
        let len = step.len();

        match self.phase {
            Phase::Typing => {
                if self.char_index >= len {
                    self.char_index = len;
                    self.phase = Phase::AwaitingOutput;
                    return Tick::after(0);
                }
                self.char_index += 1;
                let text = step.prefix(self.char_index);
                if self.char_index == len {
                    self.phase = Phase::AwaitingOutput;
                    Tick::render(Render::Command(text), timing.output_pause_ms)
                } else {
                    Tick::render(Render::Command(text), timing.keystroke_delay(rng))
                }
            }
            Phase::AwaitingOutput => {
                self.phase = Phase::ShowingOutput;
                Tick::render(Render::Output(step.output.clone()), step.post_output_delay_ms)
            }
            Phase::ShowingOutput => {
                self.phase = Phase::Deleting;
                Tick::render(Render::ClearOutput, 0)
            }
            Phase::Deleting => {
                if self.char_index == 0 {
                    self.phase = Phase::AdvancingStep;
                    return Tick::after(0);
                }
                self.char_index -= 1;
                if self.char_index == 0 {
                    self.phase = Phase::AdvancingStep;
                }
                Tick::render(Render::Command(step.prefix(self.char_index)), timing.delete_ms)
            }
            Phase::AdvancingStep => {
                // char_index is already 0 here; Deleting only exits at 0.
                self.step_index = (self.step_index + 1) % steps.len();
                self.phase = Phase::Typing;
                Tick::render(Render::ClearOutput, timing.restart_ms)
            }
        }
    }
}
