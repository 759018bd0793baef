//! Debounced button input.
//!
//! Raw pin levels are sampled once per multiplexer step. Each line runs a
//! small state machine with the same semantics as an edge interrupt that
//! busy-waits the settle time and re-reads the pin, but expressed as
//! successive samples so nothing blocks the tick.
//!
//! Consumers use a read-and-clear contract: [`ButtonState::take_just_pressed`]
//! and [`ButtonState::take_repeat`] return the one-shot flag and clear it.
//! [`ButtonState::held`] stays set for as long as the line is down.

use crate::config::ClockConfig;

/// The three front-panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Cycles through the settings screens.
    Mode,
    /// Advances the current screen's edit state.
    Select,
    /// Increments the field being edited; auto-repeats when held.
    Adjust,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Mode, Button::Select, Button::Adjust];

    /// Only the adjust button distinguishes taps from holds.
    pub fn is_repeatable(self) -> bool {
        matches!(self, Button::Adjust)
    }

    fn index(self) -> usize {
        match self {
            Button::Mode => 0,
            Button::Select => 1,
            Button::Adjust => 2,
        }
    }
}

/// Debounce progress for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Released,
    /// Edge seen, waiting out the settle time before re-reading.
    Settling(u16),
    /// Confirmed press of a plain button, waiting for release.
    Down,
    /// Confirmed press of the repeatable button, not yet classified.
    Arming(u16),
    /// Auto-repeat mode; counts steps since the last repeat pulse.
    Held(u16),
    /// Press consumed elsewhere (snooze); ignored until release.
    Swallowed,
}

/// What a sample did to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Press confirmed after the settle time.
    Confirmed,
    /// Repeatable button released inside the hold window.
    Tap,
    /// Repeatable button held past the hold window.
    HoldStarted,
    /// Auto-repeat pulse while held.
    Repeat,
    /// Line released after a confirmed press.
    Released,
}

/// Per-line debounce state machine.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    phase: Phase,
    repeatable: bool,
}

impl Debouncer {
    pub const fn new(repeatable: bool) -> Self {
        Self {
            phase: Phase::Released,
            repeatable,
        }
    }

    /// Feeds one sample of the line (`low` = pressed).
    ///
    /// A press whose level has bounced back to released when the settle time
    /// ends is dropped without any transition.
    pub fn sample(&mut self, low: bool, config: &ClockConfig) -> Option<Transition> {
        match self.phase {
            Phase::Released => {
                if low {
                    self.phase = Phase::Settling(0);
                }
                None
            }
            Phase::Settling(elapsed) => {
                let elapsed = elapsed + 1;
                if elapsed < config.debounce_steps {
                    self.phase = Phase::Settling(elapsed);
                    return None;
                }
                if !low {
                    self.phase = Phase::Released;
                    return None;
                }
                self.phase = if self.repeatable {
                    Phase::Arming(0)
                } else {
                    Phase::Down
                };
                Some(Transition::Confirmed)
            }
            Phase::Down => {
                if low {
                    return None;
                }
                self.phase = Phase::Released;
                Some(Transition::Released)
            }
            Phase::Arming(elapsed) => {
                if !low {
                    self.phase = Phase::Released;
                    return Some(Transition::Tap);
                }
                let elapsed = elapsed + 1;
                if elapsed >= config.hold_arm_steps {
                    self.phase = Phase::Held(0);
                    return Some(Transition::HoldStarted);
                }
                self.phase = Phase::Arming(elapsed);
                None
            }
            Phase::Held(since) => {
                if !low {
                    self.phase = Phase::Released;
                    return Some(Transition::Released);
                }
                let since = since + 1;
                if since >= config.repeat_steps {
                    self.phase = Phase::Held(0);
                    return Some(Transition::Repeat);
                }
                self.phase = Phase::Held(since);
                None
            }
            Phase::Swallowed => {
                if !low {
                    self.phase = Phase::Released;
                }
                None
            }
        }
    }

    /// Discards the confirmed press: no further transitions until release.
    pub fn swallow(&mut self) {
        self.phase = Phase::Swallowed;
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Released;
    }
}

/// Consumer-facing flags for one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pressed: bool,
    just_pressed: bool,
    held: bool,
    repeat: bool,
}

impl ButtonState {
    /// Debounced level.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Peeks the one-shot press flag without clearing it.
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Reads and clears the one-shot press flag.
    pub fn take_just_pressed(&mut self) -> bool {
        core::mem::take(&mut self.just_pressed)
    }

    /// Level flag: the button is in auto-repeat mode.
    pub fn held(&self) -> bool {
        self.held
    }

    /// Reads and clears the auto-repeat pulse.
    pub fn take_repeat(&mut self) -> bool {
        core::mem::take(&mut self.repeat)
    }
}

/// What the input device asks of the rest of the clock after a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A press was confirmed; emit key feedback.
    Click,
    /// A press was confirmed while the alarm rang; it became a snooze.
    Snooze,
}

/// The three debounced buttons.
#[derive(Debug, Clone, Copy)]
pub struct InputDevice {
    debouncers: [Debouncer; 3],
    states: [ButtonState; 3],
}

impl InputDevice {
    pub const fn new() -> Self {
        Self {
            debouncers: [
                Debouncer::new(false),
                Debouncer::new(false),
                Debouncer::new(true),
            ],
            states: [ButtonState {
                pressed: false,
                just_pressed: false,
                held: false,
                repeat: false,
            }; 3],
        }
    }

    /// Samples one button.
    ///
    /// While `alarm_ringing` is set a confirmed press is diverted into
    /// [`InputEvent::Snooze`] and sets none of the button's flags.
    pub fn sample(
        &mut self,
        button: Button,
        low: bool,
        alarm_ringing: bool,
        config: &ClockConfig,
    ) -> Option<InputEvent> {
        let i = button.index();
        let transition = self.debouncers[i].sample(low, config)?;
        let state = &mut self.states[i];

        match transition {
            Transition::Confirmed => {
                if alarm_ringing {
                    self.debouncers[i].swallow();
                    debug!("press diverted to snooze");
                    return Some(InputEvent::Snooze);
                }
                state.pressed = true;
                if button.is_repeatable() {
                    // classified as tap or hold later
                    return None;
                }
                state.just_pressed = true;
                trace!("just pressed");
                Some(InputEvent::Click)
            }
            Transition::Tap => {
                state.pressed = false;
                state.just_pressed = true;
                Some(InputEvent::Click)
            }
            Transition::HoldStarted => {
                state.held = true;
                state.repeat = true;
                None
            }
            Transition::Repeat => {
                state.repeat = true;
                None
            }
            Transition::Released => {
                state.pressed = false;
                state.held = false;
                None
            }
        }
    }

    pub fn state(&self, button: Button) -> &ButtonState {
        &self.states[button.index()]
    }

    pub fn state_mut(&mut self, button: Button) -> &mut ButtonState {
        &mut self.states[button.index()]
    }

    /// Returns `true` if any button is down or has an unread press.
    pub fn any_activity(&self) -> bool {
        self.states.iter().any(|s| s.just_pressed || s.pressed || s.held)
    }

    /// Drops all pending flags and debounce progress.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for InputDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounces the alarm on/off switch: a level change is accepted only if it
/// is still present after the settle time.
#[derive(Debug, Clone, Copy)]
pub struct SwitchDebouncer {
    stable: Option<bool>,
    settling: Option<(bool, u16)>,
}

impl SwitchDebouncer {
    pub const fn new() -> Self {
        Self {
            stable: None,
            settling: None,
        }
    }

    /// Feeds one sample; returns the new level when a change is confirmed.
    /// The very first sample is always reported.
    pub fn sample(&mut self, level: bool, config: &ClockConfig) -> Option<bool> {
        if self.stable == Some(level) {
            self.settling = None;
            return None;
        }
        let elapsed = match self.settling {
            Some((pending, elapsed)) if pending == level => elapsed + 1,
            _ => 1,
        };
        if elapsed < config.debounce_steps && self.stable.is_some() {
            self.settling = Some((level, elapsed));
            return None;
        }
        self.settling = None;
        self.stable = Some(level);
        Some(level)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SwitchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
