//! Time base: tick rates and the dividers derived from them.
//!
//! The clock has exactly two sources of forward progress, a fast tick at
//! [`FAST_TICK_HZ`] and a slow tick at 1 Hz. Every other cadence in the
//! crate is a [`Prescaler`] or a [`Countdown`] driven by one of those two.

/// Rate of the fast timer overflow (8 MHz / 256).
pub const FAST_TICK_HZ: u32 = 31_250;

/// Number of physical display positions, including the indicator position 0.
pub const DIGIT_COUNT: usize = 9;

/// Full-frame refresh rate of the multiplexed display.
pub const FRAME_RATE_HZ: u32 = 100;

/// Fast ticks per multiplexer step (one digit pushed per step).
pub const MUX_DIVIDER: u16 = (FAST_TICK_HZ / (FRAME_RATE_HZ * DIGIT_COUNT as u32)) as u16;

/// Multiplexer steps per second. One step is the crate's "millisecond":
/// debounce, hold and banner durations are counted in mux steps.
pub const MUX_STEP_HZ: u32 = FAST_TICK_HZ / MUX_DIVIDER as u32;

/// Frames per alarm pulse phase; the buzzer toggles once per this many frames.
pub const ALARM_PULSE_FRAMES: u16 = 100;

/// Converts a duration in milliseconds to multiplexer steps, rounding up.
pub const fn ms_to_steps(ms: u32) -> u16 {
    let steps = (ms * MUX_STEP_HZ).div_ceil(1000);
    if steps > u16::MAX as u32 {
        u16::MAX
    } else {
        steps as u16
    }
}

/// Divides an incoming tick stream by a fixed ratio.
///
/// [`tick`](Prescaler::tick) returns `true` once every `divisor` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Prescaler {
    count: u16,
    divisor: u16,
}

impl Prescaler {
    /// Creates a prescaler firing once per `divisor` ticks. A divisor of zero
    /// is treated as one.
    pub const fn new(divisor: u16) -> Self {
        Self {
            count: 0,
            divisor: if divisor == 0 { 1 } else { divisor },
        }
    }

    /// Advances by one input tick; returns `true` when the output fires.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count < self.divisor {
            return false;
        }
        self.count = 0;
        true
    }

    /// Restarts the division from zero.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Returns the configured divisor.
    pub fn divisor(&self) -> u16 {
        self.divisor
    }
}

/// A saturating down-counter.
///
/// Used for every "N units remaining" piece of state: snooze seconds,
/// inactivity seconds, banner steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown(u16);

impl Countdown {
    /// An expired countdown.
    pub const IDLE: Self = Countdown(0);

    /// Creates a countdown with `remaining` units left.
    pub const fn new(remaining: u16) -> Self {
        Countdown(remaining)
    }

    /// Re-arms the countdown.
    pub fn arm(&mut self, remaining: u16) {
        self.0 = remaining;
    }

    /// Stops the countdown without it having expired naturally.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Decrements by one unit. Returns `true` only on the call that reaches zero.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }

    /// Returns `true` while units remain.
    pub fn is_running(&self) -> bool {
        self.0 != 0
    }

    /// Units remaining.
    pub fn remaining(&self) -> u16 {
        self.0
    }
}
