//! Tunable timing and threshold constants.

use crate::time::ms_to_steps;

/// Configuration for a [`VfdClock`](crate::VfdClock).
///
/// Durations suffixed `_steps` are counted in multiplexer steps (see
/// [`MUX_STEP_HZ`](crate::time::MUX_STEP_HZ)); those suffixed `_secs` are
/// counted in slow ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Settle time between a press edge and the confirming re-read.
    pub debounce_steps: u16,
    /// How long the repeatable button must stay down after confirmation
    /// before it counts as held rather than tapped.
    pub hold_arm_steps: u16,
    /// Interval between auto-repeat pulses while held.
    pub repeat_steps: u16,
    /// Seconds without input before a settings screen gives up.
    pub inactivity_secs: u16,
    /// Seconds a snooze suppresses the buzzer.
    pub snooze_secs: u16,
    /// Duration of the snooze banner.
    pub snooze_banner_steps: u16,
    /// Duration of the "alarm on" text when the switch is turned on.
    pub alarm_on_steps: u16,
    /// Duration of the alarm time shown after the "alarm on" text.
    pub alarm_banner_steps: u16,
    /// Duration of the weekday name that opens the date peek.
    pub weekday_steps: u16,
    /// Duration of the month and day that close the date peek, and of the
    /// date shown after the date screen commits.
    pub date_peek_steps: u16,
    /// Raw light reading above which the room counts as dark.
    pub dimmer_threshold: u8,
    /// Lowest brightness the boost converter is ever driven at.
    pub brightness_min: u8,
    /// Highest brightness the boost converter is ever driven at.
    pub brightness_max: u8,
    /// Brightness quantisation step.
    pub brightness_increment: u8,
    /// Alarm tone frequency.
    pub alarm_tone_hz: u16,
}

impl ClockConfig {
    pub const fn new() -> Self {
        Self {
            debounce_steps: ms_to_steps(10),
            hold_arm_steps: ms_to_steps(1500),
            repeat_steps: ms_to_steps(75),
            inactivity_secs: 10,
            snooze_secs: 600,
            snooze_banner_steps: ms_to_steps(1000),
            alarm_on_steps: ms_to_steps(1000),
            alarm_banner_steps: ms_to_steps(1000),
            weekday_steps: ms_to_steps(1000),
            date_peek_steps: ms_to_steps(1500),
            dimmer_threshold: 200,
            brightness_min: 30,
            brightness_max: 90,
            brightness_increment: 5,
            alarm_tone_hz: 4000,
        }
    }

    /// Clamps `level` into the safe range and rounds it up to the next
    /// increment.
    pub fn quantize_brightness(&self, level: u8) -> u8 {
        let level = level.clamp(self.brightness_min, self.brightness_max);
        let step = self.brightness_increment.max(1);
        match level % step {
            0 => level,
            rem => level.saturating_add(step - rem),
        }
    }

    /// Next brightness in the menu's adjust cycle, wrapping to the minimum
    /// past the maximum.
    pub fn next_brightness(&self, level: u8) -> u8 {
        let next = level.saturating_add(self.brightness_increment.max(1));
        if next > self.brightness_max {
            self.quantize_brightness(self.brightness_min)
        } else {
            self.quantize_brightness(next)
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new()
    }
}
