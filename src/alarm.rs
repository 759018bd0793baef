//! Alarm sequencer: trigger, 1 Hz buzzer pulsing, snooze and the on/off
//! switch.
//!
//! The trigger and the snooze countdown run on the slow tick. Pulsing runs
//! on the display frame rate so the buzzer cadence is independent of the
//! calendar second.

use crate::config::ClockConfig;
use crate::context::{BannerPage, ClockContext};
use crate::hardware::{Buzzer, SegmentFont};
use crate::time::{ALARM_PULSE_FRAMES, Prescaler};
use crate::types::DisplayMode;

#[derive(Debug, Clone, Copy)]
pub struct AlarmSequencer {
    pulse: Prescaler,
}

impl AlarmSequencer {
    pub const fn new() -> Self {
        Self {
            pulse: Prescaler::new(ALARM_PULSE_FRAMES),
        }
    }

    /// Starts ringing if the alarm is enabled and the clock has just entered
    /// the alarm minute. Fires at most once per minute since it only matches
    /// second 0.
    pub fn check_trigger(&mut self, ctx: &mut ClockContext) -> bool {
        if !ctx.alarm.enabled || !ctx.alarm.matches(&ctx.time) {
            return false;
        }
        info!("alarm {}:{} ringing", ctx.alarm.hour, ctx.alarm.minute);
        ctx.alarm_state.ringing = true;
        ctx.alarm_state.snooze.clear();
        self.pulse.reset();
        true
    }

    /// Slow-tick half of snoozing: counts the snooze down and blinks the
    /// alarm indicator. Returns `true` on the tick the snooze runs out.
    pub fn tick_snooze(&mut self, ctx: &mut ClockContext) -> bool {
        if !ctx.alarm_state.snooze.is_running() {
            return false;
        }
        let expired = ctx.alarm_state.snooze.tick();
        if expired {
            ctx.display.set_alarm_indicator(ctx.alarm.enabled);
            self.pulse.reset();
            debug!("snooze over");
        } else {
            ctx.display
                .set_alarm_indicator(ctx.alarm_state.snooze.remaining() % 2 == 1);
        }
        expired
    }

    /// Frame-rate half of ringing: toggles the buzzer once per
    /// [`ALARM_PULSE_FRAMES`] frames while sounding.
    pub fn frame<B: Buzzer + ?Sized>(
        &mut self,
        ctx: &mut ClockContext,
        buzzer: &mut B,
        config: &ClockConfig,
    ) {
        if !ctx.alarm_state.sounding() {
            return;
        }
        if !self.pulse.tick() {
            return;
        }
        ctx.alarm_state.pulse_phase = !ctx.alarm_state.pulse_phase;
        if ctx.alarm_state.pulse_phase {
            buzzer.tone_on(config.alarm_tone_hz);
        } else {
            buzzer.tone_off();
        }
    }

    /// Silences a ringing alarm for the configured snooze time and shows the
    /// snooze banner unless a settings screen owns the display.
    pub fn snooze<B: Buzzer + SegmentFont + ?Sized>(
        &mut self,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
    ) {
        if !ctx.alarm_state.ringing {
            return;
        }
        info!("snoozing for {}s", config.snooze_secs);
        ctx.alarm_state.snooze.arm(config.snooze_secs);
        ctx.alarm_state.pulse_phase = false;
        board.tone_off();

        if !ctx.mode.is_menu() {
            ctx.display.show_text(&*board, "snoozing");
            ctx.mode = DisplayMode::ShowSnooze;
            ctx.banner.arm(config.snooze_banner_steps);
            ctx.follow_up = None;
        }
    }

    /// Applies a debounced alarm switch level.
    ///
    /// Switching on enables the alarm and shows "alarm on", then the alarm
    /// time, as a two-page banner.
    /// Switching off silences the buzzer immediately if it was ringing.
    pub fn set_switch<B: Buzzer + SegmentFont + ?Sized>(
        &mut self,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
        on: bool,
    ) {
        if on == ctx.alarm.enabled {
            return;
        }
        ctx.alarm.enabled = on;
        ctx.alarm_state.snooze.clear();

        if on {
            info!("alarm switched on");
            if !ctx.mode.is_menu() {
                ctx.display.show_text(&*board, "alarm on");
                ctx.display.set_alarm_indicator(true);
                ctx.mode = DisplayMode::ShowSnooze;
                ctx.banner.arm(config.alarm_on_steps);
                ctx.follow_up = Some(BannerPage::AlarmTime);
            }
            return;
        }

        info!("alarm switched off");
        ctx.display.set_alarm_indicator(false);
        if ctx.alarm_state.ringing {
            self.silence(ctx, board);
        }
    }

    /// Stops ringing and quiets the buzzer.
    pub fn silence<B: Buzzer + ?Sized>(&mut self, ctx: &mut ClockContext, buzzer: &mut B) {
        ctx.alarm_state.ringing = false;
        ctx.alarm_state.pulse_phase = false;
        ctx.alarm_state.snooze.clear();
        self.pulse.reset();
        buzzer.tone_off();
    }
}

impl Default for AlarmSequencer {
    fn default() -> Self {
        Self::new()
    }
}
