//! The clock as a whole: shared context, components and the board.
//!
//! A board wires its interrupts to the entry points here:
//!
//! | entry point                        | source                     |
//! |------------------------------------|----------------------------|
//! | [`VfdClock::fast_tick`]            | 31.25 kHz timer overflow   |
//! | [`VfdClock::slow_tick`]            | 1 Hz RTC crystal timer     |
//! | [`VfdClock::conversion_complete`]  | ADC conversion done        |
//! | [`VfdClock::power_signal`]         | mains comparator edge      |
//! | [`VfdClock::poll`]                 | main loop                  |
//!
//! Each component only writes the context fields it owns (see
//! [`ClockContext`]), so the entry points may preempt one another as long
//! as each call itself is not torn.

use crate::alarm::AlarmSequencer;
use crate::config::ClockConfig;
use crate::context::{BannerPage, ClockContext};
use crate::dimmer::{AmbientDimmer, Reading, apply_brightness};
use crate::display::{DisplayBuffer, DisplayMultiplexer};
use crate::hardware::{Board, StorageExt, StorageSlot};
use crate::input::{Button, InputEvent, SwitchDebouncer};
use crate::menu::{MenuNavigator, Screen};
use crate::power::{PowerAction, PowerMode, PowerMonitor};
use crate::rtc::{self, Carry};
use crate::types::{CalendarDate, ClockTime, DisplayMode, Volume};

/// A complete clock driving one board.
pub struct VfdClock<B: Board> {
    board: B,
    config: ClockConfig,
    ctx: ClockContext,
    mux: DisplayMultiplexer,
    switch: SwitchDebouncer,
    alarm: AlarmSequencer,
    dimmer: AmbientDimmer,
    power: PowerMonitor,
    menu: MenuNavigator,
}

impl<B: Board> VfdClock<B> {
    /// Creates a clock that has not booted yet. Call [`boot`](Self::boot)
    /// before feeding ticks.
    pub fn new(board: B, config: ClockConfig) -> Self {
        Self {
            board,
            ctx: ClockContext::new(&config),
            config,
            mux: DisplayMultiplexer::new(),
            switch: SwitchDebouncer::new(),
            alarm: AlarmSequencer::new(),
            dimmer: AmbientDimmer::new(),
            power: PowerMonitor::default(),
            menu: MenuNavigator::new(),
        }
    }

    /// Restart entry point.
    ///
    /// Reloads every persisted field, drops all runtime state and marks the
    /// time as unknown. With mains present the tube, boost, buttons and
    /// light sensor are switched on; on battery they are all switched off
    /// and only the calendar keeps running.
    pub fn boot(&mut self, power_present: bool) {
        self.ctx = ClockContext::load(&mut self.board, &self.config);
        self.ctx.time_unknown = true;
        self.mux.reset();
        self.switch.reset();
        self.alarm = AlarmSequencer::new();
        self.dimmer.reset();
        self.menu.reset();

        if !power_present {
            warn!("booting on battery");
            self.power = PowerMonitor::new(PowerMode::LowPower);
            self.ctx.low_power = true;
            self.shut_down_outputs();
            return;
        }

        info!("booting on mains");
        self.power = PowerMonitor::new(PowerMode::Normal);
        self.board.set_buttons_enabled(true);
        self.board.set_tube_power(true);
        self.board.set_sensor_power(true);
        self.board.set_boost_enabled(true);
        let level = self.ctx.brightness;
        apply_brightness(&mut self.ctx, &mut self.board, &self.config, level);
        self.board.set_volume(self.ctx.volume == Volume::High);
        self.ctx.mode = DisplayMode::ShowTime;
        self.render_time();
    }

    /// Fast timer entry point.
    ///
    /// Every multiplexer step also samples the buttons and alarm switch and
    /// counts down the banner; every completed frame advances the alarm
    /// pulse.
    pub fn fast_tick(&mut self) {
        if self.ctx.low_power {
            return;
        }
        let Some(step) = self.mux.tick(&self.ctx.display, &mut self.board) else {
            return;
        };

        let ringing = self.ctx.alarm_state.ringing;
        for button in Button::ALL {
            let low = self.board.button_low(button);
            match self.ctx.buttons.sample(button, low, ringing, &self.config) {
                Some(InputEvent::Click) => self.board.click(),
                Some(InputEvent::Snooze) => {
                    self.board.click();
                    self.alarm.snooze(&mut self.ctx, &mut self.board, &self.config);
                }
                None => {}
            }
        }

        let level = self.board.alarm_switch_on();
        if let Some(on) = self.switch.sample(level, &self.config) {
            self.alarm.set_switch(&mut self.ctx, &mut self.board, &self.config, on);
        }

        if self.ctx.banner.tick()
            && matches!(self.ctx.mode, DisplayMode::ShowSnooze | DisplayMode::None)
        {
            self.next_banner_page();
        }

        if step.frame_complete {
            self.alarm.frame(&mut self.ctx, &mut self.board, &self.config);
        }
    }

    /// 1 Hz entry point. Returns which calendar fields rolled over.
    pub fn slow_tick(&mut self) -> Carry {
        let carry = rtc::tick(&mut self.ctx, &mut self.board);
        if self.ctx.low_power {
            return carry;
        }

        if self.ctx.mode == DisplayMode::ShowTime {
            self.render_time();
        }
        self.alarm.check_trigger(&mut self.ctx);
        self.dimmer.request(&self.ctx, &mut self.board);
        self.ctx.inactivity.tick();
        self.alarm.tick_snooze(&mut self.ctx);
        carry
    }

    /// Light sensor completion callback with the 8-bit conversion result.
    pub fn conversion_complete(&mut self, raw: u8) -> Reading {
        self.dimmer
            .complete(&mut self.ctx, &mut self.board, &self.config, raw)
    }

    /// Mains comparator entry point. A change of power state checkpoints
    /// the clock and reboots it in the matching mode.
    pub fn power_signal(&mut self, present: bool) -> PowerAction {
        let action = self.power.signal(present);
        match action {
            PowerAction::EnterLowPower => {
                self.shut_down_outputs();
                self.ctx.checkpoint(&mut self.board);
                self.boot(false);
            }
            PowerAction::Restore => {
                self.ctx.checkpoint(&mut self.board);
                self.boot(true);
            }
            PowerAction::None => {}
        }
        action
    }

    /// Main loop body: runs the settings menu.
    pub fn poll(&mut self) {
        if self.ctx.low_power {
            return;
        }
        self.menu.poll(&mut self.ctx, &mut self.board, &self.config);
    }

    /// Sets and persists the clock time, clearing the time-unknown flag.
    pub fn set_time(&mut self, time: ClockTime) {
        self.ctx.time = time;
        self.ctx.time_unknown = false;
        self.board.store(StorageSlot::Hour, time.hour);
        self.board.store(StorageSlot::Minute, time.minute);
        self.board.store(StorageSlot::Second, time.second);
    }

    pub fn set_date(&mut self, date: CalendarDate) {
        self.ctx.date = date;
        self.board.store(StorageSlot::Year, date.year);
        self.board.store(StorageSlot::Month, date.month);
        self.board.store(StorageSlot::Day, date.day);
    }

    /// Sets and persists the alarm time. Whether it is armed is up to the
    /// alarm switch.
    pub fn set_alarm(&mut self, hour: u8, minute: u8) {
        let time = ClockTime::from_storage(hour, minute, 0);
        self.ctx.alarm.hour = time.hour;
        self.ctx.alarm.minute = time.minute;
        self.board.store(StorageSlot::AlarmHour, time.hour);
        self.board.store(StorageSlot::AlarmMinute, time.minute);
    }

    pub fn context(&self) -> &ClockContext {
        &self.ctx
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.ctx.display
    }

    pub fn mode(&self) -> DisplayMode {
        self.ctx.mode
    }

    pub fn menu_screen(&self) -> Option<Screen> {
        self.menu.screen()
    }

    pub fn power_mode(&self) -> PowerMode {
        self.power.mode()
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Tears the clock down and returns the board.
    pub fn into_board(self) -> B {
        self.board
    }

    /// Renders the live clock. An unknown time blinks at 1 Hz.
    fn render_time(&mut self) {
        if self.ctx.time_unknown && self.ctx.time.second % 2 == 1 {
            self.ctx.display.blank();
        } else {
            self.ctx
                .display
                .show_time(&self.board, &self.ctx.time, self.ctx.region);
        }
        self.ctx.display.set_alarm_indicator(self.ctx.alarm.enabled);
    }

    /// Shows the second page of a two-part banner, or returns to the live
    /// clock once there is none left.
    fn next_banner_page(&mut self) {
        let display = &mut self.ctx.display;
        match self.ctx.follow_up.take() {
            Some(BannerPage::AlarmTime) => {
                let alarm = self.ctx.alarm;
                display.show_alarm(&self.board, alarm.hour, alarm.minute, self.ctx.region);
                display.set_alarm_indicator(alarm.enabled);
                self.ctx.banner.arm(self.config.alarm_banner_steps);
            }
            Some(BannerPage::MonthDay) => {
                display.show_month_day(&self.board, &self.ctx.date);
                self.ctx.banner.arm(self.config.date_peek_steps);
            }
            None => {
                self.ctx.mode = DisplayMode::ShowTime;
                self.render_time();
            }
        }
    }

    fn shut_down_outputs(&mut self) {
        self.board.set_tube_power(false);
        self.board.set_boost_enabled(false);
        self.board.tone_off();
        self.board.set_buttons_enabled(false);
        self.board.set_sensor_power(false);
    }
}
