//! State shared between the tick handlers and the main loop.
//!
//! There is no locking here. Correctness rests on each field having one
//! writer at a time, listed on the field. On hardware every entry point of
//! [`VfdClock`](crate::VfdClock) runs from its own interrupt (or the main
//! loop), so a board must preserve that discipline when it wraps the clock
//! in whatever sharing primitive it uses.

use crate::config::ClockConfig;
use crate::display::DisplayBuffer;
use crate::hardware::{Storage, StorageExt, StorageSlot};
use crate::input::InputDevice;
use crate::time::Countdown;
use crate::types::{AlarmSetting, CalendarDate, ClockTime, DisplayMode, Region, Volume};

/// Runtime state of the alarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    /// Alarm went off and has not been switched off.
    pub ringing: bool,
    /// Current half of the 1 Hz buzzer pulse.
    pub pulse_phase: bool,
    /// Seconds of snooze left; the buzzer stays quiet while running.
    pub snooze: Countdown,
}

impl AlarmState {
    /// `true` while the buzzer should be pulsing.
    pub fn sounding(&self) -> bool {
        self.ringing && !self.snooze.is_running()
    }
}

/// Second page of a two-part banner, shown when the first page's
/// [`ClockContext::banner`] runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BannerPage {
    /// The alarm time, after "alarm on".
    AlarmTime,
    /// Month name and day, after the weekday name.
    MonthDay,
}

/// Everything the clock's components share.
#[derive(Debug, Clone)]
pub struct ClockContext {
    /// Writer: slow tick. The main loop replaces it only when the time
    /// screen commits.
    pub time: ClockTime,
    /// Writer: slow tick. The main loop replaces it only when the date
    /// screen commits.
    pub date: CalendarDate,
    /// Writer: main loop (alarm screen) for the time, alarm switch sampling
    /// (fast tick) for `enabled`.
    pub alarm: AlarmSetting,
    /// Writers: slow tick (trigger, snooze countdown), fast tick (pulse,
    /// snooze request, switch off).
    pub alarm_state: AlarmState,
    /// Writer: slow tick while in `ShowTime`, main loop while a menu screen
    /// or the date peek owns it, fast tick for the second page of a banner.
    /// The slow tick also flips the indicator bit of position 0 while
    /// snoozing. Reader: multiplexer.
    pub display: DisplayBuffer,
    /// Writer: main loop; the fast tick only returns `ShowSnooze`/`None`
    /// to `ShowTime` when their banner expires.
    pub mode: DisplayMode,
    /// Writer: fast tick sets flags; main loop reads and clears one-shots.
    pub buttons: InputDevice,
    /// User brightness. Writer: main loop (brightness screen).
    pub brightness: u8,
    /// Brightness last sent to the boost converter.
    pub applied_brightness: Option<u8>,
    /// Writer: main loop (dimmer screen).
    pub dimmer_enabled: bool,
    /// Writer: main loop (volume screen).
    pub volume: Volume,
    /// Writer: main loop (region screen).
    pub region: Region,
    /// Set at boot, cleared when the time screen is left.
    pub time_unknown: bool,
    /// Clock fields have been loaded from storage this session.
    pub restored: bool,
    /// Running on backup power: display, inputs and dimmer are off.
    pub low_power: bool,
    /// Seconds until an idle settings screen gives up. Armed by the main
    /// loop, decremented by the slow tick.
    pub inactivity: Countdown,
    /// Multiplexer steps until a banner or date peek returns to
    /// `ShowTime`. Armed by whoever shows the banner, decremented by the
    /// fast tick.
    pub banner: Countdown,
    /// Page to show when `banner` expires instead of returning to
    /// `ShowTime`. Written together with `banner`.
    pub follow_up: Option<BannerPage>,
}

impl ClockContext {
    /// Fresh state with nothing loaded yet.
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            time: ClockTime::default(),
            date: CalendarDate::default(),
            alarm: AlarmSetting::default(),
            alarm_state: AlarmState::default(),
            display: DisplayBuffer::new(),
            mode: DisplayMode::ShowTime,
            buttons: InputDevice::new(),
            brightness: config.brightness_max,
            applied_brightness: None,
            dimmer_enabled: false,
            volume: Volume::Low,
            region: Region::Us,
            time_unknown: true,
            restored: false,
            low_power: false,
            inactivity: Countdown::IDLE,
            banner: Countdown::IDLE,
            follow_up: None,
        }
    }

    /// Loads every persisted field, wrapping corrupt values into range.
    pub fn load<S: Storage + ?Sized>(storage: &mut S, config: &ClockConfig) -> Self {
        let mut ctx = Self::new(config);
        ctx.time = ClockTime::from_storage(
            storage.load(StorageSlot::Hour),
            storage.load(StorageSlot::Minute),
            storage.load(StorageSlot::Second),
        );
        let alarm = ClockTime::from_storage(
            storage.load(StorageSlot::AlarmHour),
            storage.load(StorageSlot::AlarmMinute),
            0,
        );
        ctx.alarm.hour = alarm.hour;
        ctx.alarm.minute = alarm.minute;
        ctx.date = CalendarDate::from_storage(
            storage.load(StorageSlot::Year),
            storage.load(StorageSlot::Month),
            storage.load(StorageSlot::Day),
        );
        ctx.brightness = config.quantize_brightness(storage.load(StorageSlot::Brightness));
        ctx.volume = Volume::from_byte(storage.load(StorageSlot::Volume));
        ctx.region = Region::from_byte(storage.load(StorageSlot::Region));
        ctx.dimmer_enabled = storage.load(StorageSlot::Dimmer) != 0;
        ctx.restored = true;
        ctx
    }

    /// Writes the in-RAM clock fields to storage, but only if they were
    /// loaded from it this session. Date fields are already write-through.
    pub fn checkpoint<S: Storage + ?Sized>(&self, storage: &mut S) -> bool {
        if !self.restored {
            return false;
        }
        storage.store(StorageSlot::Hour, self.time.hour);
        storage.store(StorageSlot::Minute, self.time.minute);
        storage.store(StorageSlot::Second, self.time.second);
        true
    }
}
