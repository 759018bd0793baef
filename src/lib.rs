#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`VfdClock`**: Owns the board and every component; exposes the interrupt entry points
//! - **`ClockContext`**: State shared between the entry points, one writer per field
//! - **`Board`**: Supertrait over the hardware boundaries to implement for your clock
//! - **`DisplayBuffer`** / **`DisplayMultiplexer`**: Segment bitmasks and the digit scan
//! - **`InputDevice`**: Sample-driven button debouncing with tap, hold and auto-repeat
//! - **`AlarmSequencer`**: Alarm trigger, buzzer pulsing, snooze and the alarm switch
//! - **`MenuNavigator`**: Non-blocking settings screens polled from the main loop
//! - **`AmbientDimmer`**: Asynchronous light readings driving the brightness
//! - **`PowerMonitor`**: Checkpoint and reboot on mains loss and restore
//!
//! All timing derives from two ticks: a fast tick at [`time::FAST_TICK_HZ`] and a
//! 1 Hz slow tick. Durations below a second are counted in multiplexer steps
//! (see [`time::ms_to_steps`]).

#[macro_use]
mod log;

pub mod alarm;
pub mod clock;
pub mod config;
pub mod context;
pub mod dimmer;
pub mod display;
pub mod hardware;
pub mod input;
pub mod menu;
pub mod power;
pub mod rtc;
pub mod time;
pub mod types;

pub use alarm::AlarmSequencer;
pub use clock::VfdClock;
pub use config::ClockConfig;
pub use context::{AlarmState, BannerPage, ClockContext};
pub use dimmer::{AmbientDimmer, Reading};
pub use display::{DisplayBuffer, DisplayMultiplexer, MuxStep};
pub use hardware::{
    Board, BoostConverter, Buzzer, DisplaySink, InputPins, LightSensor, SegmentFont, Storage,
    StorageExt, StorageSlot,
};
pub use input::{Button, ButtonState, InputDevice, InputEvent, SwitchDebouncer};
pub use menu::{Field, MenuNavigator, Screen, Stage};
pub use power::{PowerAction, PowerMode, PowerMonitor};
pub use rtc::Carry;
pub use time::{Countdown, Prescaler};
pub use types::{AlarmSetting, CalendarDate, ClockTime, DisplayMode, Region, ValueError, Volume};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_base_constants() {
        assert_eq!(time::MUX_DIVIDER, 34);
        assert_eq!(time::MUX_STEP_HZ, 919);
        assert_eq!(StorageSlot::Dimmer.address(), 13);
    }
}
