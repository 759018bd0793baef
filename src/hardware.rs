//! Hardware abstraction traits.
//!
//! Each trait is one fixed boundary of the clock. Implement them for your
//! board (GPIO, SPI, EEPROM, timers) and hand the board to
//! [`VfdClock`](crate::VfdClock). All methods are infallible: handle bus
//! errors inside the implementation.

/// The VFD driver chip behind the multiplexer.
pub trait DisplaySink {
    /// Lights `segments` on display position `digit`, blanking all others.
    ///
    /// The implementation owns the segment-to-driver-pin mapping. The shift
    /// out must not be observed half-done; suspend interrupts around it if
    /// the transfer is multi-step.
    fn show_digit(&mut self, digit: u8, segments: u8);

    /// Switches the tube supply and driver chip on or off.
    fn set_tube_power(&mut self, on: bool);
}

/// Glyph lookup for rendering characters into segment bitmasks.
///
/// Bit 0 of every glyph must be left clear: the display buffer uses it as
/// the decimal point / edit highlight.
pub trait SegmentFont {
    /// Segment pattern for `c`. Unknown characters should return 0.
    fn glyph(&self, c: char) -> u8;
}

/// Byte-addressed durable storage (EEPROM).
pub trait Storage {
    fn read_byte(&mut self, address: u16) -> u8;
    fn write_byte(&mut self, address: u16, value: u8);
}

/// Piezo buzzer and its tone generator.
pub trait Buzzer {
    /// Starts a continuous tone.
    fn tone_on(&mut self, frequency_hz: u16);
    /// Silences the tone generator.
    fn tone_off(&mut self);
    /// Emits a short mechanical click for key feedback.
    fn click(&mut self);
    /// Selects high or low drive.
    fn set_volume(&mut self, high: bool);
}

/// Ambient light sensor behind an ADC.
///
/// Conversions are fire-and-forget: `start_conversion` returns
/// immediately and the board later reports the 8-bit result through
/// [`VfdClock::conversion_complete`](crate::VfdClock::conversion_complete).
pub trait LightSensor {
    fn start_conversion(&mut self);
    /// Powers the sensor divider on or off.
    fn set_sensor_power(&mut self, on: bool);
}

/// Digital input lines: three active-low buttons and the alarm switch.
pub trait InputPins {
    /// Returns `true` while the button's line reads low.
    fn button_low(&mut self, button: crate::Button) -> bool;
    /// Returns `true` while the alarm switch is in the "on" position.
    fn alarm_switch_on(&mut self) -> bool;
    /// Enables or disables the button pull-ups and edge detection.
    fn set_buttons_enabled(&mut self, enabled: bool);
}

/// High-voltage boost converter feeding the tube; its duty sets brightness.
pub trait BoostConverter {
    fn set_boost_level(&mut self, level: u8);
    fn set_boost_enabled(&mut self, on: bool);
}

/// Everything the clock needs from a board.
///
/// Blanket-implemented for any type implementing all the boundary traits.
pub trait Board:
    DisplaySink + SegmentFont + Storage + Buzzer + LightSensor + InputPins + BoostConverter
{
}

impl<T> Board for T where
    T: DisplaySink + SegmentFont + Storage + Buzzer + LightSensor + InputPins + BoostConverter
{
}

/// Durable storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageSlot {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    AlarmHour,
    AlarmMinute,
    Brightness,
    Volume,
    Region,
    Dimmer,
}

impl StorageSlot {
    pub const fn address(self) -> u16 {
        match self {
            StorageSlot::Year => 1,
            StorageSlot::Month => 2,
            StorageSlot::Day => 3,
            StorageSlot::Hour => 4,
            StorageSlot::Minute => 5,
            StorageSlot::Second => 6,
            StorageSlot::AlarmHour => 7,
            StorageSlot::AlarmMinute => 8,
            StorageSlot::Brightness => 9,
            StorageSlot::Volume => 10,
            StorageSlot::Region => 11,
            StorageSlot::Dimmer => 13,
        }
    }
}

/// Slot-typed helpers over [`Storage`].
pub trait StorageExt: Storage {
    fn load(&mut self, slot: StorageSlot) -> u8 {
        self.read_byte(slot.address())
    }

    fn store(&mut self, slot: StorageSlot, value: u8) {
        self.write_byte(slot.address(), value);
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
