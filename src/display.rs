//! Display buffer rendering and the digit multiplexer.
//!
//! [`DisplayBuffer`] stores segment bitmasks, not values: position 0 carries
//! indicator bits, positions 1-8 carry characters. The renderers here turn
//! times and dates into glyphs via the board's [`SegmentFont`].
//!
//! [`DisplayMultiplexer`] is the only reader of the buffer. It runs from the
//! fast tick and never looks at time or date state.

use crate::hardware::{DisplaySink, SegmentFont};
use crate::time::{DIGIT_COUNT, MUX_DIVIDER, Prescaler};
use crate::types::{CalendarDate, ClockTime, Region};

/// Position 0: PM indicator.
pub const PM_BIT: u8 = 0x01;
/// Position 0: alarm armed / snoozing indicator.
pub const ALARM_BIT: u8 = 0x02;
/// Positions 1-8: decimal point, used to highlight the field being edited.
pub const DOT_BIT: u8 = 0x01;

/// First of the two positions holding each field in a `hh mm ss` layout.
pub const LEFT_PAIR: usize = 1;
pub const MIDDLE_PAIR: usize = 4;
pub const RIGHT_PAIR: usize = 7;

/// One segment bitmask per physical display position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    segments: [u8; DIGIT_COUNT],
}

impl DisplayBuffer {
    pub const fn new() -> Self {
        Self {
            segments: [0; DIGIT_COUNT],
        }
    }

    /// Segment pattern at `position`; positions past the end read as blank.
    pub fn get(&self, position: usize) -> u8 {
        self.segments.get(position).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.segments
    }

    pub fn set(&mut self, position: usize, segments: u8) {
        if let Some(slot) = self.segments.get_mut(position) {
            *slot = segments;
        }
    }

    pub fn clear(&mut self) {
        self.segments = [0; DIGIT_COUNT];
    }

    pub fn set_pm(&mut self, on: bool) {
        self.set_indicator(PM_BIT, on);
    }

    pub fn set_alarm_indicator(&mut self, on: bool) {
        self.set_indicator(ALARM_BIT, on);
    }

    pub fn alarm_indicator(&self) -> bool {
        self.segments[0] & ALARM_BIT != 0
    }

    pub fn pm(&self) -> bool {
        self.segments[0] & PM_BIT != 0
    }

    fn set_indicator(&mut self, bit: u8, on: bool) {
        if on {
            self.segments[0] |= bit;
        } else {
            self.segments[0] &= !bit;
        }
    }

    /// Sets the decimal point on the two positions starting at `first`.
    pub fn highlight(&mut self, first: usize) {
        for position in first..(first + 2).min(DIGIT_COUNT) {
            self.segments[position] |= DOT_BIT;
        }
    }

    /// Writes `value` (0-99) as two digits starting at `first`.
    pub fn put_two_digits<F: SegmentFont + ?Sized>(&mut self, font: &F, first: usize, value: u8) {
        self.set(first, digit_glyph(font, value / 10));
        self.set(first + 1, digit_glyph(font, value % 10));
    }

    /// Renders up to eight characters into positions 1-8 and clears the
    /// indicator position. Unwritten trailing positions keep their content.
    pub fn show_text<F: SegmentFont + ?Sized>(&mut self, font: &F, text: &str) {
        self.segments[0] = 0;
        for (position, c) in (1..DIGIT_COUNT).zip(text.chars()) {
            self.segments[position] = font.glyph(c);
        }
    }

    /// Blanks positions 1-8 and clears the indicator position.
    pub fn blank(&mut self) {
        self.segments = [0; DIGIT_COUNT];
    }

    /// Renders `hh mm ss`. US region uses a 12-hour clock with the PM
    /// indicator; the alarm indicator bit is left untouched.
    pub fn show_time<F: SegmentFont + ?Sized>(&mut self, font: &F, time: &ClockTime, region: Region) {
        self.put_two_digits(font, RIGHT_PAIR, time.second);
        self.set(6, 0);
        self.put_two_digits(font, MIDDLE_PAIR, time.minute);
        self.set(3, 0);
        self.put_hour(font, time.hour % 24, region);
    }

    /// Renders `hh mm` with an "am"/"pm" suffix in US region.
    pub fn show_alarm<F: SegmentFont + ?Sized>(&mut self, font: &F, hour: u8, minute: u8, region: Region) {
        self.set(8, 0);
        self.set(7, 0);
        self.set(6, 0);
        self.put_two_digits(font, MIDDLE_PAIR, minute);
        self.set(3, 0);
        self.put_hour(font, hour % 24, region);
        if region == Region::Us {
            self.set(7, font.glyph(if hour >= 12 { 'p' } else { 'a' }));
            self.set(8, font.glyph('m'));
        }
    }

    /// Renders `mm-dd-yy` (US) or `dd-mm-yy` (EU).
    pub fn show_date<F: SegmentFont + ?Sized>(&mut self, font: &F, date: &CalendarDate, region: Region) {
        let (first, second) = match region {
            Region::Us => (date.month, date.day),
            Region::Eu => (date.day, date.month),
        };
        self.segments[0] = 0;
        self.put_two_digits(font, LEFT_PAIR, first);
        self.set(3, font.glyph('-'));
        self.put_two_digits(font, MIDDLE_PAIR, second);
        self.set(6, font.glyph('-'));
        self.put_two_digits(font, RIGHT_PAIR, date.year);
    }

    /// Renders the weekday name ("sunday", "wednsday").
    pub fn show_weekday<F: SegmentFont + ?Sized>(&mut self, font: &F, date: &CalendarDate) {
        self.blank();
        self.show_text(font, WEEKDAY_NAMES[usize::from(date.weekday() % 7)]);
    }

    /// Renders the month name with the day in the last two positions
    /// ("june  21").
    pub fn show_month_day<F: SegmentFont + ?Sized>(&mut self, font: &F, date: &CalendarDate) {
        self.blank();
        let month = usize::from(date.month.clamp(1, 12)) - 1;
        self.show_text(font, MONTH_NAMES[month]);
        self.put_two_digits(font, RIGHT_PAIR, date.day);
    }

    fn put_hour<F: SegmentFont + ?Sized>(&mut self, font: &F, hour: u8, region: Region) {
        match region {
            Region::Us => {
                let twelve = (hour + 11) % 12 + 1;
                self.set(2, digit_glyph(font, twelve % 10));
                self.set(1, if twelve >= 10 { digit_glyph(font, 1) } else { 0 });
                self.set_pm(hour >= 12);
            }
            Region::Eu => self.put_two_digits(font, LEFT_PAIR, hour),
        }
    }
}

fn digit_glyph<F: SegmentFont + ?Sized>(font: &F, value: u8) -> u8 {
    font.glyph(char::from(b'0' + value % 10))
}

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednsday", "thursday", "friday", "saturday",
];

// at most five letters so the day fits after a gap
const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "march", "april", "may", "june", "july", "augst", "sept", "octob", "novem",
    "decem",
];

/// A step of the multiplexer: one digit has just been pushed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxStep {
    /// Position that was lit.
    pub digit: u8,
    /// `true` when this step lit the last position of a frame.
    pub frame_complete: bool,
}

/// Cycles the display buffer onto the tube, one position per step.
#[derive(Debug, Clone, Copy)]
pub struct DisplayMultiplexer {
    divider: Prescaler,
    current: u8,
}

impl DisplayMultiplexer {
    pub const fn new() -> Self {
        Self {
            divider: Prescaler::new(MUX_DIVIDER),
            current: 0,
        }
    }

    /// Advances by one fast tick. Every [`MUX_DIVIDER`] ticks pushes the
    /// current position to `sink` and moves on, wrapping after the last.
    pub fn tick<D: DisplaySink + ?Sized>(&mut self, buffer: &DisplayBuffer, sink: &mut D) -> Option<MuxStep> {
        if !self.divider.tick() {
            return None;
        }
        let digit = self.current;
        sink.show_digit(digit, buffer.get(digit as usize));
        self.current = (digit + 1) % DIGIT_COUNT as u8;
        Some(MuxStep {
            digit,
            frame_complete: self.current == 0,
        })
    }

    /// Position that will be lit on the next step.
    pub fn current_digit(&self) -> u8 {
        self.current
    }

    pub fn reset(&mut self) {
        self.divider.reset();
        self.current = 0;
    }
}

impl Default for DisplayMultiplexer {
    fn default() -> Self {
        Self::new()
    }
}
