//! Shared test infrastructure for vfd-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use vfd_clock::time::{MUX_DIVIDER, ms_to_steps};
use vfd_clock::{
    BoostConverter, Button, Buzzer, ClockConfig, DisplayBuffer, DisplaySink, InputPins,
    LightSensor, SegmentFont, Storage, StorageSlot, VfdClock,
};

// ============================================================================
// Mock Board
// ============================================================================

/// Mock board recording every output and serving settable input levels
pub struct MockBoard {
    pub storage: [u8; 16],
    pub writes: heapless::Vec<(u16, u8), 64>,
    pub tube: [u8; 9],
    pub digit_pushes: u32,
    pub tube_powered: bool,
    pub tone: Option<u16>,
    pub tone_history: heapless::Vec<Option<u16>, 64>,
    pub clicks: u32,
    pub volume_high: Option<bool>,
    pub conversions: u32,
    pub sensor_powered: bool,
    pub buttons_low: [bool; 3],
    pub switch_on: bool,
    pub buttons_enabled: bool,
    pub boost_levels: heapless::Vec<u8, 32>,
    pub boost_enabled: bool,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            storage: [0; 16],
            writes: heapless::Vec::new(),
            tube: [0; 9],
            digit_pushes: 0,
            tube_powered: false,
            tone: None,
            tone_history: heapless::Vec::new(),
            clicks: 0,
            volume_high: None,
            conversions: 0,
            sensor_powered: false,
            buttons_low: [false; 3],
            switch_on: false,
            buttons_enabled: false,
            boost_levels: heapless::Vec::new(),
            boost_enabled: false,
        }
    }

    /// Board whose storage holds 2009-06-15 12:00:00, alarm 07:30,
    /// brightness 70, US region, low volume, dimmer off
    pub fn seeded() -> Self {
        let mut board = Self::new();
        board.seed(StorageSlot::Year, 9);
        board.seed(StorageSlot::Month, 6);
        board.seed(StorageSlot::Day, 15);
        board.seed(StorageSlot::Hour, 12);
        board.seed(StorageSlot::AlarmHour, 7);
        board.seed(StorageSlot::AlarmMinute, 30);
        board.seed(StorageSlot::Brightness, 70);
        board
    }

    pub fn seed(&mut self, slot: StorageSlot, value: u8) {
        self.storage[slot.address() as usize] = value;
    }

    pub fn stored(&self, slot: StorageSlot) -> u8 {
        self.storage[slot.address() as usize]
    }

    pub fn last_boost_level(&self) -> Option<u8> {
        self.boost_levels.last().copied()
    }

    fn index(button: Button) -> usize {
        match button {
            Button::Mode => 0,
            Button::Select => 1,
            Button::Adjust => 2,
        }
    }

    pub fn set_button(&mut self, button: Button, low: bool) {
        self.buttons_low[Self::index(button)] = low;
    }
}

impl DisplaySink for MockBoard {
    fn show_digit(&mut self, digit: u8, segments: u8) {
        self.tube[digit as usize] = segments;
        self.digit_pushes += 1;
    }

    fn set_tube_power(&mut self, on: bool) {
        self.tube_powered = on;
    }
}

impl SegmentFont for MockBoard {
    fn glyph(&self, c: char) -> u8 {
        glyph(c)
    }
}

impl Storage for MockBoard {
    fn read_byte(&mut self, address: u16) -> u8 {
        self.storage[address as usize]
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self.storage[address as usize] = value;
        let _ = self.writes.push((address, value));
    }
}

impl Buzzer for MockBoard {
    fn tone_on(&mut self, frequency_hz: u16) {
        self.tone = Some(frequency_hz);
        let _ = self.tone_history.push(Some(frequency_hz));
    }

    fn tone_off(&mut self) {
        self.tone = None;
        let _ = self.tone_history.push(None);
    }

    fn click(&mut self) {
        self.clicks += 1;
    }

    fn set_volume(&mut self, high: bool) {
        self.volume_high = Some(high);
    }
}

impl LightSensor for MockBoard {
    fn start_conversion(&mut self) {
        self.conversions += 1;
    }

    fn set_sensor_power(&mut self, on: bool) {
        self.sensor_powered = on;
    }
}

impl InputPins for MockBoard {
    fn button_low(&mut self, button: Button) -> bool {
        self.buttons_low[Self::index(button)]
    }

    fn alarm_switch_on(&mut self) -> bool {
        self.switch_on
    }

    fn set_buttons_enabled(&mut self, enabled: bool) {
        self.buttons_enabled = enabled;
    }
}

impl BoostConverter for MockBoard {
    fn set_boost_level(&mut self, level: u8) {
        let _ = self.boost_levels.push(level);
    }

    fn set_boost_enabled(&mut self, on: bool) {
        self.boost_enabled = on;
    }
}

// ============================================================================
// Mock Font
// ============================================================================

/// ASCII shifted left one bit, so bit 0 stays free for the decimal point
pub fn glyph(c: char) -> u8 {
    match c {
        ' ' => 0,
        c if c.is_ascii() => (c as u8) << 1,
        _ => 0,
    }
}

/// Decodes positions 1-8 back into text, ignoring decimal points
pub fn read_display(display: &DisplayBuffer) -> String {
    (1..9)
        .map(|position| match display.get(position) >> 1 {
            0 => ' ',
            code => char::from(code),
        })
        .collect()
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestClock = VfdClock<MockBoard>;

/// Seeded board, booted on mains
pub fn booted_clock() -> TestClock {
    booted_with(MockBoard::seeded())
}

pub fn booted_with(board: MockBoard) -> TestClock {
    let mut clock = VfdClock::new(board, ClockConfig::default());
    clock.boot(true);
    clock
}

/// One multiplexer step followed by a main-loop pass
pub fn step(clock: &mut TestClock) {
    for _ in 0..MUX_DIVIDER {
        clock.fast_tick();
    }
    clock.poll();
}

pub fn run_steps(clock: &mut TestClock, steps: u32) {
    for _ in 0..steps {
        step(clock);
    }
}

pub fn run_ms(clock: &mut TestClock, ms: u32) {
    run_steps(clock, ms_to_steps(ms) as u32);
}

/// One slow tick followed by a main-loop pass
pub fn second(clock: &mut TestClock) {
    clock.slow_tick();
    clock.poll();
}

pub fn run_seconds(clock: &mut TestClock, seconds: u32) {
    for _ in 0..seconds {
        second(clock);
    }
}

/// Holds `button` down for `steps` samples, then releases it for one
pub fn hold(clock: &mut TestClock, button: Button, steps: u32) {
    clock.board_mut().set_button(button, true);
    run_steps(clock, steps);
    clock.board_mut().set_button(button, false);
    step(clock);
}

/// A 50 ms press and 20 ms of release
pub fn tap(clock: &mut TestClock, button: Button) {
    hold(clock, button, ms_to_steps(50) as u32);
    run_ms(clock, 20);
}

/// Settles the alarm switch at `on`
pub fn set_switch(clock: &mut TestClock, on: bool) {
    clock.board_mut().switch_on = on;
    run_ms(clock, 20);
}
