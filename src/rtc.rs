//! Real-time clock: the 1 Hz calendar cascade.
//!
//! Each carry is its own guard, evaluated in order with no `else`. That is
//! sound only because the clock advances by exactly one second per tick, so
//! at most one value per field can overflow. Coarser steps would need the
//! cascade re-derived.

use crate::context::ClockContext;
use crate::hardware::{Storage, StorageExt, StorageSlot};
use crate::types::{CalendarDate, ClockTime, is_leap_year};

/// Which fields rolled over during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Carry {
    pub minute: bool,
    pub hour: bool,
    pub day: bool,
    pub month: bool,
    pub year: bool,
}

impl Carry {
    pub fn any(&self) -> bool {
        self.minute || self.hour || self.day || self.month || self.year
    }
}

/// `true` once `day` has run past the end of `month` in year offset `year`.
///
/// Meant for the value right after a day increment: day 29 only ends
/// February in common years, day 30 always does.
pub fn month_ended(day: u8, month: u8, year: u8) -> bool {
    day > 31
        || (day == 31 && matches!(month, 4 | 6 | 9 | 11))
        || (day == 30 && month == 2)
        || (day == 29 && month == 2 && !is_leap_year(2000 + year as u16))
}

/// Advances `time` by one second, cascading into `date`.
pub fn advance(time: &mut ClockTime, date: &mut CalendarDate) -> Carry {
    let mut carry = Carry::default();

    time.second += 1;

    if time.second >= 60 {
        time.second = 0;
        time.minute += 1;
        carry.minute = true;
    }

    if time.minute >= 60 {
        time.minute = 0;
        time.hour += 1;
        carry.hour = true;
    }

    if time.hour >= 24 {
        time.hour = 0;
        date.day += 1;
        carry.day = true;
    }

    if month_ended(date.day, date.month, date.year) {
        date.day = 1;
        date.month += 1;
        carry.month = true;
    }

    if date.month >= 13 {
        date.month = 1;
        date.year = (date.year + 1) % 100;
        carry.year = true;
    }

    carry
}

/// Runs one slow tick of the calendar and writes every field that changed
/// on an hour or larger rollover straight through to storage.
pub fn tick<S: Storage + ?Sized>(ctx: &mut ClockContext, storage: &mut S) -> Carry {
    let carry = advance(&mut ctx.time, &mut ctx.date);

    if carry.hour {
        storage.store(StorageSlot::Hour, ctx.time.hour);
        storage.store(StorageSlot::Minute, ctx.time.minute);
    }
    if carry.day || carry.month {
        storage.store(StorageSlot::Day, ctx.date.day);
    }
    if carry.month {
        storage.store(StorageSlot::Month, ctx.date.month);
    }
    if carry.year {
        storage.store(StorageSlot::Year, ctx.date.year);
        info!("year rollover, offset {}", ctx.date.year);
    }

    carry
}
