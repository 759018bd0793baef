//! Core value types: time of day, calendar date, alarm setting and the
//! small persisted preferences.

/// Time of day, 24-hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    /// Creates a validated time.
    ///
    /// # Errors
    /// * `HourOutOfRange`, `MinuteOutOfRange`, `SecondOutOfRange`
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ValueError> {
        if hour >= 24 {
            return Err(ValueError::HourOutOfRange(hour));
        }
        if minute >= 60 {
            return Err(ValueError::MinuteOutOfRange(minute));
        }
        if second >= 60 {
            return Err(ValueError::SecondOutOfRange(second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Builds a time from raw storage bytes, wrapping each field into range.
    pub fn from_storage(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }
}

/// Calendar date. `year` is the offset from 2000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarDate {
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            year: 0,
            month: 1,
            day: 1,
        }
    }
}

impl CalendarDate {
    /// Creates a validated date.
    ///
    /// # Errors
    /// * `YearOutOfRange` - year offset above 99
    /// * `MonthOutOfRange` - month outside 1-12
    /// * `DayOutOfRange` - day is zero or past the end of the month
    pub fn new(year: u8, month: u8, day: u8) -> Result<Self, ValueError> {
        if year >= 100 {
            return Err(ValueError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(ValueError::MonthOutOfRange(month));
        }
        if day == 0 || day > days_in_month(month, year) {
            return Err(ValueError::DayOutOfRange(day));
        }
        Ok(Self { year, month, day })
    }

    /// Builds a date from raw storage bytes.
    ///
    /// Fields are wrapped by modulus first, then pulled into the valid range:
    /// a zero month or day becomes 1 and a day past the month's end becomes
    /// the last day.
    pub fn from_storage(year: u8, month: u8, day: u8) -> Self {
        let year = year % 100;
        let month = (month % 13).max(1);
        let day = (day % 32).clamp(1, days_in_month(month, year));
        Self { year, month, day }
    }

    /// Full four-digit year.
    pub fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }

    /// Day of the week, 0 = Sunday.
    pub fn weekday(&self) -> u8 {
        let (mut month, mut year) = (self.month as u16, self.full_year());
        if month < 3 {
            month += 12;
            year -= 1;
        }
        let sum = self.day as u16 + 2 * month + (6 * (month + 1)) / 10 + year + year / 4
            - year / 100
            + year / 400
            + 1;
        (sum % 7) as u8
    }
}

/// Gregorian leap-year test.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of year offset `year`.
pub fn days_in_month(month: u8, year: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(2000 + year as u16) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Alarm time plus the state of the external enable switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSetting {
    pub hour: u8,
    pub minute: u8,
    pub enabled: bool,
}

impl AlarmSetting {
    /// Creates a validated alarm setting.
    pub fn new(hour: u8, minute: u8, enabled: bool) -> Result<Self, ValueError> {
        let time = ClockTime::new(hour, minute, 0)?;
        Ok(Self {
            hour: time.hour,
            minute: time.minute,
            enabled,
        })
    }

    /// Returns `true` if `time` is the first second of the alarm minute.
    pub fn matches(&self, time: &ClockTime) -> bool {
        self.hour == time.hour && self.minute == time.minute && time.second == 0
    }
}

/// Display convention for time and date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// 12-hour time with PM indicator, mm-dd-yy dates.
    #[default]
    Us,
    /// 24-hour time, dd-mm-yy dates.
    Eu,
}

impl Region {
    pub fn from_byte(value: u8) -> Self {
        if value == 0 { Region::Us } else { Region::Eu }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Region::Us => 0,
            Region::Eu => 1,
        }
    }
}

/// Buzzer loudness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Volume {
    #[default]
    Low,
    High,
}

impl Volume {
    pub fn from_byte(value: u8) -> Self {
        if value == 0 { Volume::Low } else { Volume::High }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Volume::Low => 0,
            Volume::High => 1,
        }
    }
}

/// What the display currently shows, and who owns the display buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Live clock; the slow tick renders time into the buffer.
    #[default]
    ShowTime,
    /// Transient banner (snooze, alarm switched on).
    ShowSnooze,
    SetAlarm,
    SetTime,
    SetDate,
    SetBrightness,
    SetDimmer,
    SetVolume,
    SetRegion,
    /// Main loop owns the buffer for a non-menu display (date peek).
    None,
}

impl DisplayMode {
    /// Returns `true` for the settings screens.
    pub fn is_menu(&self) -> bool {
        matches!(
            self,
            DisplayMode::SetAlarm
                | DisplayMode::SetTime
                | DisplayMode::SetDate
                | DisplayMode::SetBrightness
                | DisplayMode::SetDimmer
                | DisplayMode::SetVolume
                | DisplayMode::SetRegion
        )
    }
}

/// Value validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
    SecondOutOfRange(u8),
    YearOutOfRange(u8),
    MonthOutOfRange(u8),
    DayOutOfRange(u8),
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueError::HourOutOfRange(v) => write!(f, "hour {} out of range 0-23", v),
            ValueError::MinuteOutOfRange(v) => write!(f, "minute {} out of range 0-59", v),
            ValueError::SecondOutOfRange(v) => write!(f, "second {} out of range 0-59", v),
            ValueError::YearOutOfRange(v) => write!(f, "year offset {} out of range 0-99", v),
            ValueError::MonthOutOfRange(v) => write!(f, "month {} out of range 1-12", v),
            ValueError::DayOutOfRange(v) => {
                write!(f, "day {} out of range for the given month", v)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValueError {}
