//! Settings menu, polled from the main loop.
//!
//! Each screen runs the same small state machine: a label ("set time"),
//! then one edit stage per field, then commit. The navigator never blocks;
//! [`MenuNavigator::poll`] consumes whatever button flags the fast tick has
//! raised since the last call and returns.
//!
//! Edits go into a [`Draft`] and only reach [`ClockContext`] and storage on
//! commit. The mode button discards the draft and moves to the next screen.
//! An idle screen times out: alarm and time screens keep a touched draft,
//! every other screen drops it.

use core::fmt::Write;

use crate::config::ClockConfig;
use crate::context::{BannerPage, ClockContext};
use crate::dimmer::apply_brightness;
use crate::display::{LEFT_PAIR, MIDDLE_PAIR, RIGHT_PAIR};
use crate::hardware::{Board, SegmentFont, StorageExt, StorageSlot};
use crate::input::Button;
use crate::types::{CalendarDate, ClockTime, DisplayMode, Region, Volume, days_in_month};

/// The settings screens, in mode-button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Alarm,
    Time,
    Date,
    Brightness,
    Dimmer,
    Volume,
    Region,
}

impl Screen {
    /// Screen reached by pressing mode here; `None` exits the menu.
    pub fn next(self) -> Option<Screen> {
        match self {
            Screen::Alarm => Some(Screen::Time),
            Screen::Time => Some(Screen::Date),
            Screen::Date => Some(Screen::Brightness),
            Screen::Brightness => Some(Screen::Dimmer),
            Screen::Dimmer => Some(Screen::Volume),
            Screen::Volume => Some(Screen::Region),
            Screen::Region => None,
        }
    }

    pub fn mode(self) -> DisplayMode {
        match self {
            Screen::Alarm => DisplayMode::SetAlarm,
            Screen::Time => DisplayMode::SetTime,
            Screen::Date => DisplayMode::SetDate,
            Screen::Brightness => DisplayMode::SetBrightness,
            Screen::Dimmer => DisplayMode::SetDimmer,
            Screen::Volume => DisplayMode::SetVolume,
            Screen::Region => DisplayMode::SetRegion,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Screen::Alarm => "set alrm",
            Screen::Time => "set time",
            Screen::Date => "set date",
            Screen::Brightness => "set brit",
            Screen::Dimmer => "set dimr",
            Screen::Volume => "set vol ",
            Screen::Region => "set regn",
        }
    }

    /// Edit stages of this screen, left to right as displayed.
    pub fn fields(self, region: Region) -> &'static [Field] {
        match (self, region) {
            (Screen::Alarm, _) => &[Field::Hour, Field::Minute],
            (Screen::Time, _) => &[Field::Hour, Field::Minute, Field::Second],
            (Screen::Date, Region::Us) => &[Field::Month, Field::Day, Field::Year],
            (Screen::Date, Region::Eu) => &[Field::Day, Field::Month, Field::Year],
            (Screen::Brightness, _) => &[Field::Level],
            (Screen::Dimmer | Screen::Volume | Screen::Region, _) => &[Field::Toggle],
        }
    }

    /// Whether an idle timeout keeps a touched draft.
    fn saves_on_timeout(self) -> bool {
        matches!(self, Screen::Alarm | Screen::Time)
    }
}

/// One editable value on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hour,
    Minute,
    Second,
    Year,
    Month,
    Day,
    Level,
    Toggle,
}

impl Field {
    /// Increments the field in `draft`, wrapping at its natural modulus.
    fn bump(self, draft: &mut Draft, config: &ClockConfig) {
        let date = &mut draft.date;
        match self {
            Field::Hour => draft.time.hour = (draft.time.hour + 1) % 24,
            Field::Minute => draft.time.minute = (draft.time.minute + 1) % 60,
            Field::Second => draft.time.second = (draft.time.second + 1) % 60,
            Field::Year => date.year = (date.year + 1) % 100,
            Field::Month => date.month = date.month % 12 + 1,
            Field::Day => date.day = date.day % days_in_month(date.month, date.year) + 1,
            Field::Level => draft.level = config.next_brightness(draft.level),
            Field::Toggle => draft.flag = !draft.flag,
        }
        date.day = date.day.min(days_in_month(date.month, date.year));
        draft.dirty = true;
    }
}

/// Where the current screen is in its edit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Label shown, nothing selected yet.
    ShowMenu,
    /// Editing the field at this index of [`Screen::fields`].
    Edit(u8),
}

/// Uncommitted values of the current screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Draft {
    /// Alarm time (second unused) or clock time.
    pub time: ClockTime,
    pub date: CalendarDate,
    pub level: u8,
    /// Dimmer on, volume high, or region EU.
    pub flag: bool,
    /// An adjust press has changed something.
    pub dirty: bool,
}

impl Draft {
    fn capture(screen: Screen, ctx: &ClockContext) -> Self {
        let time = match screen {
            Screen::Alarm => ClockTime {
                hour: ctx.alarm.hour,
                minute: ctx.alarm.minute,
                second: 0,
            },
            _ => ctx.time,
        };
        let flag = match screen {
            Screen::Dimmer => ctx.dimmer_enabled,
            Screen::Volume => ctx.volume == Volume::High,
            Screen::Region => ctx.region == Region::Eu,
            _ => false,
        };
        Self {
            time,
            date: ctx.date,
            level: ctx.brightness,
            flag,
            dirty: false,
        }
    }
}

/// Runs the settings screens against the shared context.
#[derive(Debug, Clone, Copy)]
pub struct MenuNavigator {
    screen: Option<Screen>,
    stage: Stage,
    draft: Draft,
}

impl MenuNavigator {
    pub const fn new() -> Self {
        Self {
            screen: None,
            stage: Stage::ShowMenu,
            draft: Draft {
                time: ClockTime {
                    hour: 0,
                    minute: 0,
                    second: 0,
                },
                date: CalendarDate {
                    year: 0,
                    month: 1,
                    day: 1,
                },
                level: 0,
                flag: false,
                dirty: false,
            },
        }
    }

    /// Active screen, if any.
    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Consumes pending button flags and advances the menu.
    pub fn poll<B: Board + ?Sized>(&mut self, ctx: &mut ClockContext, board: &mut B, config: &ClockConfig) {
        match self.screen {
            Some(screen) => self.run_screen(screen, ctx, board, config),
            None => self.idle(ctx, board, config),
        }
    }

    /// Drops the active screen without saving anything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn idle<B: Board + ?Sized>(&mut self, ctx: &mut ClockContext, board: &mut B, config: &ClockConfig) {
        if ctx.mode != DisplayMode::ShowTime {
            // banners and the date peek swallow presses
            discard_presses(ctx);
            return;
        }
        if ctx.buttons.state_mut(Button::Mode).take_just_pressed() {
            self.enter(Screen::Alarm, ctx, &*board, config);
            return;
        }
        let select = ctx.buttons.state_mut(Button::Select).take_just_pressed();
        let adjust = ctx.buttons.state_mut(Button::Adjust).take_just_pressed();
        ctx.buttons.state_mut(Button::Adjust).take_repeat();
        if select || adjust {
            trace!("date peek");
            ctx.mode = DisplayMode::None;
            ctx.display.show_weekday(&*board, &ctx.date);
            ctx.banner.arm(config.weekday_steps);
            ctx.follow_up = Some(BannerPage::MonthDay);
        }
    }

    fn enter<F: SegmentFont + ?Sized>(
        &mut self,
        screen: Screen,
        ctx: &mut ClockContext,
        font: &F,
        config: &ClockConfig,
    ) {
        debug!("entering {}", screen.label());
        self.screen = Some(screen);
        self.stage = Stage::ShowMenu;
        self.draft = Draft::capture(screen, ctx);
        ctx.mode = screen.mode();
        ctx.inactivity.arm(config.inactivity_secs);
        self.render(screen, ctx, font);
    }

    fn run_screen<B: Board + ?Sized>(
        &mut self,
        screen: Screen,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
    ) {
        if ctx.buttons.any_activity() {
            ctx.inactivity.arm(config.inactivity_secs);
        } else if !ctx.inactivity.is_running() {
            self.time_out(screen, ctx, board, config);
            return;
        }

        if ctx.buttons.state_mut(Button::Mode).take_just_pressed() {
            self.discard(screen, ctx, board, config);
            match screen.next() {
                Some(next) => self.enter(next, ctx, &*board, config),
                None => self.finish(ctx),
            }
            return;
        }

        if ctx.buttons.state_mut(Button::Select).take_just_pressed() {
            let fields = screen.fields(ctx.region);
            match self.stage {
                Stage::ShowMenu => {
                    match screen {
                        Screen::Time => self.draft.time = ctx.time,
                        // undo any dimming while the level is edited
                        Screen::Brightness => {
                            let stored = ctx.brightness;
                            apply_brightness(ctx, board, config, stored);
                        }
                        _ => {}
                    }
                    self.stage = Stage::Edit(0);
                }
                Stage::Edit(i) if usize::from(i) + 1 < fields.len() => {
                    self.stage = Stage::Edit(i + 1);
                }
                Stage::Edit(_) => {
                    self.commit(screen, ctx, board, config);
                    return;
                }
            }
            self.render(screen, ctx, &*board);
        }

        let adjust = ctx.buttons.state_mut(Button::Adjust);
        let step = adjust.take_just_pressed() | adjust.take_repeat();
        if let (true, Stage::Edit(i)) = (step, self.stage) {
            let Some(&field) = screen.fields(ctx.region).get(usize::from(i)) else {
                return;
            };
            field.bump(&mut self.draft, config);
            if field == Field::Level {
                // preview on the tube before committing
                apply_brightness(ctx, board, config, self.draft.level);
            }
            self.render(screen, ctx, &*board);
        }
    }

    fn time_out<B: Board + ?Sized>(
        &mut self,
        screen: Screen,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
    ) {
        if screen.saves_on_timeout() && self.draft.dirty {
            debug!("{} timed out, saving", screen.label());
            self.commit(screen, ctx, board, config);
        } else {
            debug!("{} timed out", screen.label());
            self.discard(screen, ctx, board, config);
            self.finish(ctx);
        }
    }

    fn commit<B: Board + ?Sized>(
        &mut self,
        screen: Screen,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
    ) {
        let draft = self.draft;
        match screen {
            Screen::Alarm => {
                ctx.alarm.hour = draft.time.hour;
                ctx.alarm.minute = draft.time.minute;
                board.store(StorageSlot::AlarmHour, draft.time.hour);
                board.store(StorageSlot::AlarmMinute, draft.time.minute);
            }
            Screen::Time => {
                ctx.time = draft.time;
                ctx.time_unknown = false;
                board.store(StorageSlot::Hour, draft.time.hour);
                board.store(StorageSlot::Minute, draft.time.minute);
                board.store(StorageSlot::Second, draft.time.second);
            }
            Screen::Date => {
                ctx.date = draft.date;
                board.store(StorageSlot::Year, draft.date.year);
                board.store(StorageSlot::Month, draft.date.month);
                board.store(StorageSlot::Day, draft.date.day);
            }
            Screen::Brightness => {
                let level = config.quantize_brightness(draft.level);
                ctx.brightness = level;
                board.store(StorageSlot::Brightness, level);
                apply_brightness(ctx, board, config, level);
            }
            Screen::Dimmer => {
                ctx.dimmer_enabled = draft.flag;
                board.store(StorageSlot::Dimmer, u8::from(draft.flag));
                if !draft.flag {
                    // no reading will come to lift a dimmed tube
                    let stored = ctx.brightness;
                    apply_brightness(ctx, board, config, stored);
                }
            }
            Screen::Volume => {
                ctx.volume = if draft.flag { Volume::High } else { Volume::Low };
                board.store(StorageSlot::Volume, ctx.volume.to_byte());
                board.set_volume(draft.flag);
            }
            Screen::Region => {
                ctx.region = if draft.flag { Region::Eu } else { Region::Us };
                board.store(StorageSlot::Region, ctx.region.to_byte());
            }
        }
        info!("{} saved", screen.label());
        self.finish(ctx);
        if screen == Screen::Date {
            ctx.mode = DisplayMode::None;
            ctx.display.show_date(&*board, &draft.date, ctx.region);
            ctx.banner.arm(config.date_peek_steps);
            ctx.follow_up = None;
        }
    }

    fn discard<B: Board + ?Sized>(
        &mut self,
        screen: Screen,
        ctx: &mut ClockContext,
        board: &mut B,
        config: &ClockConfig,
    ) {
        match screen {
            Screen::Brightness if self.draft.dirty => {
                let stored = ctx.brightness;
                apply_brightness(ctx, board, config, stored);
            }
            // visiting the time screen counts as confirming the time
            Screen::Time => ctx.time_unknown = false,
            _ => {}
        }
    }

    fn finish(&mut self, ctx: &mut ClockContext) {
        self.screen = None;
        self.stage = Stage::ShowMenu;
        ctx.inactivity.clear();
        ctx.mode = DisplayMode::ShowTime;
    }

    fn render<F: SegmentFont + ?Sized>(&self, screen: Screen, ctx: &mut ClockContext, font: &F) {
        let Stage::Edit(i) = self.stage else {
            ctx.display.show_text(font, screen.label());
            return;
        };
        let draft = &self.draft;
        let display = &mut ctx.display;
        match screen {
            Screen::Alarm => display.show_alarm(font, draft.time.hour, draft.time.minute, ctx.region),
            Screen::Time => display.show_time(font, &draft.time, ctx.region),
            Screen::Date => display.show_date(font, &draft.date, ctx.region),
            Screen::Brightness => {
                let mut text = heapless::String::<8>::new();
                let _ = write!(text, "brite {:2}", draft.level);
                display.show_text(font, &text);
            }
            Screen::Dimmer => display.show_text(font, if draft.flag { "dimr on " } else { "dimr off" }),
            Screen::Volume => display.show_text(font, if draft.flag { "vol high" } else { "vol  low" }),
            Screen::Region => display.show_text(font, if draft.flag { "eur-24hr" } else { "usa-12hr" }),
        }
        match screen {
            Screen::Alarm | Screen::Time | Screen::Date => {
                if let Some(&first) = [LEFT_PAIR, MIDDLE_PAIR, RIGHT_PAIR].get(usize::from(i)) {
                    display.highlight(first);
                }
            }
            Screen::Brightness => display.highlight(RIGHT_PAIR),
            _ => {}
        }
    }
}

impl Default for MenuNavigator {
    fn default() -> Self {
        Self::new()
    }
}

fn discard_presses(ctx: &mut ClockContext) {
    for button in Button::ALL {
        let state = ctx.buttons.state_mut(button);
        state.take_just_pressed();
        state.take_repeat();
    }
}
