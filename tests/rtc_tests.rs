//! Integration tests for the calendar cascade and live time display

mod common;
use common::*;

use vfd_clock::{CalendarDate, ClockTime, DisplayMode, Region, StorageSlot};

#[test]
fn full_day_returns_to_midnight_with_one_day_rollover() {
    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(0, 0, 0).unwrap());

    let mut day_rollovers = 0;
    let mut hour_rollovers = 0;
    for _ in 0..86_400 {
        let carry = clock.slow_tick();
        day_rollovers += carry.day as u32;
        hour_rollovers += carry.hour as u32;
    }

    assert_eq!(clock.context().time, ClockTime::default());
    assert_eq!(clock.context().date, CalendarDate::new(9, 6, 16).unwrap());
    assert_eq!(day_rollovers, 1);
    assert_eq!(hour_rollovers, 24);
    assert_eq!(clock.board().stored(StorageSlot::Day), 16);
}

#[test]
fn hour_rollover_writes_hour_and_minute_through() {
    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(10, 59, 59).unwrap());
    clock.board_mut().writes.clear();

    clock.slow_tick();

    let board = clock.board();
    assert_eq!(board.stored(StorageSlot::Hour), 11);
    assert_eq!(board.stored(StorageSlot::Minute), 0);
    assert_eq!(board.writes.len(), 2);
}

#[test]
fn minute_rollover_alone_writes_nothing() {
    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(10, 20, 59).unwrap());
    clock.board_mut().writes.clear();

    let carry = clock.slow_tick();

    assert!(carry.minute && !carry.hour);
    assert!(clock.board().writes.is_empty());
}

#[test]
fn leap_day_advances_to_march() {
    let mut clock = booted_clock();
    clock.set_date(CalendarDate::new(4, 2, 28).unwrap());
    clock.set_time(ClockTime::new(23, 59, 59).unwrap());

    clock.slow_tick();
    assert_eq!(clock.context().date, CalendarDate::new(4, 2, 29).unwrap());

    clock.set_time(ClockTime::new(23, 59, 59).unwrap());
    let carry = clock.slow_tick();
    assert!(carry.month);
    assert_eq!(clock.context().date, CalendarDate::new(4, 3, 1).unwrap());
    assert_eq!(clock.board().stored(StorageSlot::Month), 3);
    assert_eq!(clock.board().stored(StorageSlot::Day), 1);
}

#[test]
fn new_year_writes_every_date_field() {
    let mut clock = booted_clock();
    clock.set_date(CalendarDate::new(9, 12, 31).unwrap());
    clock.set_time(ClockTime::new(23, 59, 59).unwrap());

    let carry = clock.slow_tick();

    assert!(carry.day && carry.month && carry.year);
    let board = clock.board();
    assert_eq!(board.stored(StorageSlot::Year), 10);
    assert_eq!(board.stored(StorageSlot::Month), 1);
    assert_eq!(board.stored(StorageSlot::Day), 1);
}

#[test]
fn corrupt_storage_is_wrapped_into_range_at_boot() {
    let mut board = MockBoard::seeded();
    board.seed(StorageSlot::Hour, 30);
    board.seed(StorageSlot::Minute, 75);
    board.seed(StorageSlot::Month, 14);
    board.seed(StorageSlot::Day, 40);
    let clock = booted_with(board);

    let ctx = clock.context();
    assert_eq!((ctx.time.hour, ctx.time.minute), (6, 15));
    assert!(ctx.date.month >= 1 && ctx.date.month <= 12);
    assert!(ctx.date.day >= 1 && ctx.date.day <= 31);
}

#[test]
fn unknown_time_blinks_until_set() {
    let mut clock = booted_clock();
    assert!(clock.context().time_unknown);

    // 12:00:00 -> 12:00:01
    clock.slow_tick();
    assert_eq!(read_display(clock.display()), "        ");
    clock.slow_tick();
    assert_eq!(read_display(clock.display()), "12 00 02");

    clock.set_time(ClockTime::new(12, 0, 10).unwrap());
    clock.slow_tick();
    assert_eq!(read_display(clock.display()), "12 00 11");
}

#[test]
fn region_selects_12_or_24_hour_rendering() {
    let mut board = MockBoard::seeded();
    board.seed(StorageSlot::Region, 1);
    let mut clock = booted_with(board);
    assert_eq!(clock.context().region, Region::Eu);
    clock.set_time(ClockTime::new(17, 45, 0).unwrap());
    clock.slow_tick();
    assert_eq!(read_display(clock.display()), "17 45 01");

    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(17, 45, 0).unwrap());
    clock.slow_tick();
    assert_eq!(read_display(clock.display()), " 5 45 01");
    assert!(clock.display().pm());
}

#[test]
fn multiplexer_scans_rendered_time_onto_tube() {
    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(9, 41, 0).unwrap());
    clock.slow_tick();
    assert_eq!(clock.mode(), DisplayMode::ShowTime);

    run_steps(&mut clock, 9);

    let board = clock.board();
    assert_eq!(board.digit_pushes, 9);
    assert_eq!(&board.tube[1..], &clock.display().as_slice()[1..]);
}
