//! Integration tests for power loss, low-power running and restore

mod common;
use common::*;

use vfd_clock::{Button, ClockTime, DisplayMode, PowerAction, PowerMode, StorageSlot};

#[test]
fn mains_loss_checkpoints_and_reboots_into_low_power() {
    let mut clock = booted_clock();
    clock.set_time(ClockTime::new(12, 0, 0).unwrap());
    for _ in 0..3 {
        clock.slow_tick();
    }
    assert_eq!(clock.board().stored(StorageSlot::Second), 0);

    assert_eq!(clock.power_signal(false), PowerAction::EnterLowPower);

    let board = clock.board();
    assert_eq!(board.stored(StorageSlot::Second), 3);
    assert!(!board.tube_powered);
    assert!(!board.boost_enabled);
    assert!(!board.buttons_enabled);
    assert!(!board.sensor_powered);
    assert_eq!(board.tone, None);

    let ctx = clock.context();
    assert_eq!(clock.power_mode(), PowerMode::LowPower);
    assert!(ctx.low_power);
    assert!(ctx.time_unknown);
    assert_eq!(ctx.time, ClockTime::new(12, 0, 3).unwrap());
}

#[test]
fn low_power_keeps_time_but_freezes_everything_else() {
    let mut clock = booted_clock();
    clock.power_signal(false);
    let pushes = clock.board().digit_pushes;

    run_ms(&mut clock, 100);
    clock.board_mut().set_button(Button::Mode, true);
    run_ms(&mut clock, 100);

    assert_eq!(clock.board().digit_pushes, pushes);
    assert_eq!(clock.menu_screen(), None);
    assert_eq!(clock.board().clicks, 0);

    clock.set_time(ClockTime::new(23, 59, 59).unwrap());
    let carry = clock.slow_tick();
    assert!(carry.day);
    assert_eq!(clock.board().stored(StorageSlot::Day), 16);
    assert_eq!(clock.board().conversions, 0);
}

#[test]
fn mains_restore_reboots_with_outputs_on() {
    let mut clock = booted_clock();
    clock.power_signal(false);
    clock.slow_tick();

    assert_eq!(clock.power_signal(true), PowerAction::Restore);

    let board = clock.board();
    assert!(board.tube_powered);
    assert!(board.boost_enabled);
    assert!(board.buttons_enabled);
    assert!(board.sensor_powered);
    assert_eq!(board.stored(StorageSlot::Second), 1);
    assert_eq!(clock.power_mode(), PowerMode::Normal);
    assert_eq!(clock.mode(), DisplayMode::ShowTime);
    assert!(clock.context().time_unknown);
    assert_eq!(clock.context().time, ClockTime::new(12, 0, 1).unwrap());
}

#[test]
fn repeated_level_is_not_an_edge() {
    let mut clock = booted_clock();
    assert_eq!(clock.power_signal(true), PowerAction::None);
    clock.power_signal(false);
    assert_eq!(clock.power_signal(false), PowerAction::None);
}

#[test]
fn power_loss_mid_menu_drops_the_screen() {
    let mut clock = booted_clock();
    tap(&mut clock, Button::Mode);
    assert!(clock.menu_screen().is_some());

    clock.power_signal(false);
    clock.power_signal(true);

    assert_eq!(clock.menu_screen(), None);
    assert_eq!(clock.mode(), DisplayMode::ShowTime);
}

#[test]
fn booting_on_battery_starts_in_low_power() {
    let mut clock = vfd_clock::VfdClock::new(MockBoard::seeded(), Default::default());
    clock.boot(false);

    assert_eq!(clock.power_mode(), PowerMode::LowPower);
    assert!(!clock.board().tube_powered);
    assert_eq!(clock.power_signal(true), PowerAction::Restore);
    assert!(clock.board().tube_powered);
}
