//! Integration tests for ambient dimming

mod common;
use common::*;

use vfd_clock::{Button, Reading, Screen, StorageSlot};

fn dimming_clock() -> TestClock {
    let mut board = MockBoard::seeded();
    board.seed(StorageSlot::Dimmer, 1);
    booted_with(board)
}

#[test]
fn slow_tick_requests_a_reading_when_enabled() {
    let mut clock = dimming_clock();
    clock.slow_tick();
    clock.slow_tick();
    assert_eq!(clock.board().conversions, 2);

    let mut clock = booted_clock();
    clock.slow_tick();
    assert_eq!(clock.board().conversions, 0);
}

#[test]
fn bright_room_dims_to_minimum_and_dark_room_restores() {
    let mut clock = dimming_clock();
    let config = *clock.config();

    clock.slow_tick();
    assert_eq!(
        clock.conversion_complete(config.dimmer_threshold - 50),
        Reading::Applied(config.brightness_min)
    );
    assert_eq!(clock.board().last_boost_level(), Some(config.brightness_min));

    clock.slow_tick();
    assert_eq!(
        clock.conversion_complete(config.dimmer_threshold + 1),
        Reading::Applied(70)
    );
    assert_eq!(clock.board().last_boost_level(), Some(70));
}

#[test]
fn reading_at_threshold_counts_as_bright() {
    let mut clock = dimming_clock();
    let config = *clock.config();
    clock.slow_tick();
    assert_eq!(
        clock.conversion_complete(config.dimmer_threshold),
        Reading::Applied(config.brightness_min)
    );
}

#[test]
fn reading_arriving_in_brightness_screen_is_discarded() {
    let mut clock = dimming_clock();
    clock.slow_tick();

    tap(&mut clock, Button::Mode);
    while clock.menu_screen() != Some(Screen::Brightness) {
        tap(&mut clock, Button::Mode);
    }
    let levels = clock.board().boost_levels.len();

    assert_eq!(clock.conversion_complete(10), Reading::Discarded);
    assert_eq!(clock.board().boost_levels.len(), levels);
}

#[test]
fn completion_without_request_is_unsolicited() {
    let mut clock = dimming_clock();
    assert_eq!(clock.conversion_complete(10), Reading::Unsolicited);

    clock.slow_tick();
    clock.conversion_complete(10);
    assert_eq!(clock.conversion_complete(10), Reading::Unsolicited);
}

/// Dimming clock whose tube has been pulled down to the minimum
fn dimmed_clock() -> TestClock {
    let mut clock = dimming_clock();
    let min = clock.config().brightness_min;
    clock.slow_tick();
    assert_eq!(clock.conversion_complete(10), Reading::Applied(min));
    clock
}

fn open(clock: &mut TestClock, screen: Screen) {
    tap(clock, Button::Mode);
    while clock.menu_screen() != Some(screen) {
        tap(clock, Button::Mode);
    }
}

#[test]
fn switching_dimmer_off_restores_stored_brightness() {
    let mut clock = dimmed_clock();
    open(&mut clock, Screen::Dimmer);
    tap(&mut clock, Button::Select);
    assert_eq!(read_display(clock.display()), "dimr on ");
    tap(&mut clock, Button::Adjust);
    tap(&mut clock, Button::Select);

    assert!(!clock.context().dimmer_enabled);
    assert_eq!(clock.board().stored(StorageSlot::Dimmer), 0);
    assert_eq!(clock.board().last_boost_level(), Some(70));

    let conversions = clock.board().conversions;
    run_seconds(&mut clock, 5);
    assert_eq!(clock.board().conversions, conversions);
    assert_eq!(clock.board().last_boost_level(), Some(70));
}

#[test]
fn editing_brightness_shows_the_stored_level_on_the_tube() {
    let mut clock = dimmed_clock();
    open(&mut clock, Screen::Brightness);
    assert_eq!(clock.board().last_boost_level(), Some(clock.config().brightness_min));

    tap(&mut clock, Button::Select);

    assert_eq!(read_display(clock.display()), "brite 70");
    assert_eq!(clock.board().last_boost_level(), Some(70));
}
