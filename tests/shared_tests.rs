//! Integration tests for SharedWakeTimer

mod common;
use common::*;

use wake_timer::{EdgeOutcome, Mode, SharedWakeTimer, TimerConfig, WakeTimer};

static TIMER: SharedWakeTimer<MockPanel, MockButton> = SharedWakeTimer::new();

#[test]
fn empty_slot_ignores_interrupts() {
    let slot: SharedWakeTimer<MockPanel, MockButton> = SharedWakeTimer::new();

    assert_eq!(slot.on_tick(), None);
    assert_eq!(slot.on_button_edge(), None);
    assert!(slot.take().is_none());
}

#[test]
fn handlers_run_through_the_slot() {
    let slot = SharedWakeTimer::default();
    assert!(slot.install(bench_timer()).is_none());

    assert_eq!(slot.on_button_edge(), Some(EdgeOutcome::Accepted));
    assert_eq!(slot.on_button_edge(), Some(EdgeOutcome::Debounced));
    for _ in 0..50 {
        assert_eq!(slot.on_tick(), Some(Mode::Active));
    }

    assert_eq!(slot.with(|timer| timer.remaining_units()), Some(24));

    let timer = slot.take().unwrap();
    assert_eq!(timer.remaining_units(), 24);
    assert_eq!(slot.on_tick(), None);
}

#[test]
fn install_replaces_previous_controller() {
    let slot = SharedWakeTimer::new();
    slot.install(bench_timer());
    slot.on_button_edge();

    let previous = slot.install(bench_timer()).unwrap();

    assert_eq!(previous.remaining_units(), 25);
    assert_eq!(slot.with(|timer| timer.remaining_units()), Some(0));
}

#[test]
fn static_slot_is_shared_across_threads() {
    let timer = WakeTimer::new(MockPanel::new(), MockButton::new(), TimerConfig::bench()).unwrap();
    TIMER.install(timer);
    TIMER.on_button_edge();

    let ticker = std::thread::spawn(|| {
        for _ in 0..100 {
            TIMER.on_tick();
        }
    });
    let presser = std::thread::spawn(|| {
        for _ in 0..100 {
            TIMER.on_button_edge();
        }
    });
    ticker.join().unwrap();
    presser.join().unwrap();

    let state = TIMER.with(|timer| timer.state()).unwrap();
    assert_eq!(state.mode, Mode::Active);
    // Every accepted press added a whole block; decrements are whole units
    assert!(state.remaining_units >= 25 - 2);
    assert!(state.debounce_budget <= 8);
}
