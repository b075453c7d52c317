//! Shared test infrastructure for wake-timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use wake_timer::{ButtonLine, IndicatorPanel, SegmentMask, TimerConfig, WakeTimer};

// ============================================================================
// Mock Panel
// ============================================================================

/// Mock LED bar and buzzer that records every write
pub struct MockPanel {
    segments: SegmentMask,
    buzzer: bool,
    history: heapless::Vec<(SegmentMask, bool), 256>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            segments: SegmentMask::OFF,
            buzzer: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn segments(&self) -> SegmentMask {
        self.segments
    }

    pub fn buzzer(&self) -> bool {
        self.buzzer
    }

    pub fn history(&self) -> &[(SegmentMask, bool)] {
        &self.history
    }
}

impl IndicatorPanel for MockPanel {
    fn set_segments(&mut self, segments: SegmentMask) {
        self.segments = segments;
        let _ = self.history.push((self.segments, self.buzzer));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer = on;
        let _ = self.history.push((self.segments, self.buzzer));
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Mock button line, active high
pub struct MockButton {
    high: bool,
    cleared: u32,
}

impl MockButton {
    pub fn new() -> Self {
        Self {
            high: false,
            cleared: 0,
        }
    }

    pub fn press(&mut self) {
        self.high = true;
    }

    pub fn release(&mut self) {
        self.high = false;
    }

    pub fn set_high(&mut self, high: bool) {
        self.high = high;
    }

    pub fn cleared(&self) -> u32 {
        self.cleared
    }
}

impl ButtonLine for MockButton {
    fn is_high(&mut self) -> bool {
        self.high
    }

    fn clear_pending(&mut self) {
        self.cleared += 1;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestTimer = WakeTimer<MockPanel, MockButton>;

/// Creates an idle timer with the bench profile
pub fn bench_timer() -> TestTimer {
    timer_with(TimerConfig::bench())
}

/// Creates an idle timer with the given configuration
pub fn timer_with(config: TimerConfig) -> TestTimer {
    WakeTimer::new(MockPanel::new(), MockButton::new(), config).unwrap()
}

/// Runs `ticks` heartbeat ticks
pub fn run(timer: &mut TestTimer, ticks: u32) {
    for _ in 0..ticks {
        timer.on_tick();
    }
}

/// Lets the debounce window from the last accepted press run out
pub fn settle(timer: &mut TestTimer) {
    let ticks = timer.state().debounce_budget as u32;
    run(timer, ticks);
}

/// Runs ticks until the countdown reaches zero, returning how many it took
pub fn run_to_alarm(timer: &mut TestTimer) -> u32 {
    let mut ticks = 0;
    while timer.remaining_units() > 0 {
        timer.on_tick();
        ticks += 1;
        assert!(ticks < 1_000_000, "countdown never reached zero");
    }
    ticks
}
