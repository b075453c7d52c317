//! Countdown controller with heartbeat and button-edge handlers.
//!
//! Provides [`WakeTimer`], which owns the shared counters, the output panel
//! and the button line. The two interrupt handlers of a deployment call
//! [`WakeTimer::on_tick`] and [`WakeTimer::on_button_edge`]; on targets where
//! those can preempt each other, go through
//! [`SharedWakeTimer`](crate::shared::SharedWakeTimer) instead.

use crate::config::{ConfigError, TimerConfig};
use crate::event::{EdgeOutcome, EventOutcome, TimerEvent};
use crate::io::{ButtonLine, IndicatorPanel};
use crate::types::{Mode, OutputState, SegmentMask, TimerState, segments_for};

/// Countdown/alarm controller for one LED bar, one buzzer and one button.
///
/// Both handlers run to completion in constant time. Output lines are staged
/// while a handler runs and only lines whose level changed are written when
/// it returns.
///
/// # Type Parameters
/// * `P` - LED bar and buzzer implementation
/// * `B` - Button line implementation
pub struct WakeTimer<P: IndicatorPanel, B: ButtonLine> {
    panel: P,
    button: B,
    config: TimerConfig,
    state: TimerState,
    outputs: OutputState,
}

impl<P: IndicatorPanel, B: ButtonLine> WakeTimer<P, B> {
    /// Creates an idle controller with every output off.
    ///
    /// The countdown starts at `config.initial_units`.
    ///
    /// # Errors
    /// Any [`ConfigError`] reported by [`TimerConfig::validate`].
    pub fn new(mut panel: P, button: B, config: TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        panel.set_segments(SegmentMask::OFF);
        panel.set_buzzer(false);

        Ok(Self {
            panel,
            button,
            config,
            state: TimerState {
                remaining_units: config.initial_units,
                ..TimerState::default()
            },
            outputs: OutputState::OFF,
        })
    }

    /// Heartbeat handler. Call once per tick at `config.tick_hz`.
    ///
    /// Returns the mode after the tick; `Mode::Idle` means the caller may
    /// go straight back to its low-power wait.
    pub fn on_tick(&mut self) -> Mode {
        let mut frame = self.outputs;

        self.state.debounce_budget = self.state.debounce_budget.saturating_sub(1);

        if self.state.mode == Mode::Active {
            if self.state.remaining_units > 0 {
                self.count_down(&mut frame);
            } else {
                self.sound_alarm(&mut frame);
            }
        }

        let pressed = self.config.button_active.is_pressed(self.button.is_high());
        self.track_hold(pressed, &mut frame);

        self.commit(frame);
        self.state.mode
    }

    /// Button edge handler. Call on every level change of the button line.
    ///
    /// Edges inside the debounce window are dropped without touching any
    /// state. The pending flag on the line is cleared either way.
    pub fn on_button_edge(&mut self) -> EdgeOutcome {
        let outcome = if self.state.debounce_budget > 0 {
            debug!(
                "edge ignored, {} debounce ticks left",
                self.state.debounce_budget
            );
            EdgeOutcome::Debounced
        } else {
            self.accept_press();
            EdgeOutcome::Accepted
        };

        self.button.clear_pending();
        outcome
    }

    /// Dispatches an event to the matching handler.
    pub fn handle_event(&mut self, event: TimerEvent) -> EventOutcome {
        match event {
            TimerEvent::Tick => EventOutcome::Ticked(self.on_tick()),
            TimerEvent::ButtonEdge => EventOutcome::Edge(self.on_button_edge()),
        }
    }

    fn count_down(&mut self, frame: &mut OutputState) {
        frame.buzzer = false;
        self.advance_phase();

        frame.segments = if self.state.phase < self.config.display_on_ticks {
            segments_for(self.state.remaining_units, self.config.increment_units)
        } else {
            SegmentMask::OFF
        };

        if self.state.phase == 0 {
            self.state.remaining_units -= 1;
            if self.state.remaining_units == 0 {
                info!("countdown expired, sounding alarm");
            }
        }
    }

    fn sound_alarm(&mut self, frame: &mut OutputState) {
        frame.segments = SegmentMask::OFF;
        self.advance_phase();
        frame.buzzer = self.state.phase < self.config.alarm_on_ticks;
    }

    fn track_hold(&mut self, pressed: bool, frame: &mut OutputState) {
        if !pressed {
            self.state.long_press_counter = 0;
            return;
        }

        let held = self.state.long_press_counter.saturating_add(1);
        // Saturated counters stop changing; the threshold fires once per hold.
        let reached =
            held == self.config.long_press_ticks && held != self.state.long_press_counter;
        self.state.long_press_counter = held;
        frame.buzzer = true;

        if reached {
            self.state.mode = Mode::Idle;
            *frame = OutputState::OFF;
            info!(
                "long press, going idle with {} units left",
                self.state.remaining_units
            );
        }
    }

    fn accept_press(&mut self) {
        let mut frame = self.outputs;

        self.state.debounce_budget = self.config.debounce_ticks;

        if self.state.mode == Mode::Idle {
            info!("waking up");
        }
        self.state.mode = Mode::Active;

        frame.buzzer = true;

        self.state.remaining_units = match self
            .state
            .remaining_units
            .checked_add(self.config.increment_units)
        {
            Some(units) => units,
            None => {
                warn!("countdown saturated");
                u32::MAX
            }
        };

        frame.segments = segments_for(self.state.remaining_units, self.config.increment_units);
        self.commit(frame);

        debug!("press accepted, {} units left", self.state.remaining_units);
    }

    fn advance_phase(&mut self) {
        self.state.phase = (self.state.phase + 1) % self.config.window_ticks;
    }

    /// Writes only the lines that changed since the last commit.
    fn commit(&mut self, frame: OutputState) {
        if frame.segments != self.outputs.segments {
            self.panel.set_segments(frame.segments);
        }
        if frame.buzzer != self.outputs.buzzer {
            self.panel.set_buzzer(frame.buzzer);
        }
        self.outputs = frame;
    }

    /// Returns a snapshot of the shared counters.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Returns true while the countdown is at zero in Active mode.
    pub fn is_alarming(&self) -> bool {
        self.state.mode == Mode::Active && self.state.remaining_units == 0
    }

    /// Returns the countdown units left.
    pub fn remaining_units(&self) -> u32 {
        self.state.remaining_units
    }

    /// Returns the levels last written to the panel.
    pub fn outputs(&self) -> OutputState {
        self.outputs
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns a reference to the panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Returns a mutable reference to the panel.
    ///
    /// Lines written through it are not tracked; the next handler run only
    /// rewrites lines whose staged level differs from what it last wrote.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Returns a reference to the button line.
    pub fn button(&self) -> &B {
        &self.button
    }

    /// Returns a mutable reference to the button line.
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// Consumes the controller and returns the panel and button line.
    pub fn into_parts(self) -> (P, B) {
        (self.panel, self.button)
    }
}
