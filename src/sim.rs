//! Host-side simulation with synthetic tick and button sources.
//!
//! [`Simulation`] owns a [`WakeTimer`] wired to a [`SimPanel`] and a
//! [`SimButton`] and lets a test or a desktop tool drive both interrupt
//! sources deterministically:
//!
//! - [`press`](Simulation::press) drives the line to its pressed level and
//!   fires one edge, like a board whose edge interrupt is armed for the press
//!   direction only.
//! - [`release`](Simulation::release) returns the line to rest without an edge.
//! - [`release_edge`](Simulation::release_edge) returns the line to rest and
//!   fires an edge, for boards armed on both directions.
//! - [`bounce`](Simulation::bounce) fires an extra edge with the level unchanged.
//!
//! The panel keeps a bounded trace of every line write, oldest first.

use heapless::Vec;

use crate::config::{ConfigError, TimerConfig};
use crate::controller::WakeTimer;
use crate::event::EdgeOutcome;
use crate::io::{ButtonLine, IndicatorPanel, LowPowerWait};
use crate::types::{Mode, OutputState, SegmentMask};

/// One write to the simulated panel, stamped with the tick it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelWrite {
    /// Ticks elapsed when the write happened.
    pub tick: u32,
    /// Levels after the write.
    pub outputs: OutputState,
}

/// Simulated LED bar and buzzer.
///
/// Writes beyond the trace capacity `N` are still applied but not recorded.
#[derive(Debug, Default)]
pub struct SimPanel<const N: usize> {
    outputs: OutputState,
    now: u32,
    trace: Vec<PanelWrite, N>,
}

impl<const N: usize> SimPanel<N> {
    /// Creates a panel with every line off.
    pub fn new() -> Self {
        Self {
            outputs: OutputState::OFF,
            now: 0,
            trace: Vec::new(),
        }
    }

    /// Current line levels.
    pub fn outputs(&self) -> OutputState {
        self.outputs
    }

    /// Recorded writes, oldest first.
    pub fn trace(&self) -> &[PanelWrite] {
        &self.trace
    }

    /// Forgets the recorded writes.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    fn record(&mut self) {
        let _ = self.trace.push(PanelWrite {
            tick: self.now,
            outputs: self.outputs,
        });
    }
}

impl<const N: usize> IndicatorPanel for SimPanel<N> {
    fn set_segments(&mut self, segments: SegmentMask) {
        self.outputs.segments = segments;
        self.record();
    }

    fn set_buzzer(&mut self, on: bool) {
        self.outputs.buzzer = on;
        self.record();
    }
}

/// Simulated button line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimButton {
    high: bool,
    pending: bool,
    edges_cleared: u32,
}

impl SimButton {
    /// Creates a line resting at `high`.
    pub fn new(high: bool) -> Self {
        Self {
            high,
            pending: false,
            edges_cleared: 0,
        }
    }

    /// Sets the raw line level.
    pub fn set_high(&mut self, high: bool) {
        self.high = high;
    }

    /// Latches a pending edge interrupt.
    pub fn raise_edge(&mut self) {
        self.pending = true;
    }

    /// Returns true if an edge is latched and not yet cleared.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of times the controller cleared the pending flag.
    pub fn edges_cleared(&self) -> u32 {
        self.edges_cleared
    }
}

impl ButtonLine for SimButton {
    fn is_high(&mut self) -> bool {
        self.high
    }

    fn clear_pending(&mut self) {
        self.pending = false;
        self.edges_cleared += 1;
    }
}

/// Deterministic driver for a [`WakeTimer`].
///
/// # Type Parameters
/// * `N` - Capacity of the panel write trace
pub struct Simulation<const N: usize = 64> {
    timer: WakeTimer<SimPanel<N>, SimButton>,
    ticks: u32,
    sleeps: u32,
}

impl<const N: usize> Simulation<N> {
    /// Creates an idle simulation with the button at rest.
    ///
    /// # Errors
    /// Any [`ConfigError`] reported by [`TimerConfig::validate`].
    pub fn new(config: TimerConfig) -> Result<Self, ConfigError> {
        let button = SimButton::new(config.button_active.resting_high());
        let timer = WakeTimer::new(SimPanel::new(), button, config)?;

        Ok(Self {
            timer,
            ticks: 0,
            sleeps: 0,
        })
    }

    /// Runs one heartbeat tick.
    ///
    /// Counts a low-power wait when the device is idle afterwards.
    pub fn tick(&mut self) -> Mode {
        self.ticks = self.ticks.wrapping_add(1);
        self.sync_clock();

        let mode = self.timer.on_tick();
        if mode == Mode::Idle {
            self.wait_for_interrupt();
        }
        mode
    }

    /// Runs `ticks` heartbeat ticks.
    pub fn run(&mut self, ticks: u32) -> Mode {
        for _ in 0..ticks {
            self.tick();
        }
        self.timer.mode()
    }

    /// Runs until `done` returns true or `limit` ticks have passed.
    ///
    /// Returns the number of ticks run, or `None` if the limit was hit.
    pub fn run_until(
        &mut self,
        limit: u32,
        mut done: impl FnMut(&WakeTimer<SimPanel<N>, SimButton>) -> bool,
    ) -> Option<u32> {
        for ran in 0..limit {
            if done(&self.timer) {
                return Some(ran);
            }
            self.tick();
        }
        done(&self.timer).then_some(limit)
    }

    /// Drives the line to its pressed level and fires one edge.
    pub fn press(&mut self) -> EdgeOutcome {
        let pressed_high = self.timer.config().button_active.is_pressed(true);
        self.timer.button_mut().set_high(pressed_high);
        self.fire_edge()
    }

    /// Returns the line to its resting level without firing an edge.
    ///
    /// Matches a line armed for the press edge only.
    pub fn release(&mut self) {
        let resting_high = self.timer.config().button_active.resting_high();
        self.timer.button_mut().set_high(resting_high);
    }

    /// Returns the line to its resting level and fires one edge.
    ///
    /// Matches a line armed for both edges, where the release is handled like
    /// any other edge.
    pub fn release_edge(&mut self) -> EdgeOutcome {
        self.release();
        self.fire_edge()
    }

    /// Fires an edge without changing the line level.
    pub fn bounce(&mut self) -> EdgeOutcome {
        self.fire_edge()
    }

    /// Presses, holds for `ticks`, then releases.
    pub fn hold(&mut self, ticks: u32) -> EdgeOutcome {
        let outcome = self.press();
        self.run(ticks);
        self.release();
        outcome
    }

    fn fire_edge(&mut self) -> EdgeOutcome {
        self.sync_clock();
        self.timer.button_mut().raise_edge();
        self.timer.on_button_edge()
    }

    fn sync_clock(&mut self) {
        self.timer.panel_mut().now = self.ticks;
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Low-power waits entered so far.
    pub fn sleeps(&self) -> u32 {
        self.sleeps
    }

    /// The controller under simulation.
    pub fn timer(&self) -> &WakeTimer<SimPanel<N>, SimButton> {
        &self.timer
    }

    /// Current panel levels.
    pub fn outputs(&self) -> OutputState {
        self.timer.panel().outputs()
    }

    /// Recorded panel writes.
    pub fn trace(&self) -> &[PanelWrite] {
        self.timer.panel().trace()
    }

    /// Forgets the recorded panel writes.
    pub fn clear_trace(&mut self) {
        self.timer.panel_mut().clear_trace();
    }
}

impl<const N: usize> LowPowerWait for Simulation<N> {
    fn wait_for_interrupt(&mut self) {
        self.sleeps = self.sleeps.wrapping_add(1);
    }
}
