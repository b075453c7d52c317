#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`WakeTimer`**: Owns the countdown state and runs both interrupt handlers
//! - **`TimerConfig`**: Tick-counted thresholds, derived from tick rate and durations
//! - **`IndicatorPanel`**: Trait to implement for the LED bar and buzzer lines
//! - **`ButtonLine`**: Trait to implement for the button input line
//! - **`LowPowerWait`**: Trait to implement for the sleep-until-interrupt primitive
//! - **`SharedWakeTimer`**: Critical-section home for a `WakeTimer` in a `static`
//! - **`Simulation`**: Synthetic tick and button sources for host-side testing
//!
//! The heartbeat handler decays the debounce window, blinks the LED bar or
//! pulses the alarm, counts the countdown down once per window and watches
//! for a long press. The button edge handler adds one block of time and wakes
//! the device. Neither handler blocks.

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod event;
pub mod io;
pub mod shared;
pub mod sim;
pub mod types;

pub use config::{ActiveLevel, ConfigError, TimerConfig, TimerConfigBuilder};
pub use controller::WakeTimer;
pub use event::{EdgeOutcome, EventOutcome, TimerEvent};
pub use io::{ButtonLine, IndicatorPanel, LowPowerWait, PinButton, PinPanel, park};
pub use shared::SharedWakeTimer;
pub use sim::{PanelWrite, SimButton, SimPanel, Simulation};
pub use types::{Mode, OutputState, SEGMENT_COUNT, SegmentMask, TimerState, segments_for};

// Re-export fugit so callers can build configurations without a direct dependency
pub use fugit::{HertzU32, MillisDurationU32};
