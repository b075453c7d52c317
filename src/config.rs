//! Tick-counted timing constants and the builder that derives them.
//!
//! Every threshold the handlers compare against is counted in heartbeat
//! ticks. [`TimerConfigBuilder`] derives those counts from the tick rate and
//! wall-clock durations, so changing the tick rate keeps the same behavior.

use fugit::{HertzU32, MillisDurationU32};

/// Electrical level that means "button pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed when the line reads high (pull-down wiring).
    #[default]
    High,

    /// Pressed when the line reads low (pull-up wiring).
    Low,
}

impl ActiveLevel {
    /// Translates a raw line level into a pressed/released reading.
    #[inline]
    pub fn is_pressed(self, line_high: bool) -> bool {
        match self {
            ActiveLevel::High => line_high,
            ActiveLevel::Low => !line_high,
        }
    }

    /// Line level while the button is released.
    #[inline]
    pub fn resting_high(self) -> bool {
        self == ActiveLevel::Low
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick rate of 0 Hz.
    ZeroTickRate,

    /// Half-second window shorter than two ticks.
    WindowTooShort,

    /// A duty window is longer than the half-second window.
    DutyExceedsWindow {
        /// Ticks requested for the duty window.
        duty_ticks: u16,
        /// Ticks in the half-second window.
        window_ticks: u16,
    },

    /// A duration rounds to zero ticks or does not fit a tick counter.
    DurationOutOfRange {
        /// Which duration failed.
        what: &'static str,
        /// Requested duration in milliseconds.
        millis: u32,
    },

    /// Zero units added per press.
    ZeroIncrement,

    /// Long-press threshold of zero ticks.
    ZeroLongPress,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroTickRate => write!(f, "tick rate must be non-zero"),
            ConfigError::WindowTooShort => {
                write!(f, "half-second window must span at least two ticks")
            }
            ConfigError::DutyExceedsWindow {
                duty_ticks,
                window_ticks,
            } => write!(
                f,
                "duty window of {} ticks exceeds the {} tick half-second window",
                duty_ticks, window_ticks
            ),
            ConfigError::DurationOutOfRange { what, millis } => write!(
                f,
                "{} of {} ms does not map to a usable tick count",
                what, millis
            ),
            ConfigError::ZeroIncrement => write!(f, "increment per press must be non-zero"),
            ConfigError::ZeroLongPress => {
                write!(f, "long-press threshold must be at least one tick")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Tick-counted constants consumed by the handlers.
///
/// Build one with [`TimerConfig::builder`], or start from [`TimerConfig::bench`]
/// or [`TimerConfig::field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Heartbeat rate in Hz.
    pub tick_hz: u32,

    /// Ticks per half-second window; one countdown unit elapses per window.
    pub window_ticks: u16,

    /// Ticks at the start of each window during which the LED bar is lit.
    pub display_on_ticks: u16,

    /// Ticks at the start of each window during which the alarm buzzer sounds.
    pub alarm_on_ticks: u16,

    /// Ticks after an accepted press during which edges are ignored.
    pub debounce_ticks: u16,

    /// Consecutive held ticks that put the device to sleep.
    pub long_press_ticks: u16,

    /// Units added per accepted press.
    pub increment_units: u32,

    /// Units loaded at power-up.
    pub initial_units: u32,

    /// Level that reads as "pressed" on the button line.
    pub button_active: ActiveLevel,
}

impl TimerConfig {
    /// Reference tick rate.
    pub const REFERENCE_TICK_HZ: u32 = 100;

    /// Starts a builder for the given heartbeat rate.
    pub fn builder(tick_rate: HertzU32) -> TimerConfigBuilder {
        TimerConfigBuilder::new(tick_rate)
    }

    /// Bench profile: 100 Hz heartbeat, 25 units per press, a 10 tick long
    /// press and an empty countdown at power-up.
    pub const fn bench() -> Self {
        TimerConfig {
            tick_hz: Self::REFERENCE_TICK_HZ,
            window_ticks: 50,
            display_on_ticks: 10,
            alarm_on_ticks: 25,
            debounce_ticks: 8,
            long_press_ticks: 10,
            increment_units: 25,
            initial_units: 0,
            button_active: ActiveLevel::High,
        }
    }

    /// Field profile: five minutes per press, five second long press, and
    /// one block already loaded at power-up.
    pub const fn field() -> Self {
        TimerConfig {
            long_press_ticks: 500,
            increment_units: 600,
            initial_units: 600,
            ..Self::bench()
        }
    }

    /// Replaces the button's active level.
    pub const fn with_active_level(mut self, level: ActiveLevel) -> Self {
        self.button_active = level;
        self
    }

    /// Checks the invariants the handlers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.window_ticks < 2 {
            return Err(ConfigError::WindowTooShort);
        }
        for duty_ticks in [self.display_on_ticks, self.alarm_on_ticks] {
            if duty_ticks > self.window_ticks {
                return Err(ConfigError::DutyExceedsWindow {
                    duty_ticks,
                    window_ticks: self.window_ticks,
                });
            }
        }
        if self.increment_units == 0 {
            return Err(ConfigError::ZeroIncrement);
        }
        if self.long_press_ticks == 0 {
            return Err(ConfigError::ZeroLongPress);
        }
        Ok(())
    }

    /// Length of one countdown unit in milliseconds.
    pub fn unit_millis(&self) -> u32 {
        (self.window_ticks as u32 * 1_000) / self.tick_hz.max(1)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::bench()
    }
}

/// Derives a [`TimerConfig`] from a tick rate and wall-clock durations.
///
/// Defaults match [`TimerConfig::bench`] when built at 100 Hz.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfigBuilder {
    tick_rate: HertzU32,
    window: MillisDurationU32,
    display_duty_percent: u8,
    alarm_duty_percent: u8,
    debounce: MillisDurationU32,
    long_press: MillisDurationU32,
    increment_units: u32,
    initial_units: u32,
    button_active: ActiveLevel,
}

impl TimerConfigBuilder {
    /// Creates a builder with the bench durations.
    pub fn new(tick_rate: HertzU32) -> Self {
        Self {
            tick_rate,
            window: MillisDurationU32::from_ticks(500),
            display_duty_percent: 20,
            alarm_duty_percent: 50,
            debounce: MillisDurationU32::from_ticks(80),
            long_press: MillisDurationU32::from_ticks(100),
            increment_units: 25,
            initial_units: 0,
            button_active: ActiveLevel::High,
        }
    }

    /// Sets the countdown window (one unit). Default 500 ms.
    pub fn window(mut self, window: MillisDurationU32) -> Self {
        self.window = window;
        self
    }

    /// Share of each window with the LED bar lit. Default 20%.
    pub fn display_duty_percent(mut self, percent: u8) -> Self {
        self.display_duty_percent = percent;
        self
    }

    /// Share of each window with the alarm buzzer on. Default 50%.
    pub fn alarm_duty_percent(mut self, percent: u8) -> Self {
        self.alarm_duty_percent = percent;
        self
    }

    /// Sets how long edges are ignored after a press. Default 80 ms.
    pub fn debounce(mut self, debounce: MillisDurationU32) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets how long the button must be held to sleep. Default 100 ms.
    pub fn long_press(mut self, hold: MillisDurationU32) -> Self {
        self.long_press = hold;
        self
    }

    /// Sets the units added per press. Default 25.
    pub fn increment_units(mut self, units: u32) -> Self {
        self.increment_units = units;
        self
    }

    /// Sets the units loaded at power-up. Default 0.
    pub fn initial_units(mut self, units: u32) -> Self {
        self.initial_units = units;
        self
    }

    /// Sets the button's active level. Default high.
    pub fn button_active(mut self, level: ActiveLevel) -> Self {
        self.button_active = level;
        self
    }

    /// Derives the tick counts and validates the result.
    ///
    /// # Errors
    /// * `ZeroTickRate` - tick rate is 0 Hz
    /// * `DurationOutOfRange` - a duration rounds to zero ticks or overflows a counter
    /// * `WindowTooShort` - the window spans fewer than two ticks
    /// * `DutyExceedsWindow` - a duty percentage above 100
    /// * `ZeroIncrement` - no units added per press
    pub fn build(self) -> Result<TimerConfig, ConfigError> {
        let tick_hz = self.tick_rate.raw();
        if tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let window_ticks = ticks_for("window", self.window, tick_hz)?;
        let debounce_ticks = ticks_for("debounce", self.debounce, tick_hz)?;
        let long_press_ticks = ticks_for("long press", self.long_press, tick_hz)?;

        let config = TimerConfig {
            tick_hz,
            window_ticks,
            display_on_ticks: duty_ticks(window_ticks, self.display_duty_percent),
            alarm_on_ticks: duty_ticks(window_ticks, self.alarm_duty_percent),
            debounce_ticks,
            long_press_ticks,
            increment_units: self.increment_units,
            initial_units: self.initial_units,
            button_active: self.button_active,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Rounds `duration` to the nearest whole tick at `tick_hz`.
fn ticks_for(what: &'static str, duration: MillisDurationU32, tick_hz: u32) -> Result<u16, ConfigError> {
    let millis = duration.ticks();
    let ticks = (millis as u64 * tick_hz as u64 + 500) / 1_000;

    match u16::try_from(ticks) {
        Ok(ticks) if ticks > 0 => Ok(ticks),
        _ => Err(ConfigError::DurationOutOfRange { what, millis }),
    }
}

fn duty_ticks(window_ticks: u16, percent: u8) -> u16 {
    let ticks = (window_ticks as u32 * percent as u32 + 50) / 100;
    ticks.min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn builder_at_reference_rate_matches_bench_preset() {
        let config = TimerConfig::builder(HertzU32::from_raw(100)).build().unwrap();
        assert_eq!(config, TimerConfig::bench());
    }

    #[test]
    fn tick_counts_scale_with_rate() {
        let config = TimerConfig::builder(HertzU32::from_raw(1_000)).build().unwrap();
        assert_eq!(config.window_ticks, 500);
        assert_eq!(config.display_on_ticks, 100);
        assert_eq!(config.alarm_on_ticks, 250);
        assert_eq!(config.debounce_ticks, 80);
        assert_eq!(config.long_press_ticks, 100);
        assert_eq!(config.unit_millis(), 500);
    }

    #[test]
    fn zero_rate_is_rejected() {
        let result = TimerConfig::builder(HertzU32::from_raw(0)).build();
        assert_eq!(result, Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn duration_shorter_than_half_a_tick_is_rejected() {
        let result = TimerConfig::builder(HertzU32::from_raw(100))
            .debounce(MillisDurationU32::from_ticks(4))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::DurationOutOfRange { what: "debounce", millis: 4 })
        ));
    }

    #[test]
    fn active_level_translation() {
        assert!(ActiveLevel::High.is_pressed(true));
        assert!(!ActiveLevel::High.is_pressed(false));
        assert!(ActiveLevel::Low.is_pressed(false));
        assert!(!ActiveLevel::Low.is_pressed(true));
    }

    #[test]
    fn error_messages_format_correctly_for_display() {
        let err = ConfigError::DutyExceedsWindow {
            duty_ticks: 60,
            window_ticks: 50,
        };
        assert_eq!(
            err.to_string(),
            "duty window of 60 ticks exceeds the 50 tick half-second window"
        );
    }
}
