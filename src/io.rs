//! Hardware-facing traits and embedded-hal adapters.
//!
//! The controller only ever talks to these three traits. Implement them for
//! your board directly, or wrap `embedded-hal` pins with [`PinPanel`] and
//! [`PinButton`].

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::config::ActiveLevel;
use crate::types::{SEGMENT_COUNT, SegmentMask};

/// Trait for abstracting the LED bar and buzzer lines.
///
/// Implementations should apply the levels immediately. Handle any hardware
/// errors internally - these methods cannot fail.
pub trait IndicatorPanel {
    /// Drives every LED segment to match `segments`.
    fn set_segments(&mut self, segments: SegmentMask);

    /// Switches the buzzer on or off.
    fn set_buzzer(&mut self, on: bool);
}

/// Trait for abstracting the button input line.
pub trait ButtonLine {
    /// Returns the raw electrical level of the line.
    ///
    /// The controller applies the configured active level on top of this.
    fn is_high(&mut self) -> bool;

    /// Clears the pending edge interrupt flag for the line.
    ///
    /// Called once at the end of every edge handler invocation, accepted or
    /// not. The default does nothing, for HALs that clear the flag on read.
    fn clear_pending(&mut self) {}
}

/// Low-power wait primitive, exited only by an interrupt.
pub trait LowPowerWait {
    /// Sleeps until the next interrupt has been serviced.
    fn wait_for_interrupt(&mut self);
}

/// Background loop for interrupt-driven deployments.
///
/// Enters the low-power wait at startup and re-enters it every time an
/// interrupt returns. All work happens in the handlers.
pub fn park<W: LowPowerWait>(wait: &mut W) -> ! {
    loop {
        wait.wait_for_interrupt();
    }
}

/// [`IndicatorPanel`] over six `embedded-hal` output pins.
///
/// Pin errors are discarded.
pub struct PinPanel<L, Z>
where
    L: OutputPin,
    Z: OutputPin,
{
    leds: [L; SEGMENT_COUNT],
    buzzer: Z,
}

impl<L, Z> PinPanel<L, Z>
where
    L: OutputPin,
    Z: OutputPin,
{
    /// Creates a panel and drives every line low.
    ///
    /// `leds[0]` is the first segment to light.
    pub fn new(leds: [L; SEGMENT_COUNT], buzzer: Z) -> Self {
        let mut panel = Self { leds, buzzer };
        panel.set_segments(SegmentMask::OFF);
        panel.set_buzzer(false);
        panel
    }

    /// Returns the pins.
    pub fn release(self) -> ([L; SEGMENT_COUNT], Z) {
        (self.leds, self.buzzer)
    }
}

impl<L, Z> IndicatorPanel for PinPanel<L, Z>
where
    L: OutputPin,
    Z: OutputPin,
{
    fn set_segments(&mut self, segments: SegmentMask) {
        for (index, led) in self.leds.iter_mut().enumerate() {
            let _ = led.set_state(PinState::from(segments.is_lit(index)));
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        let _ = self.buzzer.set_state(PinState::from(on));
    }
}

/// [`ButtonLine`] over an `embedded-hal` input pin.
///
/// A failed read reports the line's resting level, so read errors look like
/// a released button whichever way it is wired. Uses the default no-op
/// [`ButtonLine::clear_pending`]; HALs with a latched EXTI flag should
/// implement [`ButtonLine`] on their own pin type instead.
pub struct PinButton<P: InputPin> {
    pin: P,
    resting_high: bool,
}

impl<P: InputPin> PinButton<P> {
    /// Wraps an input pin wired with the given active level.
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self {
            pin,
            resting_high: active.resting_high(),
        }
    }

    /// Returns the pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ButtonLine for PinButton<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(self.resting_high)
    }
}
