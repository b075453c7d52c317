//! Interrupt-safe home for a [`WakeTimer`].
//!
//! The heartbeat and button-edge interrupts both mutate the same counters.
//! [`SharedWakeTimer`] keeps the controller behind a
//! `critical_section::Mutex`, so each handler runs as one uninterrupted
//! read-modify-write even on targets with nested interrupts or a second core.
//!
//! ```ignore
//! static TIMER: SharedWakeTimer<Panel, Button> = SharedWakeTimer::new();
//!
//! #[exception]
//! fn SysTick() {
//!     TIMER.on_tick();
//! }
//!
//! #[interrupt]
//! fn EXTI4_15() {
//!     TIMER.on_button_edge();
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;

use crate::controller::WakeTimer;
use crate::event::EdgeOutcome;
use crate::io::{ButtonLine, IndicatorPanel};
use crate::types::Mode;

/// A [`WakeTimer`] slot usable from a `static`.
///
/// Every method returns `None` until [`install`](Self::install) has run.
pub struct SharedWakeTimer<P: IndicatorPanel, B: ButtonLine> {
    inner: Mutex<RefCell<Option<WakeTimer<P, B>>>>,
}

impl<P: IndicatorPanel, B: ButtonLine> SharedWakeTimer<P, B> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Moves a controller into the slot, returning the previous one.
    pub fn install(&self, timer: WakeTimer<P, B>) -> Option<WakeTimer<P, B>> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(timer)))
    }

    /// Removes the controller from the slot.
    pub fn take(&self) -> Option<WakeTimer<P, B>> {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }

    /// Runs the heartbeat handler inside a critical section.
    pub fn on_tick(&self) -> Option<Mode> {
        self.with(|timer| timer.on_tick())
    }

    /// Runs the button edge handler inside a critical section.
    pub fn on_button_edge(&self) -> Option<EdgeOutcome> {
        self.with(|timer| timer.on_button_edge())
    }

    /// Runs `f` on the controller inside a critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut WakeTimer<P, B>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().as_mut().map(f))
    }
}

impl<P: IndicatorPanel, B: ButtonLine> Default for SharedWakeTimer<P, B> {
    fn default() -> Self {
        Self::new()
    }
}
