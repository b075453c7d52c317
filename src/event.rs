//! Event-based control for the controller.

use crate::types::Mode;

/// The two interrupt sources the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    /// Heartbeat tick.
    Tick,
    /// Level change on the button line.
    ButtonEdge,
}

/// Result of a button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Counted as a press: time added, mode Active.
    Accepted,
    /// Arrived inside the debounce window and was dropped.
    Debounced,
}

/// Result of dispatching a [`TimerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome {
    /// Tick handled; carries the mode afterwards.
    Ticked(Mode),
    /// Edge handled.
    Edge(EdgeOutcome),
}
