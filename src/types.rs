//! Core value types shared by the handlers.

/// Number of LED segments on the bar.
pub const SEGMENT_COUNT: usize = 5;

/// Operating mode of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Outputs off, countdown suspended, waiting for a press.
    #[default]
    Idle,

    /// Countdown running, LEDs and buzzer live.
    Active,
}

/// Which of the five LED segments are lit, one bit per segment.
///
/// Bit 0 is the first segment. Bits above [`SEGMENT_COUNT`] are never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMask(u8);

impl SegmentMask {
    /// Every segment off.
    pub const OFF: Self = SegmentMask(0);

    /// Every segment on.
    pub const FULL: Self = SegmentMask((1 << SEGMENT_COUNT) - 1);

    /// Lights the first `count` segments, clamped to [`SEGMENT_COUNT`].
    #[inline]
    pub const fn lit(count: u8) -> Self {
        let count = if count as usize > SEGMENT_COUNT {
            SEGMENT_COUNT as u8
        } else {
            count
        };
        SegmentMask(((1u16 << count) - 1) as u8)
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Number of lit segments.
    #[inline]
    pub const fn count(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Returns true if segment `index` is lit.
    #[inline]
    pub const fn is_lit(self, index: usize) -> bool {
        index < SEGMENT_COUNT && self.0 & (1 << index) != 0
    }

    /// Returns true if no segment is lit.
    #[inline]
    pub const fn is_off(self) -> bool {
        self.0 == 0
    }
}

/// Segment count for a remaining time, stepping up once per started block.
///
/// `0` yields zero segments. Each block of `increment_units` lights one more
/// segment, and anything beyond four blocks lights the whole bar.
///
/// | remaining            | segments |
/// |----------------------|----------|
/// | 0                    | 0        |
/// | (0, 1×inc]           | 1        |
/// | (1×inc, 2×inc]       | 2        |
/// | (2×inc, 3×inc]       | 3        |
/// | (3×inc, 4×inc]       | 4        |
/// | > 4×inc              | 5        |
pub fn segments_for(remaining_units: u32, increment_units: u32) -> SegmentMask {
    if remaining_units == 0 || increment_units == 0 {
        return SegmentMask::OFF;
    }

    let mut lit: u8 = 1;
    let mut threshold = increment_units;
    while (lit as usize) < SEGMENT_COUNT && remaining_units > threshold {
        lit += 1;
        threshold = threshold.saturating_add(increment_units);
    }

    SegmentMask::lit(lit)
}

/// Levels currently driven on the output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    /// LED bar.
    pub segments: SegmentMask,

    /// Buzzer line.
    pub buzzer: bool,
}

impl OutputState {
    /// All lines off.
    pub const OFF: Self = OutputState {
        segments: SegmentMask::OFF,
        buzzer: false,
    };

    /// Returns true if every line is off.
    pub fn is_off(&self) -> bool {
        self.segments.is_off() && !self.buzzer
    }
}

/// Snapshot of the counters both handlers share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    /// Current operating mode.
    pub mode: Mode,

    /// Countdown units left before the alarm.
    pub remaining_units: u32,

    /// Position inside the current half-second window.
    pub phase: u16,

    /// Ticks left during which button edges are ignored.
    pub debounce_budget: u16,

    /// Consecutive ticks the button has been seen held.
    pub long_press_counter: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_clamps_to_bar_width() {
        assert_eq!(SegmentMask::lit(0), SegmentMask::OFF);
        assert_eq!(SegmentMask::lit(3).bits(), 0b0_0111);
        assert_eq!(SegmentMask::lit(5), SegmentMask::FULL);
        assert_eq!(SegmentMask::lit(200), SegmentMask::FULL);
    }

    #[test]
    fn segment_table_boundaries() {
        let inc = 25;
        assert_eq!(segments_for(0, inc).count(), 0);
        assert_eq!(segments_for(1, inc).count(), 1);
        assert_eq!(segments_for(25, inc).count(), 1);
        assert_eq!(segments_for(26, inc).count(), 2);
        assert_eq!(segments_for(50, inc).count(), 2);
        assert_eq!(segments_for(51, inc).count(), 3);
        assert_eq!(segments_for(75, inc).count(), 3);
        assert_eq!(segments_for(76, inc).count(), 4);
        assert_eq!(segments_for(100, inc).count(), 4);
        assert_eq!(segments_for(101, inc).count(), 5);
        assert_eq!(segments_for(u32::MAX, inc).count(), 5);
    }

    #[test]
    fn segment_count_never_decreases_with_more_time() {
        let mut previous = 0;
        for remaining in 1..=200 {
            let count = segments_for(remaining, 25).count();
            assert!(count >= previous, "dropped at {}", remaining);
            assert!(count >= 1);
            previous = count;
        }
    }

    #[test]
    fn lit_segments_are_contiguous_from_the_first() {
        let mask = segments_for(60, 25);
        assert!(mask.is_lit(0));
        assert!(mask.is_lit(1));
        assert!(mask.is_lit(2));
        assert!(!mask.is_lit(3));
        assert!(!mask.is_lit(4));
        assert!(!mask.is_lit(5));
    }

    #[test]
    fn huge_increment_does_not_overflow_thresholds() {
        assert_eq!(segments_for(u32::MAX, u32::MAX).count(), 1);
        assert_eq!(segments_for(u32::MAX, u32::MAX / 2).count(), 3);
    }
}
