#![no_std]
#![no_main]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;
use wake_timer::{
    ButtonLine, IndicatorPanel, LowPowerWait, SegmentMask, SharedWakeTimer, TimerConfig,
    WakeTimer, park,
};

/// Core clock after reset on the measured target (HSI, no PLL)
const CORE_CLOCK_HZ: u32 = 8_000_000;

// ============================================================================
// Minimal Hardware Implementations
// ============================================================================

/// Zero-size panel for measuring library overhead
pub struct MinimalPanel;

impl IndicatorPanel for MinimalPanel {
    fn set_segments(&mut self, segments: SegmentMask) {
        core::hint::black_box(segments);
    }

    fn set_buzzer(&mut self, on: bool) {
        core::hint::black_box(on);
    }
}

/// Button line that always reads released
pub struct MinimalButton;

impl ButtonLine for MinimalButton {
    fn is_high(&mut self) -> bool {
        core::hint::black_box(false)
    }
}

/// Wait-for-interrupt sleep
pub struct Wfi;

impl LowPowerWait for Wfi {
    fn wait_for_interrupt(&mut self) {
        cortex_m::asm::wfi();
    }
}

// ============================================================================
// Interrupt Wiring
// ============================================================================

static TIMER: SharedWakeTimer<MinimalPanel, MinimalButton> = SharedWakeTimer::new();

#[exception]
fn SysTick() {
    TIMER.on_tick();
}

#[entry]
fn main() -> ! {
    let mut cp = match cortex_m::Peripherals::take() {
        Some(cp) => cp,
        None => loop {
            cortex_m::asm::nop();
        },
    };

    let config = TimerConfig::field();
    if let Ok(timer) = WakeTimer::new(MinimalPanel, MinimalButton, config) {
        TIMER.install(timer);
    }

    // Link the edge path in as well; a board would call this from its EXTI vector
    core::hint::black_box(TIMER.on_button_edge());

    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(CORE_CLOCK_HZ / config.tick_hz - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    park(&mut Wfi)
}
