//! RP2040 hardware watchdog

use embassy_rp::watchdog::Watchdog as RpWatchdog;
use embassy_time::Duration;
use replio_hal::Watchdog;

/// Watchdog started at construction with a fixed period
pub struct Rp2040Watchdog {
    inner: RpWatchdog,
    running: bool,
}

impl Rp2040Watchdog {
    /// Start the watchdog
    ///
    /// The chip resets if it is not fed within `period`.
    pub fn new(mut inner: RpWatchdog, period: Duration) -> Self {
        // Keep the debugger from tripping it at a breakpoint
        inner.pause_on_debug(true);
        inner.start(period);
        Self {
            inner,
            running: true,
        }
    }
}

impl Watchdog for Rp2040Watchdog {
    fn feed(&mut self) {
        if self.running {
            self.inner.feed();
        }
    }

    fn disable(&mut self) {
        self.inner.stop();
        self.running = false;
    }
}
