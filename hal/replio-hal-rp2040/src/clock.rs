//! Microsecond clock backed by the embassy time driver

use embassy_time::Instant;
use replio_hal::Clock;

/// Clock reading the RP2040 TIMER through embassy-time
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}
