//! Ticks and delays

use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};

use super::Console;
use crate::exception::Exception;
use crate::task::DupTerm;

impl<S, W, C, D, const N: usize, const Q: usize> Console<S, W, C, D, N, Q>
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    /// Microsecond tick counter, wrapping at `u32::MAX`
    pub fn ticks_us(&mut self) -> u32 {
        self.clock.now_us() as u32
    }

    /// Millisecond tick counter, wrapping at `u32::MAX`
    pub fn ticks_ms(&mut self) -> u32 {
        (self.clock.now_us() / 1000) as u32
    }

    /// Wait `us` microseconds, running the event loop meanwhile
    ///
    /// An exception raised during the wait ends it early.
    pub fn delay_us(&mut self, us: u32) -> Result<(), Exception> {
        let start = self.clock.now_us();
        while self.clock.now_us().wrapping_sub(start) < u64::from(us) {
            self.poll_once()?;
        }
        Ok(())
    }

    /// Wait `ms` milliseconds, running the event loop meanwhile
    pub fn delay_ms(&mut self, ms: u32) -> Result<(), Exception> {
        self.delay_us(ms.saturating_mul(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::*;
    use super::*;
    use crate::config::ConsoleConfig;

    type TestConsole = Console<MockSerial, MockWatchdog, MockClock, MockTerm, 16, 4>;

    fn console(clock: MockClock) -> TestConsole {
        Console::new(
            MockSerial::default(),
            MockWatchdog::default(),
            clock,
            ConsoleConfig::default(),
        )
    }

    #[test]
    fn test_ticks() {
        let mut console = console(MockClock {
            now: 12_345_678,
            step: 0,
            reads: 0,
        });
        assert_eq!(console.ticks_us(), 12_345_678);
        assert_eq!(console.ticks_ms(), 12_345);
    }

    #[test]
    fn test_ticks_wrap() {
        let mut console = console(MockClock {
            now: u64::from(u32::MAX) + 11,
            step: 0,
            reads: 0,
        });
        assert_eq!(console.ticks_us(), 10);
    }

    #[test]
    fn test_delay_polls_event_loop() {
        let mut console = console(MockClock {
            now: 0,
            step: 10,
            reads: 0,
        });
        assert_eq!(console.delay_us(100), Ok(()));

        let (serial, _, clock) = console.release();
        // One poll per clock read past the first, bar the final check
        assert_eq!(serial.rx_polls, 9);
        assert_eq!(clock.reads, 11);
    }

    #[test]
    fn test_delay_cancelled_by_exception() {
        let mut console = console(MockClock::default());
        console.serial_mut().rx.extend([Some(0x03)]);
        assert_eq!(console.delay_ms(1000), Err(Exception::KeyboardInterrupt));
    }

    #[test]
    fn test_zero_delay_does_not_poll() {
        let mut console = console(MockClock::default());
        assert_eq!(console.delay_us(0), Ok(()));
        let (serial, _, _) = console.release();
        assert_eq!(serial.rx_polls, 0);
    }
}
