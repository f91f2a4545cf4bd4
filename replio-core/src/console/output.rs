//! Console output path
//!
//! Every byte goes to the UART and is mirrored to the dupterm. The debug
//! sink skips the mirror and writes to the UART alone.

use core::fmt;

use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};

use super::Console;
use crate::task::DupTerm;

impl<S, W, C, D, const N: usize, const Q: usize> Console<S, W, C, D, N, Q>
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    /// Transmit one byte and mirror it to the dupterm
    ///
    /// A dupterm that fails to accept the byte is detached.
    pub fn write_char(&mut self, c: u8) {
        self.serial.write_byte(c);

        let failed = match self.dupterm.get_mut() {
            Some(term) => term.write(&[c]).err(),
            None => None,
        };

        if let Some(e) = failed {
            use fmt::Write;

            self.dupterm.detach();
            self.stats.dupterm_deactivations = self.stats.dupterm_deactivations.saturating_add(1);
            log_warn!("dupterm write failed, deactivated");
            let _ = write!(self, "dupterm: Exception in write() method, deactivating: {:?}\n", e);
        }
    }

    /// Transmit a string
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Transmit raw bytes
    pub fn write_bytes(&mut self, s: &[u8]) {
        for &c in s {
            self.write_char(c);
        }
    }

    /// Transmit bytes with a carriage return before every newline
    ///
    /// A plain substitution: existing `\r\n` pairs gain a second `\r`.
    pub fn write_cooked(&mut self, s: &[u8]) {
        for &c in s {
            if c == b'\n' {
                self.write_char(b'\r');
            }
            self.write_char(c);
        }
    }

    /// Debug sink: cooked output straight to the UART, no dupterm mirror
    pub fn debug_write_cooked(&mut self, s: &[u8]) {
        write_cooked_to(&mut self.serial, s);
    }

    /// `core::fmt::Write` adapter over the debug sink
    pub fn debug_writer(&mut self) -> DebugWriter<'_, S> {
        DebugWriter {
            serial: &mut self.serial,
        }
    }

    /// Wait for the UART to finish transmitting
    pub fn flush(&mut self) {
        self.serial.flush();
    }
}

/// Formatted output goes through the cooked stdout path
impl<S, W, C, D, const N: usize, const Q: usize> fmt::Write for Console<S, W, C, D, N, Q>
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_cooked(s.as_bytes());
        Ok(())
    }
}

/// Formatter for the debug sink
pub struct DebugWriter<'a, S> {
    serial: &'a mut S,
}

impl<S: SerialTx> fmt::Write for DebugWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_cooked_to(self.serial, s.as_bytes());
        Ok(())
    }
}

fn write_cooked_to<S: SerialTx>(serial: &mut S, s: &[u8]) {
    for &c in s {
        if c == b'\n' {
            serial.write_byte(b'\r');
        }
        serial.write_byte(c);
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::super::mock::*;
    use super::*;
    use crate::config::ConsoleConfig;

    type TestConsole = Console<MockSerial, MockWatchdog, MockClock, MockTerm, 16, 4>;

    fn console() -> TestConsole {
        Console::new(
            MockSerial::default(),
            MockWatchdog::default(),
            MockClock::default(),
            ConsoleConfig::default(),
        )
    }

    fn tx(console: TestConsole) -> Vec<u8> {
        console.release().0.tx
    }

    #[test]
    fn test_cooked_inserts_carriage_return() {
        let mut console = console();
        console.write_cooked(b"a\nb");
        assert_eq!(tx(console), b"a\r\nb");
    }

    #[test]
    fn test_cooked_is_literal_substitution() {
        let mut console = console();
        console.write_cooked(b"a\r\nb");
        assert_eq!(tx(console), b"a\r\r\nb");
    }

    #[test]
    fn test_raw_output_untouched() {
        let mut console = console();
        console.write_str("x\ny");
        console.write_bytes(b"\n");
        assert_eq!(tx(console), b"x\ny\n");
    }

    #[test]
    fn test_output_mirrored_to_dupterm() {
        let mut console = console();
        let term = MockTerm::default();
        console.attach_dupterm(term.clone());

        console.write_cooked(b"ok\n");
        assert_eq!(term.output.borrow().as_slice(), b"ok\r\n");
        assert_eq!(tx(console), b"ok\r\n");
    }

    #[test]
    fn test_debug_sink_skips_dupterm() {
        let mut console = console();
        let term = MockTerm::default();
        console.attach_dupterm(term.clone());

        console.debug_write_cooked(b"dbg\n");
        let _ = write!(console.debug_writer(), "n={}\n", 5);

        assert!(term.output.borrow().is_empty());
        assert_eq!(tx(console), b"dbg\r\nn=5\r\n");
    }

    #[test]
    fn test_fmt_write_is_cooked() {
        let mut console = console();
        let _ = write!(console, "{}\n", "line");
        assert_eq!(tx(console), b"line\r\n");
    }

    #[test]
    fn test_failing_dupterm_write_detaches() {
        let mut console = console();
        let term = MockTerm::default();
        term.fail_writes.set(true);
        console.attach_dupterm(term);

        console.write_char(b'q');
        assert!(!console.has_dupterm());
        assert_eq!(console.stats().dupterm_deactivations, 1);
        assert_eq!(
            tx(console),
            b"qdupterm: Exception in write() method, deactivating: TermError\r\n"
        );
    }
}
