//! Console input: RX path, event loop and blocking read

use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};

use super::Console;
use crate::exception::Exception;
use crate::task::{DupTerm, StopReason, TaskEvent, TaskOutcome};

impl<S, W, C, D, const N: usize, const Q: usize> Console<S, W, C, D, N, Q>
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    /// Set the character that raises KeyboardInterrupt
    ///
    /// `None` disables interrupt detection, so every byte is queued.
    pub fn set_interrupt_char(&mut self, c: Option<u8>) {
        self.interrupt_char = c;
    }

    /// Current interrupt character
    pub fn interrupt_char(&self) -> Option<u8> {
        self.interrupt_char
    }

    /// Handle one byte from the primary serial receiver
    ///
    /// The interrupt character is never queued; it raises
    /// KeyboardInterrupt instead. Other bytes go to the ring buffer and are
    /// lost if it is full.
    pub fn receive_byte(&mut self, byte: u8) {
        if self.interrupt_char == Some(byte) {
            self.exception.raise(Exception::KeyboardInterrupt);
            return;
        }

        if !self.input.put(byte) {
            self.stats.rx_overruns = self.stats.rx_overruns.saturating_add(1);
        }
    }

    /// Trigger the dupterm input task
    pub fn signal_dupterm_input(&mut self) {
        self.tasks.post(TaskEvent::DuptermInput);
    }

    /// Check and clear the input-ready signal
    ///
    /// Set when an input-ready event is processed; an event-driven REPL uses
    /// it to know when to go back to the ring buffer.
    pub fn take_input_signal(&mut self) -> bool {
        core::mem::replace(&mut self.input_signalled, false)
    }

    /// Number of bytes waiting in the input buffer
    pub fn input_pending(&self) -> usize {
        self.input.len()
    }

    /// Run one event-loop iteration
    ///
    /// Drains the serial receiver, checks the dupterm for data, dispatches
    /// at most one queued task event, then raises the pending exception if
    /// there is one. This is the only place a blocked read can be
    /// cancelled.
    pub fn poll_once(&mut self) -> Result<(), Exception> {
        while let Some(byte) = self.serial.try_read() {
            self.receive_byte(byte);
        }

        let dupterm_ready = self.dupterm.get_mut().is_some_and(|term| term.read_ready());
        if dupterm_ready {
            self.signal_dupterm_input();
        }

        match self.tasks.pop() {
            Some(TaskEvent::DuptermInput) => self.run_dupterm_task(),
            Some(TaskEvent::InputReady) => self.input_signalled = true,
            None => {}
        }

        self.exception.check()
    }

    /// Read one character, waiting as long as it takes
    ///
    /// Returns immediately when input is buffered. Otherwise polls the event
    /// loop, feeds the watchdog and sleeps one poll quantum until a byte
    /// arrives or an exception is raised. There is no timeout.
    pub fn read_blocking_char(&mut self) -> Result<u8, Exception> {
        loop {
            if let Some(c) = self.input.get() {
                return Ok(c);
            }

            self.poll_once()?;
            self.watchdog.feed();
            self.delay_us(self.config.poll_quantum_us)?;
        }
    }

    fn run_dupterm_task(&mut self) {
        let report = match self.dupterm_task.run(&mut self.dupterm, &mut self.input) {
            TaskOutcome::Skipped => return,
            TaskOutcome::Ran(report) => report,
        };

        if report.dropped > 0 {
            self.stats.dupterm_overruns = self
                .stats
                .dupterm_overruns
                .saturating_add(report.dropped as u32);
            log_warn!("dupterm: input buffer full, {} bytes lost", report.dropped);
        }

        // The stream is already detached, so these only reach the UART
        match report.stop {
            StopReason::Eof => {
                self.stats.dupterm_deactivations = self.stats.dupterm_deactivations.saturating_add(1);
                log_info!("dupterm EOF, deactivated");
                self.write_cooked(b"dupterm: EOF received, deactivating\n");
            }
            StopReason::ReadError(e) => {
                use core::fmt::Write;

                self.stats.dupterm_deactivations = self.stats.dupterm_deactivations.saturating_add(1);
                log_warn!("dupterm read failed, deactivated");
                let _ = write!(self, "dupterm: Exception in read() method, deactivating: {:?}\n", e);
            }
            StopReason::NoTerminal | StopReason::WouldBlock => {}
        }

        if self.config.event_driven_repl {
            self.tasks.post(TaskEvent::InputReady);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::*;
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::task::OverflowPolicy;

    type TestConsole = Console<MockSerial, MockWatchdog, MockClock, MockTerm, 16, 4>;

    fn console(config: ConsoleConfig) -> TestConsole {
        Console::new(
            MockSerial::default(),
            MockWatchdog::default(),
            MockClock::default(),
            config,
        )
    }

    #[test]
    fn test_buffered_byte_returned_without_polling() {
        let mut console = console(ConsoleConfig::default());
        console.receive_byte(0x58);

        assert_eq!(console.read_blocking_char(), Ok(0x58));

        let (serial, watchdog, clock) = console.release();
        assert_eq!(serial.rx_polls, 0);
        assert_eq!(watchdog.feeds, 0);
        assert_eq!(clock.reads, 0);
    }

    #[test]
    fn test_blocking_read_waits_for_serial_input() {
        let mut console = console(ConsoleConfig::default());
        console.serial_mut().rx.extend([None, None, None, Some(b'k')]);

        assert_eq!(console.read_blocking_char(), Ok(b'k'));

        let (_, watchdog, _) = console.release();
        assert!(watchdog.feeds >= 1);
    }

    #[test]
    fn test_interrupt_char_cancels_blocking_read() {
        let mut console = console(ConsoleConfig::default());
        console.serial_mut().rx.extend([None, Some(0x03)]);

        assert_eq!(console.read_blocking_char(), Err(Exception::KeyboardInterrupt));
        assert_eq!(console.input_pending(), 0);

        // Slot was cleared by the poll that raised it
        assert_eq!(console.poll_once(), Ok(()));
    }

    #[test]
    fn test_interrupt_char_disabled_queues_byte() {
        let mut console = console(ConsoleConfig::default());
        console.set_interrupt_char(None);
        console.receive_byte(0x03);
        assert_eq!(console.read_blocking_char(), Ok(0x03));
    }

    #[test]
    fn test_runtime_exception_cancels_blocking_read() {
        let mut console = console(ConsoleConfig::default());
        console.raise(Exception::Raised(17));
        assert_eq!(console.read_blocking_char(), Err(Exception::Raised(17)));
    }

    #[test]
    fn test_rx_overrun_counted() {
        let mut console = console(ConsoleConfig::default());
        for b in 0..20u8 {
            console.receive_byte(b + 0x40);
        }
        assert_eq!(console.input_pending(), 15);
        assert_eq!(console.stats().rx_overruns, 5);
    }

    #[test]
    fn test_dupterm_bytes_then_eof() {
        let mut console = console(ConsoleConfig::default());
        let term = MockTerm::default();
        term.push_bytes(&[0x41, 0x42]);
        term.push_eof();
        console.attach_dupterm(term.clone());

        console.signal_dupterm_input();
        assert_eq!(console.poll_once(), Ok(()));

        assert!(!console.has_dupterm());
        assert_eq!(console.read_blocking_char(), Ok(0x41));
        assert_eq!(console.read_blocking_char(), Ok(0x42));
        assert_eq!(console.input_pending(), 0);
        assert_eq!(console.stats().dupterm_deactivations, 1);

        // Handle absent: another trigger is a no-op
        console.signal_dupterm_input();
        assert_eq!(console.poll_once(), Ok(()));
        assert_eq!(console.input_pending(), 0);

        let (serial, _, _) = console.release();
        assert_eq!(serial.tx, b"dupterm: EOF received, deactivating\r\n");
        // Nothing was mirrored to the stream that just closed
        assert!(term.output.borrow().is_empty());
    }

    #[test]
    fn test_dupterm_read_error_reported() {
        let mut console = console(ConsoleConfig::default());
        let term = MockTerm::default();
        term.push_bytes(b"z");
        term.push_error();
        console.attach_dupterm(term);

        console.signal_dupterm_input();
        assert_eq!(console.poll_once(), Ok(()));
        assert!(!console.has_dupterm());
        assert_eq!(console.input_pending(), 1);

        let (serial, _, _) = console.release();
        assert_eq!(
            serial.tx,
            b"dupterm: Exception in read() method, deactivating: TermError\r\n"
        );
    }

    #[test]
    fn test_dupterm_read_ready_triggers_task() {
        let mut console = console(ConsoleConfig::default());
        let term = MockTerm::default();
        term.push_bytes(b"hi");
        term.ready.set(true);
        console.attach_dupterm(term.clone());

        assert_eq!(console.read_blocking_char(), Ok(b'h'));
        term.ready.set(false);
        assert_eq!(console.read_blocking_char(), Ok(b'i'));
        assert!(console.has_dupterm());
    }

    #[test]
    fn test_event_driven_repl_signals_input() {
        let mut console = console(ConsoleConfig {
            event_driven_repl: true,
            ..ConsoleConfig::default()
        });
        let term = MockTerm::default();
        term.push_bytes(b"x");
        console.attach_dupterm(term);

        console.signal_dupterm_input();
        console.poll_once().unwrap();
        assert!(!console.take_input_signal());

        // The input-ready event is handled on the following iteration
        console.poll_once().unwrap();
        assert!(console.take_input_signal());
        assert!(!console.take_input_signal());
    }

    /// Leaves the queue as [InputReady, DuptermInput x3] and posts one more trigger
    fn fill_behind_input_ready(console: &mut TestConsole) {
        console.attach_dupterm(MockTerm::default());
        console.signal_dupterm_input();
        console.poll_once().unwrap();
        for _ in 0..4 {
            console.signal_dupterm_input();
        }
    }

    #[test]
    fn test_drop_oldest_discards_queued_wake() {
        let mut console = console(ConsoleConfig {
            event_driven_repl: true,
            task_overflow: OverflowPolicy::DropOldest,
            ..ConsoleConfig::default()
        });
        fill_behind_input_ready(&mut console);
        assert_eq!(console.stats().task_drops, 1);

        // The wake was evicted; the next event is a dupterm trigger
        console.poll_once().unwrap();
        assert!(!console.take_input_signal());
    }

    #[test]
    fn test_drop_newest_keeps_queued_wake() {
        let mut console = console(ConsoleConfig {
            event_driven_repl: true,
            task_overflow: OverflowPolicy::DropNewest,
            ..ConsoleConfig::default()
        });
        fill_behind_input_ready(&mut console);
        assert_eq!(console.stats().task_drops, 1);

        console.poll_once().unwrap();
        assert!(console.take_input_signal());
    }

    #[test]
    fn test_task_queue_overflow_counted() {
        let mut console = console(ConsoleConfig::default());
        for _ in 0..6 {
            console.signal_dupterm_input();
        }
        assert_eq!(console.stats().task_drops, 2);
    }
}
