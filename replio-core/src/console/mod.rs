//! Console subsystem
//!
//! [`Console`] owns every piece of console state: the peripherals, the
//! input ring buffer, the dupterm slot and its task, the task queue and
//! the pending-exception slot. The interpreter holds it by `&mut` and
//! calls into it for stdin, stdout and timing.
//!
//! ```text
//!  SerialRx ──┐                     ┌──▶ read_blocking_char()
//!             ├──▶ RingBuffer ──────┤
//!  DupTerm ───┘   (dupterm task)    │
//!                                    │
//!  write_*() ──▶ SerialTx ──▶ DupTerm (mirror)
//! ```

mod input;
mod output;
mod time;

pub use output::DebugWriter;

use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};

use crate::config::ConsoleConfig;
use crate::exception::{Exception, ExceptionSlot};
use crate::ringbuf::{RingBuffer, DEFAULT_RING_SIZE};
use crate::task::{DupTerm, DuptermSlot, DuptermTask, NoDupTerm, TaskQueue, DEFAULT_TASK_QUEUE_DEPTH};

/// Console counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleStats {
    /// Serial RX bytes lost to a full ring buffer
    pub rx_overruns: u32,
    /// Dupterm bytes lost to a full ring buffer
    pub dupterm_overruns: u32,
    /// Task events discarded by the queue overflow policy
    pub task_drops: u32,
    /// Dupterm streams detached after EOF or an error
    pub dupterm_deactivations: u32,
}

/// Serial console bound to one set of peripherals
///
/// - `S`: primary UART (both directions)
/// - `W`: watchdog
/// - `C`: microsecond clock
/// - `D`: dupterm stream type
/// - `N`: input ring buffer slots
/// - `Q`: task queue depth
pub struct Console<
    S,
    W,
    C,
    D = NoDupTerm,
    const N: usize = DEFAULT_RING_SIZE,
    const Q: usize = DEFAULT_TASK_QUEUE_DEPTH,
> {
    serial: S,
    watchdog: W,
    clock: C,
    input: RingBuffer<N>,
    dupterm: DuptermSlot<D>,
    dupterm_task: DuptermTask,
    tasks: TaskQueue<Q>,
    exception: ExceptionSlot,
    interrupt_char: Option<u8>,
    input_signalled: bool,
    config: ConsoleConfig,
    stats: ConsoleStats,
}

impl<S, W, C, D, const N: usize, const Q: usize> Console<S, W, C, D, N, Q>
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    /// Bring up the console on already-initialized peripherals
    ///
    /// Disables the watchdog unless the configuration keeps it running.
    pub fn new(serial: S, mut watchdog: W, clock: C, config: ConsoleConfig) -> Self {
        if !config.watchdog_enabled {
            watchdog.disable();
        }

        log_info!(
            "console up: {} slot input buffer, {} deep task queue",
            N,
            Q
        );

        Self {
            serial,
            watchdog,
            clock,
            input: RingBuffer::new(),
            dupterm: DuptermSlot::empty(),
            dupterm_task: DuptermTask::new(),
            tasks: TaskQueue::new(config.task_overflow),
            exception: ExceptionSlot::new(),
            interrupt_char: config.interrupt_char,
            input_signalled: false,
            config,
            stats: ConsoleStats::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Current counters
    pub fn stats(&self) -> ConsoleStats {
        ConsoleStats {
            task_drops: self.tasks.dropped(),
            ..self.stats
        }
    }

    /// Access the primary UART
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Attach a dupterm stream, returning the one it replaces
    pub fn attach_dupterm(&mut self, term: D) -> Option<D> {
        log_info!("dupterm attached");
        self.dupterm.attach(term)
    }

    /// Detach the dupterm stream
    pub fn detach_dupterm(&mut self) -> Option<D> {
        self.dupterm.detach()
    }

    /// Check if a dupterm stream is attached
    pub fn has_dupterm(&self) -> bool {
        self.dupterm.is_attached()
    }

    /// Store an exception to be raised at the next event-loop poll
    pub fn raise(&mut self, exception: Exception) {
        self.exception.raise(exception);
    }

    /// Report a failed low-level assertion
    ///
    /// Prints the location on the debug sink and returns the exception
    /// the caller must propagate into the interpreter.
    pub fn assertion_failed(&mut self, file: &str, line: u32, func: &str, expr: &str) -> Exception {
        use core::fmt::Write;

        let _ = write!(self.debug_writer(), "assert:{}:{}:{}: {}\n", file, line, func, expr);
        log_warn!("low-level assertion failed at line {}", line);
        Exception::Assertion
    }

    /// Tear down, returning the peripherals
    pub fn release(self) -> (S, W, C) {
        (self.serial, self.watchdog, self.clock)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Mock peripherals shared by the console tests

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};

    use crate::task::DupTerm;

    /// UART recording transmitted bytes and replaying a receive script
    #[derive(Default)]
    pub struct MockSerial {
        pub tx: Vec<u8>,
        /// Each poll pops one entry; `None` entries model an idle line
        pub rx: VecDeque<Option<u8>>,
        pub rx_polls: usize,
        pub flushes: usize,
    }

    impl SerialTx for MockSerial {
        fn write_byte(&mut self, byte: u8) {
            self.tx.push(byte);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    impl SerialRx for MockSerial {
        fn try_read(&mut self) -> Option<u8> {
            self.rx_polls += 1;
            self.rx.pop_front().flatten()
        }
    }

    #[derive(Default)]
    pub struct MockWatchdog {
        pub feeds: usize,
        pub disabled: bool,
    }

    impl Watchdog for MockWatchdog {
        fn feed(&mut self) {
            self.feeds += 1;
        }

        fn disable(&mut self) {
            self.disabled = true;
        }
    }

    /// Clock advancing a fixed step on every read
    pub struct MockClock {
        pub now: u64,
        pub step: u64,
        pub reads: usize,
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self {
                now: 0,
                step: 1,
                reads: 0,
            }
        }
    }

    impl Clock for MockClock {
        fn now_us(&mut self) -> u64 {
            self.reads += 1;
            let now = self.now;
            self.now += self.step;
            now
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TermError;

    /// Dupterm with shared handles so tests can inspect it after the
    /// console has taken ownership
    #[derive(Clone, Default)]
    pub struct MockTerm {
        pub input: Rc<RefCell<VecDeque<Result<Option<u8>, TermError>>>>,
        pub output: Rc<RefCell<Vec<u8>>>,
        pub ready: Rc<Cell<bool>>,
        pub fail_writes: Rc<Cell<bool>>,
    }

    impl MockTerm {
        pub fn push_bytes(&self, bytes: &[u8]) {
            let mut input = self.input.borrow_mut();
            for &b in bytes {
                input.push_back(Ok(Some(b)));
            }
        }

        pub fn push_eof(&self) {
            self.input.borrow_mut().push_back(Ok(None));
        }

        pub fn push_error(&self) {
            self.input.borrow_mut().push_back(Err(TermError));
        }
    }

    impl DupTerm for MockTerm {
        type Error = TermError;

        fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
            match self.input.borrow_mut().pop_front() {
                // Script exhausted: nothing available
                None => Ok(None),
                Some(Ok(Some(b))) => {
                    buf[0] = b;
                    Ok(Some(1))
                }
                // Scripted EOF
                Some(Ok(None)) => Ok(Some(0)),
                Some(Err(e)) => Err(e),
            }
        }

        fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if self.fail_writes.get() {
                return Err(TermError);
            }
            self.output.borrow_mut().extend_from_slice(data);
            Ok(())
        }

        fn read_ready(&mut self) -> bool {
            self.ready.get()
        }
    }
}
