//! Configuration type definitions

use replio_hal::UartConfig;

use crate::task::OverflowPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default interrupt character (Ctrl-C)
pub const DEFAULT_INTERRUPT_CHAR: u8 = 0x03;

/// Console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleConfig {
    /// Sleep between idle polls of a blocking read (microseconds)
    pub poll_quantum_us: u32,
    /// Keep the watchdog running; when false it is disabled at init
    pub watchdog_enabled: bool,
    /// Post an input-ready event after each dupterm drain
    pub event_driven_repl: bool,
    /// What a post to the full task queue does
    pub task_overflow: OverflowPolicy,
    /// Character that raises KeyboardInterrupt (None disables)
    pub interrupt_char: Option<u8>,
    /// Primary console UART settings
    pub uart: UartConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            poll_quantum_us: 1,
            watchdog_enabled: false,
            event_driven_repl: false,
            task_overflow: OverflowPolicy::DropNewest,
            interrupt_char: Some(DEFAULT_INTERRUPT_CHAR),
            uart: UartConfig::default(),
        }
    }
}
