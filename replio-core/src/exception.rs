//! Interpreter exception channel
//!
//! The runtime keeps a single pending-exception slot. Asynchronous sources
//! (the keyboard interrupt character, signal handlers in the runtime) store
//! an exception there, and the console's event loop takes it out and
//! returns it to whoever is blocked, which unwinds into the interpreter.

/// Exceptions this layer raises or forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Exception {
    /// Interrupt character received on the console
    KeyboardInterrupt,
    /// Low-level assertion failed below the interpreter
    Assertion,
    /// Exception object raised by the runtime (opaque handle)
    Raised(u32),
}

/// Pending-exception slot
///
/// Holds at most one exception. Raising while one is pending replaces it,
/// so the most recent asynchronous exception wins.
#[derive(Debug, Default)]
pub struct ExceptionSlot {
    pending: Option<Exception>,
}

impl ExceptionSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Store an exception to be raised at the next poll
    pub fn raise(&mut self, exception: Exception) {
        self.pending = Some(exception);
    }

    /// Clear the slot, returning what was pending
    pub fn take(&mut self) -> Option<Exception> {
        self.pending.take()
    }

    /// Check if an exception is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Propagate the pending exception, if any
    pub fn check(&mut self) -> Result<(), Exception> {
        match self.take() {
            Some(exception) => Err(exception),
            None => Ok(()),
        }
    }
}
