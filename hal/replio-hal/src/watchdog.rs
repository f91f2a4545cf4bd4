//! Watchdog timer abstraction

/// Hardware watchdog
///
/// Resets the chip unless fed periodically. The console feeds it on every
/// idle iteration of a blocking read.
pub trait Watchdog {
    /// Acknowledge the watchdog, restarting its countdown
    fn feed(&mut self);

    /// Stop the watchdog entirely
    ///
    /// Used during development, where a debugger halt or a long REPL idle
    /// would otherwise trip it.
    fn disable(&mut self);
}

/// Watchdog that does nothing
///
/// For boards without a watchdog, or builds that never enable it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn feed(&mut self) {}

    fn disable(&mut self) {}
}
