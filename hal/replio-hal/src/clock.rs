//! Monotonic time source

/// Free-running microsecond clock
pub trait Clock {
    /// Microseconds since boot
    ///
    /// Must be monotonic. Wrapping is left to callers that truncate.
    fn now_us(&mut self) -> u64;
}
