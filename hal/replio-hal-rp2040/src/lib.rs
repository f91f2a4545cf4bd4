//! RP2040 bindings for the replio console
//!
//! Implements the `replio-hal` traits on embassy-rp peripherals:
//! - Buffered UART as the primary console ([`serial::Rp2040Serial`])
//! - Buffered UART as a duplicated terminal ([`serial::UartDupterm`])
//! - Hardware watchdog ([`watchdog::Rp2040Watchdog`])
//! - embassy-time as the microsecond clock ([`clock::EmbassyClock`])
//! - Console UART settings to embassy-rp config ([`uart`])

#![no_std]

pub mod clock;
pub mod serial;
pub mod uart;
pub mod watchdog;

// Re-export shared traits from replio-hal for convenience
pub use replio_hal::{Clock, SerialRx, SerialTx, Watchdog};
