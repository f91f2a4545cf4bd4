//! Serial console abstractions
//!
//! The console only ever transmits single bytes and polls for received
//! bytes, so the traits are byte-oriented and never block on receive.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serial transmitter
///
/// Transmission is byte-paced; implementations wait for room in the
/// hardware FIFO. Errors on the primary console have nowhere to go, so
/// the methods are infallible.
pub trait SerialTx {
    /// Transmit one byte
    fn write_byte(&mut self, byte: u8);

    /// Transmit a run of bytes
    fn write_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.write_byte(byte);
        }
    }

    /// Wait until all queued bytes have left the transmitter
    fn flush(&mut self);
}

/// Serial receiver
///
/// Stands in for the RX interrupt: the console drains it from its event
/// loop and pushes the bytes into its input ring buffer.
pub trait SerialRx {
    /// Take one received byte if one is waiting
    fn try_read(&mut self) -> Option<u8>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}
