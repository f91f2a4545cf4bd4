//! Buffered UART console and dupterm
//!
//! The UART interrupt fills the embassy-rp RX buffer; the console drains
//! it from its event loop without blocking.

use embassy_rp::uart::{BufferedUart, Error as UartError};
use embedded_io::{Read, ReadReady, Write};
use replio_core::DupTerm;
use replio_hal::{SerialRx, SerialTx};

/// Primary console on a buffered UART
pub struct Rp2040Serial {
    uart: BufferedUart,
}

impl Rp2040Serial {
    /// Wrap an initialized UART
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

impl SerialTx for Rp2040Serial {
    fn write_byte(&mut self, byte: u8) {
        // Nowhere to report a console TX failure
        let _ = Write::write_all(&mut self.uart, &[byte]);
    }

    fn write_all(&mut self, data: &[u8]) {
        let _ = Write::write_all(&mut self.uart, data);
    }

    fn flush(&mut self) {
        let _ = Write::flush(&mut self.uart);
    }
}

impl SerialRx for Rp2040Serial {
    fn try_read(&mut self) -> Option<u8> {
        match read_nonblocking(&mut self.uart) {
            Ok(byte) => byte,
            Err(_e) => {
                // Byte is lost; the line keeps running
                #[cfg(feature = "defmt")]
                defmt::warn!("UART read error: {:?}", _e);
                None
            }
        }
    }
}

/// Second UART attached as a duplicated terminal
///
/// A UART never reaches end of stream; it only errors (framing, overrun,
/// break), which detaches it.
pub struct UartDupterm {
    uart: BufferedUart,
}

impl UartDupterm {
    /// Wrap an initialized UART
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

impl DupTerm for UartDupterm {
    type Error = UartError;

    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        if buf.is_empty() {
            return Ok(None);
        }
        Ok(read_nonblocking(&mut self.uart)?.map(|byte| {
            buf[0] = byte;
            1
        }))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.uart, data)
    }

    fn read_ready(&mut self) -> bool {
        match self.uart.read_ready() {
            Ok(ready) => ready,
            // Let the read report it and detach the stream
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("dupterm UART error: {:?}", _e);
                true
            }
        }
    }
}

/// Read one byte if the RX buffer holds one
fn read_nonblocking(uart: &mut BufferedUart) -> Result<Option<u8>, UartError> {
    if !uart.read_ready()? {
        return Ok(None);
    }
    let mut byte = [0u8; 1];
    match Read::read(uart, &mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}
