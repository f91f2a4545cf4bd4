//! Line echo loop
//!
//! Stands in for the interpreter's REPL: reads characters through the
//! blocking console read, keeps a line buffer with backspace, and echoes
//! completed lines back. Exercises every console path a real runtime
//! uses: blocking input, keyboard interrupt, raw and cooked output.

use core::fmt::Write;

use heapless::Vec;
use replio_core::{Console, DupTerm, Exception};
use replio_hal_rp2040::{Clock, SerialRx, SerialTx, Watchdog};

/// Maximum line length
const LINE_SIZE: usize = 128;

const PROMPT: &[u8] = b">>> ";

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Run the echo loop forever
pub fn run<S, W, C, D, const N: usize, const Q: usize>(console: &mut Console<S, W, C, D, N, Q>) -> !
where
    S: SerialTx + SerialRx,
    W: Watchdog,
    C: Clock,
    D: DupTerm,
{
    let mut line: Vec<u8, LINE_SIZE> = Vec::new();
    console.write_bytes(PROMPT);

    loop {
        match console.read_blocking_char() {
            Ok(b'\r') | Ok(b'\n') => {
                console.write_cooked(b"\n");
                if !line.is_empty() {
                    console.write_bytes(b"echo: ");
                    console.write_bytes(&line);
                    console.write_cooked(b"\n");
                }
                line.clear();
                console.write_bytes(PROMPT);
            }
            Ok(BACKSPACE) | Ok(DELETE) => {
                if line.pop().is_some() {
                    console.write_bytes(b"\x08 \x08");
                }
            }
            Ok(c) => {
                // Full line: drop the character, don't echo it
                if line.push(c).is_ok() {
                    console.write_char(c);
                }
            }
            Err(Exception::KeyboardInterrupt) => {
                console.write_cooked(b"\nKeyboardInterrupt\n");
                line.clear();
                console.write_bytes(PROMPT);
            }
            Err(e) => {
                let _ = write!(console, "\nunhandled exception: {:?}\n", e);
                line.clear();
                console.write_bytes(PROMPT);
            }
        }
    }
}
