//! Duplicated terminal (dupterm) input task
//!
//! A dupterm is an auxiliary stream (a second UART, a network socket) that
//! the runtime attaches next to the primary console. Console output is
//! mirrored to it and its input is fed into the same ring buffer the
//! serial RX path fills.
//!
//! The input side runs as a cooperative task: each trigger drains every
//! byte the stream has right now, one `read` of length 1 at a time, then
//! yields. A failing or exhausted stream is detached for good; the
//! runtime must attach a new one to resume.

use core::convert::Infallible;
use core::fmt::Debug;

use crate::ringbuf::RingBuffer;

/// Stream attached as a duplicated terminal
pub trait DupTerm {
    /// Error raised by the stream
    type Error: Debug;

    /// Read up to `buf.len()` bytes
    ///
    /// - `Ok(Some(n))` with `n > 0`: bytes read
    /// - `Ok(Some(0))`: end of stream
    /// - `Ok(None)`: nothing available right now
    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Mirror console output to the stream
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if a read would return data
    ///
    /// Streams that learn about incoming data some other way (a socket
    /// callback posting the trigger) can keep the default.
    fn read_ready(&mut self) -> bool {
        false
    }
}

/// Placeholder for consoles that never attach a dupterm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDupTerm {}

impl DupTerm for NoDupTerm {
    type Error = Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        match *self {}
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        match *self {}
    }
}

/// The currently attached dupterm, if any
///
/// The runtime owns the attach/detach lifecycle; the console only checks
/// presence and detaches on failure.
#[derive(Debug)]
pub struct DuptermSlot<D> {
    term: Option<D>,
}

impl<D> Default for DuptermSlot<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<D> DuptermSlot<D> {
    /// Create a slot with nothing attached
    pub const fn empty() -> Self {
        Self { term: None }
    }

    /// Attach a stream, returning the one it replaces
    pub fn attach(&mut self, term: D) -> Option<D> {
        self.term.replace(term)
    }

    /// Detach the current stream
    pub fn detach(&mut self) -> Option<D> {
        self.term.take()
    }

    /// Check if a stream is attached
    pub fn is_attached(&self) -> bool {
        self.term.is_some()
    }

    /// Access the attached stream
    pub fn get_mut(&mut self) -> Option<&mut D> {
        self.term.as_mut()
    }
}

/// Why a dupterm drain stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason<E> {
    /// No stream attached
    NoTerminal,
    /// Stream had nothing more to give for now
    WouldBlock,
    /// Stream reached end of file; it has been detached
    Eof,
    /// Stream raised an error; it has been detached
    ReadError(E),
}

impl<E> StopReason<E> {
    /// Check if this stop detached the stream
    pub fn deactivated(&self) -> bool {
        matches!(self, StopReason::Eof | StopReason::ReadError(_))
    }
}

/// Result of one drain of the dupterm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReport<E> {
    /// Bytes accepted by the ring buffer
    pub produced: usize,
    /// Bytes lost because the ring buffer was full
    pub dropped: usize,
    /// What ended the drain
    pub stop: StopReason<E>,
}

/// Outcome of a task trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<E> {
    /// Task was already running; trigger dropped
    Skipped,
    /// Task ran to completion
    Ran(DrainReport<E>),
}

/// Dupterm input task state
///
/// Only the reentrancy lock lives here. The stream and the ring buffer are
/// passed in by the owner on every run.
#[derive(Debug, Default)]
pub struct DuptermTask {
    locked: bool,
}

impl DuptermTask {
    /// Create an idle task
    pub const fn new() -> Self {
        Self { locked: false }
    }

    /// Check if a run is in progress
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Handle one trigger
    ///
    /// Drains the stream into `input` until it blocks, ends or fails. A
    /// trigger arriving while a run is in flight is dropped.
    pub fn run<D: DupTerm, const N: usize>(
        &mut self,
        term: &mut DuptermSlot<D>,
        input: &mut RingBuffer<N>,
    ) -> TaskOutcome<D::Error> {
        if self.locked {
            return TaskOutcome::Skipped;
        }
        self.locked = true;

        let mut produced = 0;
        let mut dropped = 0;
        let stop = loop {
            match read_one(term) {
                Ok(byte) => {
                    if input.put(byte) {
                        produced += 1;
                    } else {
                        dropped += 1;
                    }
                }
                Err(stop) => break stop,
            }
        };

        self.locked = false;
        TaskOutcome::Ran(DrainReport {
            produced,
            dropped,
            stop,
        })
    }
}

/// Read a single byte from the attached stream
///
/// Detaches the stream on EOF or error.
fn read_one<D: DupTerm>(term: &mut DuptermSlot<D>) -> Result<u8, StopReason<D::Error>> {
    let Some(stream) = term.get_mut() else {
        return Err(StopReason::NoTerminal);
    };

    let mut buf = [0u8; 1];
    match stream.read(&mut buf) {
        Ok(Some(0)) => {
            term.detach();
            Err(StopReason::Eof)
        }
        Ok(Some(_)) => Ok(buf[0]),
        Ok(None) => Err(StopReason::WouldBlock),
        Err(e) => {
            term.detach();
            Err(StopReason::ReadError(e))
        }
    }
}
