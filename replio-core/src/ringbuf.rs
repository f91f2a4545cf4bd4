//! Input ring buffer
//!
//! Fixed-capacity byte FIFO with one writer (serial RX, dupterm task) and
//! one reader (the blocking character read). Backed by a heapless SPSC
//! queue, which keeps one slot free to tell full from empty: a
//! `RingBuffer<N>` holds at most `N - 1` bytes.
//!
//! Pushing into a full buffer rejects the new byte. Bytes already queued
//! are never overwritten.

use heapless::spsc::{Consumer as QueueConsumer, Producer as QueueProducer, Queue};

/// Default number of slots in the console input buffer
pub const DEFAULT_RING_SIZE: usize = 256;

/// Byte ring buffer
pub struct RingBuffer<const N: usize> {
    queue: Queue<u8, N>,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
        }
    }

    /// Enqueue one byte
    ///
    /// Returns `false` when the buffer is full; the byte is dropped.
    pub fn put(&mut self, byte: u8) -> bool {
        self.queue.enqueue(byte).is_ok()
    }

    /// Dequeue the oldest byte, or `None` when empty
    pub fn get(&mut self) -> Option<u8> {
        self.queue.dequeue()
    }

    /// Number of bytes waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no bytes are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check if the next `put` would fail
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Maximum number of bytes held at once (`N - 1`)
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Split into producer and consumer halves
    ///
    /// The halves borrow the buffer, so the single-writer/single-reader
    /// roles are checked at compile time.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let (producer, consumer) = self.queue.split();
        (Producer { inner: producer }, Consumer { inner: consumer })
    }
}

/// Write half of a split [`RingBuffer`]
pub struct Producer<'a, const N: usize> {
    inner: QueueProducer<'a, u8, N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Enqueue one byte, `false` when full
    pub fn put(&mut self, byte: u8) -> bool {
        self.inner.enqueue(byte).is_ok()
    }

    /// Check if there is room for another byte
    pub fn ready(&self) -> bool {
        self.inner.ready()
    }
}

/// Read half of a split [`RingBuffer`]
pub struct Consumer<'a, const N: usize> {
    inner: QueueConsumer<'a, u8, N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Dequeue the oldest byte, or `None` when empty
    pub fn get(&mut self) -> Option<u8> {
        self.inner.dequeue()
    }

    /// Check if a byte is waiting
    pub fn ready(&self) -> bool {
        self.inner.ready()
    }
}
