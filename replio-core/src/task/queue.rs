//! Bounded task event queue
//!
//! Tasks are triggered by posting events. The queue has a fixed depth;
//! what happens to a post while it is full is decided by an
//! [`OverflowPolicy`] rather than silently.

use heapless::Deque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default event queue depth
pub const DEFAULT_TASK_QUEUE_DEPTH: usize = 4;

/// Events that trigger cooperative tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskEvent {
    /// Data may be readable on the duplicated terminal
    DuptermInput,
    /// New input landed in the ring buffer (event-driven REPL wake)
    InputReady,
}

/// Behavior when posting to a full queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Discard the event being posted
    #[default]
    DropNewest,
    /// Discard the oldest queued event to make room
    DropOldest,
}

/// Fixed-depth FIFO of task events
#[derive(Debug)]
pub struct TaskQueue<const Q: usize> {
    events: Deque<TaskEvent, Q>,
    policy: OverflowPolicy,
    dropped: u32,
}

impl<const Q: usize> TaskQueue<Q> {
    /// Create an empty queue
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self {
            events: Deque::new(),
            policy,
            dropped: 0,
        }
    }

    /// Post an event
    ///
    /// Returns `true` if the posted event was queued. Every discarded event
    /// (new or old) is counted in [`dropped`](Self::dropped).
    pub fn post(&mut self, event: TaskEvent) -> bool {
        if !self.events.is_full() {
            return self.events.push_back(event).is_ok();
        }

        match self.policy {
            OverflowPolicy::DropNewest => {
                self.dropped = self.dropped.saturating_add(1);
                log_debug!("task queue full, dropping new event");
                false
            }
            OverflowPolicy::DropOldest => {
                if self.events.pop_front().is_some() {
                    self.dropped = self.dropped.saturating_add(1);
                }
                match self.events.push_back(event) {
                    Ok(()) => true,
                    Err(_) => {
                        // Zero-depth queue
                        self.dropped = self.dropped.saturating_add(1);
                        false
                    }
                }
            }
        }
    }

    /// Take the next event
    pub fn pop(&mut self) -> Option<TaskEvent> {
        self.events.pop_front()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total events discarded by overflow
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Active overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}
