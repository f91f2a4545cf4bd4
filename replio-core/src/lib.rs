//! Board-agnostic console core for an interpreter runtime
//!
//! This crate contains everything between the interpreter's stdio calls
//! and the chip's peripherals that does not depend on a specific chip:
//!
//! - Input ring buffer shared by the serial RX path and the dupterm task
//! - Blocking character read driven by a cooperative event loop
//! - Duplicated terminal (dupterm) input task with its reentrancy guard
//! - Bounded task queue with a configurable overflow policy
//! - Output path with CRLF line-ending cooking
//! - Tick counters and event-polling delays
//! - Configuration types and a small TOML subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod config;
pub mod console;
pub mod exception;
pub mod ringbuf;
pub mod task;

pub use config::{ConsoleConfig, ParseError};
pub use console::{Console, ConsoleStats, DebugWriter};
pub use exception::{Exception, ExceptionSlot};
pub use ringbuf::{RingBuffer, DEFAULT_RING_SIZE};
pub use task::{
    DrainReport, DupTerm, DuptermSlot, DuptermTask, NoDupTerm, OverflowPolicy, StopReason, TaskEvent,
    TaskOutcome, TaskQueue, DEFAULT_TASK_QUEUE_DEPTH,
};
