//! Cooperative tasks
//!
//! A bounded event queue drained one event per event-loop iteration, and
//! the duplicated-terminal input task it drives.

pub mod dupterm;
pub mod queue;

pub use dupterm::{
    DrainReport, DupTerm, DuptermSlot, DuptermTask, NoDupTerm, StopReason, TaskOutcome,
};
pub use queue::{OverflowPolicy, TaskEvent, TaskQueue, DEFAULT_TASK_QUEUE_DEPTH};
