//! replio Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the console shim consumes.
//! Chip-specific HALs implement them so the same console core can sit
//! between an interpreter runtime and different microcontrollers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Interpreter runtime / replio-firmware  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  replio-core (console, ring buffer)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  replio-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ replio-hal-     │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialTx`], [`serial::SerialRx`] - Primary console UART
//! - [`watchdog::Watchdog`] - Hang detection timer
//! - [`clock::Clock`] - Monotonic microsecond timer

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod serial;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use serial::{SerialRx, SerialTx, UartConfig};
pub use watchdog::{NoWatchdog, Watchdog};
