//! AVT414 transport abstraction
//!
//! This crate defines the serial transport traits the AVT414 driver talks
//! through. The driver never opens a port itself; it is handed something that
//! implements [`UartTx`] and [`UartRx`] and owns it for the rest of its life.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (avt414-demo, etc.)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avt414 (device handle)                 │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avt414-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avt414-hal-serialport (host serial)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx, BAUD_RATE};
