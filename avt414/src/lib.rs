//! AVT414 I/O board driver
//!
//! The AVT414 is a small microcontroller board with three 8-bit digital
//! ports (B, C, D) and an 8-channel 10-bit ADC, controlled over a serial
//! line at 57600 baud. [`Avt414`] owns that serial line and turns port
//! setup, writes, reads and ADC conversions into the shortest command
//! sequence the board accepts.
//!
//! # Example
//!
//! ```ignore
//! let uart = SerialUart::open("/dev/ttyUSB0")?;
//! let mut board = Avt414::new(uart);
//!
//! board.setup('D', 0x00)?; // all outputs
//! board.write('D', 0x80)?; // full WRITE command
//! board.write('D', 0x00)?; // two byte continuation
//! let pins = board.read('B')?;
//! let sample = board.adc(0)?;
//! board.close()?;
//! ```
//!
//! # Threading
//!
//! Every operation takes `&mut self` and changes the board's command
//! context. Share a handle between threads only behind a lock.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod device;
pub mod error;
pub mod writer;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod sim;

pub use device::Avt414;
pub use error::{Error, StreamError};
pub use writer::PortWriter;

pub use avt414_protocol::{adc_to_volts, Channel, IntoChannel, IntoPort, IoMask, Mode, Port, ADC_MAX};
