//! AVT414 Command Protocol
//!
//! This crate defines the ASCII/binary command set of the AVT414 I/O
//! expansion board: three 8-bit digital ports (B, C, D) and an 8-channel
//! 10-bit ADC, driven over a 57600 baud serial line.
//!
//! # Protocol Overview
//!
//! Every full command starts with the ASCII escape byte and names its
//! operation and target:
//! ```text
//! ┌──────┬─────┬──────┬───────────────┐
//! │ 0x1B │ CMD │ ARG  │ PAYLOAD       │
//! │ 1B   │ 1B  │ 1B   │ 0–2B          │
//! └──────┴─────┴──────┴───────────────┘
//! ```
//!
//! The board remembers the last full command and accepts bare payloads as
//! continuations of it (see [`command`] for the forms). [`Encoder`] tracks
//! that [`Mode`] and picks the shortest correct form.
//!
//! This crate performs no I/O; see the `avt414` crate for the device handle.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod command;
pub mod encoder;
pub mod hex;
pub mod port;

pub use adc::{adc_to_volts, compose_sample, Channel, IntoChannel, InvalidChannel, ADC_MAX};
pub use command::{Command, EncodedCommand, Form, ESC, MAX_COMMAND_LEN};
pub use encoder::{Encoder, Mode};
pub use hex::HexError;
pub use port::{IntoPort, InvalidPort, IoMask, Port};
